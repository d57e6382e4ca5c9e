pub mod app_settings;
pub mod app_state;
pub mod forms;
pub mod messages;
pub mod network;
pub mod route;
pub mod search;
pub mod selection;
