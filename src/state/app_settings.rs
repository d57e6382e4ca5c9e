use crate::state::forms::Credentials;
use crate::state::selection::default_selection_path;
use athletrack_api::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_url: String,
    pub timeout: Duration,
    pub selection_path: PathBuf,
    pub admin: Credentials,
    pub super_admin: Credentials,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            selection_path: PathBuf::from("selection.json"),
            admin: Credentials { username: "admin".into(), password: "admin".into() },
            super_admin: Credentials { username: "superadmin".into(), password: "superadmin".into() },
        }
    }
}

impl AppSettings {
    /// Defaults overridden by `ATHLETRACK_*` environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            full_screen: false,
            log_level: var("ATHLETRACK_LOG_LEVEL").and_then(|v| LevelFilter::from_str(v.trim()).ok()),
            api_url: var("ATHLETRACK_API_URL").unwrap_or(defaults.api_url),
            timeout: var("ATHLETRACK_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            selection_path: var("ATHLETRACK_SELECTION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_selection_path),
            admin: Credentials {
                username: var("ATHLETRACK_ADMIN_USER").unwrap_or(defaults.admin.username),
                password: var("ATHLETRACK_ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
            },
            super_admin: Credentials {
                username: var("ATHLETRACK_SUPERADMIN_USER").unwrap_or(defaults.super_admin.username),
                password: var("ATHLETRACK_SUPERADMIN_PASSWORD")
                    .unwrap_or(defaults.super_admin.password),
            },
        }
    }
}
