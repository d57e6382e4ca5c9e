use crate::app::App;
use crate::state::forms::Form;
use crate::state::messages::NetworkRequest;
use crate::state::route::{NAV_LINKS, Route};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

#[derive(Debug)]
pub enum KeyOutcome {
    Quit,
    Continue(Vec<NetworkRequest>),
}

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let outcome = dispatch(&mut guard, key_event);
    drop(guard);

    match outcome {
        KeyOutcome::Quit => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }
        KeyOutcome::Continue(requests) => {
            for request in requests {
                let _ = network_requests.send(request).await;
            }
        }
    }
}

/// Route a key to whichever input currently has focus: the path prompt,
/// the header search, a form, or the page itself.
pub fn dispatch(app: &mut App, key_event: KeyEvent) -> KeyOutcome {
    if let (Char('c'), KeyModifiers::CONTROL) = (key_event.code, key_event.modifiers) {
        return KeyOutcome::Quit;
    }

    if app.state.path_prompt.is_some() {
        return KeyOutcome::Continue(path_prompt_key(app, key_event));
    }
    if app.state.search.focused {
        return KeyOutcome::Continue(search_key(app, key_event));
    }
    if active_form(app).is_some() {
        return KeyOutcome::Continue(form_key(app, key_event));
    }
    page_key(app, key_event)
}

fn path_prompt_key(app: &mut App, key_event: KeyEvent) -> Vec<NetworkRequest> {
    match key_event.code {
        KeyCode::Enter => {
            let path = app.state.path_prompt.take().unwrap_or_default();
            return app.navigate(Route::parse(&path));
        }
        KeyCode::Esc => app.state.path_prompt = None,
        KeyCode::Backspace => {
            if let Some(p) = app.state.path_prompt.as_mut() {
                p.pop();
            }
        }
        Char(c) => {
            if let Some(p) = app.state.path_prompt.as_mut() {
                p.push(c);
            }
        }
        _ => {}
    }
    Vec::new()
}

fn search_key(app: &mut App, key_event: KeyEvent) -> Vec<NetworkRequest> {
    let search = &mut app.state.search;
    match key_event.code {
        KeyCode::Enter => return app.select_highlighted_tournament(),
        KeyCode::Esc => search.clear(),
        KeyCode::Down => search.highlight_next(),
        KeyCode::Up => search.highlight_prev(),
        KeyCode::Backspace => search.pop_char(),
        Char(c) => search.push_char(c),
        _ => {}
    }
    Vec::new()
}

fn active_form(app: &mut App) -> Option<&mut Form> {
    match app.state.route {
        Route::RegisterTeam { .. } => app.state.registration.as_mut().map(|r| &mut r.form),
        Route::AdminLogin => Some(&mut app.state.admin.login.form),
        Route::SuperAdminLogin => Some(&mut app.state.super_admin.login.form),
        _ => None,
    }
}

fn form_key(app: &mut App, key_event: KeyEvent) -> Vec<NetworkRequest> {
    match key_event.code {
        KeyCode::Enter => return app.activate(),
        KeyCode::Esc => return app.back(),
        _ => {}
    }

    let Some(form) = active_form(app) else {
        return Vec::new();
    };
    match key_event.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.pop_char(),
        Char(c) => form.push_char(c),
        _ => {}
    }
    Vec::new()
}

fn page_key(app: &mut App, key_event: KeyEvent) -> KeyOutcome {
    let route = app.state.route.clone();
    let requests = match (&route, key_event.code) {
        (_, Char('q')) => return KeyOutcome::Quit,

        // Header links
        (_, Char(c @ '1'..='4')) => {
            let idx = c as usize - '1' as usize;
            app.navigate(NAV_LINKS[idx].0.clone())
        }
        (_, Char('c')) => app.navigate(Route::MatchCards),
        (_, Char('r')) => app.navigate(Route::Register),
        (route, Char('/')) if route.shows_chrome() => {
            app.state.search.focused = true;
            Vec::new()
        }
        (_, Char(':')) => {
            app.state.path_prompt = Some(String::new());
            Vec::new()
        }

        // Page navigation
        (_, Char('j') | KeyCode::Down) => {
            app.cursor_down();
            Vec::new()
        }
        (_, Char('k') | KeyCode::Up) => {
            app.cursor_up();
            Vec::new()
        }
        (_, KeyCode::Enter) => app.activate(),
        (_, KeyCode::Esc | KeyCode::Backspace) => app.back(),
        (Route::Upcoming, Char('m')) => {
            app.toggle_show_more();
            Vec::new()
        }
        (Route::Admin, KeyCode::Tab) => {
            app.admin_toggle_tab();
            Vec::new()
        }
        (Route::Admin | Route::SuperAdmin, Char('x')) => app.logout(),

        // Global
        (_, Char('f')) => {
            app.toggle_full_screen();
            Vec::new()
        }
        (_, Char('"')) => {
            app.toggle_show_logs();
            Vec::new()
        }

        _ => Vec::new(),
    };
    KeyOutcome::Continue(requests)
}
