use crate::state::forms::{LoginForm, RegistrationForm};
use crate::state::route::Route;
use crate::state::search::SearchState;
use crate::state::selection::SelectedTournament;
use athletrack_api::{Match, MatchAggregate, Team, Tournament};
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Animation state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AnimationState {
    /// Monotonic tick counter, one per 80ms animation tick.
    pub tick: u64,
}

impl AnimationState {
    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

// ---------------------------------------------------------------------------
// Generic list cursor
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub struct ListCursor {
    pub selected: usize,
}

impl ListCursor {
    pub fn down(&mut self, len: usize) {
        let max = len.saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Clamp after the underlying list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Upcoming events page
// ---------------------------------------------------------------------------

/// The spinner stays up at least this long after entering the page.
pub const UPCOMING_MIN_LOADING: Duration = Duration::from_millis(600);
/// Cards shown before "Show more".
pub const UPCOMING_COLLAPSED_COUNT: usize = 4;

#[derive(Debug)]
pub struct UpcomingState {
    pub entered_at: Instant,
    pub show_all: bool,
    pub cursor: ListCursor,
}

impl Default for UpcomingState {
    fn default() -> Self {
        Self { entered_at: Instant::now(), show_all: false, cursor: ListCursor::default() }
    }
}

impl UpcomingState {
    pub fn is_warming_up(&self) -> bool {
        self.entered_at.elapsed() < UPCOMING_MIN_LOADING
    }

    pub fn visible_count(&self, total: usize) -> usize {
        if self.show_all {
            total
        } else {
            total.min(UPCOMING_COLLAPSED_COUNT)
        }
    }
}

// ---------------------------------------------------------------------------
// Match details page
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MatchViewState {
    pub match_id: Option<String>,
    /// None while the aggregation is in flight (or failed).
    pub aggregate: Option<MatchAggregate>,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Admin dashboards
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Teams,
    Matches,
}

impl AdminTab {
    pub fn toggle(self) -> Self {
        match self {
            AdminTab::Teams => AdminTab::Matches,
            AdminTab::Matches => AdminTab::Teams,
        }
    }
}

#[derive(Debug, Default)]
pub struct AdminState {
    pub logged_in: bool,
    pub login: LoginForm,
    pub tab: AdminTab,
    pub cursor: ListCursor,
    /// Team whose detail line is expanded.
    pub expanded_team: Option<String>,
}

#[derive(Debug, Default)]
pub struct SuperAdminState {
    pub logged_in: bool,
    pub login: LoginForm,
    pub cursor: ListCursor,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub route: Route,
    /// Previously visited routes, most recent last.
    pub history: Vec<Route>,
    pub show_logs: bool,
    /// Raw path being typed after `:`.
    pub path_prompt: Option<String>,

    pub search: SearchState,
    pub selection: Option<SelectedTournament>,

    /// Fetched data, `None` until the first response arrives.
    pub tournaments: Option<Vec<Tournament>>,
    pub matches: Option<Vec<Match>>,
    pub teams: Option<Vec<Team>>,

    pub events_cursor: ListCursor,
    pub cards_cursor: ListCursor,
    pub register_cursor: ListCursor,
    pub upcoming: UpcomingState,
    pub match_view: MatchViewState,
    pub registration: Option<RegistrationForm>,
    pub about_scroll: u16,
    pub admin: AdminState,
    pub super_admin: SuperAdminState,
    pub animation: AnimationState,
}

impl AppState {
    pub fn new(selection: Option<SelectedTournament>) -> Self {
        Self { selection, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_in_bounds() {
        let mut c = ListCursor::default();
        c.up();
        assert_eq!(c.selected, 0);
        c.down(3);
        c.down(3);
        c.down(3);
        assert_eq!(c.selected, 2);
        c.clamp(1);
        assert_eq!(c.selected, 0);
        c.down(0);
        assert_eq!(c.selected, 0);
    }

    #[test]
    fn upcoming_collapses_to_four_cards() {
        let mut u = UpcomingState::default();
        assert_eq!(u.visible_count(10), 4);
        assert_eq!(u.visible_count(2), 2);
        u.show_all = true;
        assert_eq!(u.visible_count(10), 10);
    }

    #[test]
    fn upcoming_warms_up_after_entry() {
        let u = UpcomingState::default();
        assert!(u.is_warming_up());
        let old = UpcomingState {
            entered_at: Instant::now() - Duration::from_secs(1),
            ..UpcomingState::default()
        };
        assert!(!old.is_warming_up());
    }

    #[test]
    fn admin_tab_toggles() {
        assert_eq!(AdminTab::Teams.toggle(), AdminTab::Matches);
        assert_eq!(AdminTab::Matches.toggle(), AdminTab::Teams);
    }
}
