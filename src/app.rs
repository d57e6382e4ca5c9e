use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, MatchViewState, UpcomingState};
use crate::state::forms::{RegistrationForm, SubmitStatus};
use crate::state::messages::NetworkRequest;
use crate::state::route::Route;
use crate::state::selection::{SelectedTournament, SelectionStore};
use athletrack_api::client::AthleTrackApi;
use athletrack_api::{Match, MatchAggregate, Team, Tournament};
use log::{error, info, warn};

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    /// Shared with the network worker; also used to build poster URLs.
    pub api: AthleTrackApi,
    selection_store: SelectionStore,
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::load())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let selection_store = SelectionStore::new(settings.selection_path.clone());
        let app = Self {
            state: AppState::new(selection_store.load()),
            api: AthleTrackApi::new(&settings.api_url, settings.timeout),
            settings,
            selection_store,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Routing
    // -----------------------------------------------------------------------

    /// First navigation. The header's tournament list is fetched once here.
    pub fn start(&mut self, initial: Route) -> Vec<NetworkRequest> {
        let mut requests = Vec::new();
        if !self.state.search.loaded {
            requests.push(NetworkRequest::LoadTournaments);
        }
        self.state.route = Route::Home;
        for request in self.navigate(initial) {
            let duplicate = matches!(request, NetworkRequest::LoadTournaments)
                && requests.iter().any(|r| matches!(r, NetworkRequest::LoadTournaments));
            if !duplicate {
                requests.push(request);
            }
        }
        requests
    }

    /// Switch pages. Returns the fetches the new page needs on entry.
    pub fn navigate(&mut self, route: Route) -> Vec<NetworkRequest> {
        let route = self.gate(route);
        if route != self.state.route {
            let previous = std::mem::replace(&mut self.state.route, route.clone());
            self.state.history.push(previous);
        }
        self.state.search.clear();
        self.enter(&route)
    }

    pub fn back(&mut self) -> Vec<NetworkRequest> {
        let Some(previous) = self.state.history.pop() else {
            return Vec::new();
        };
        let previous = self.gate(previous);
        self.state.route = previous.clone();
        self.enter(&previous)
    }

    fn gate(&self, route: Route) -> Route {
        match route {
            Route::Admin if !self.state.admin.logged_in => Route::AdminLogin,
            Route::SuperAdmin if !self.state.super_admin.logged_in => Route::SuperAdminLogin,
            route => route,
        }
    }

    fn enter(&mut self, route: &Route) -> Vec<NetworkRequest> {
        match route {
            Route::Home | Route::Register | Route::SuperAdmin => {
                vec![NetworkRequest::LoadTournaments]
            }
            Route::Upcoming => {
                self.state.upcoming = UpcomingState::default();
                vec![NetworkRequest::LoadTournaments]
            }
            Route::Events => vec![NetworkRequest::LoadTournaments, NetworkRequest::LoadMatches],
            Route::MatchCards => vec![NetworkRequest::LoadMatches],
            Route::MatchDetails { match_id } => {
                // Aggregates are rebuilt on every visit.
                self.state.match_view = MatchViewState {
                    match_id: Some(match_id.clone()),
                    ..MatchViewState::default()
                };
                vec![NetworkRequest::LoadMatchAggregate { match_id: match_id.clone() }]
            }
            Route::RegisterTeam { tournament_id } => {
                let stale = self
                    .state
                    .registration
                    .as_ref()
                    .is_none_or(|f| &f.tournament_id != tournament_id);
                if stale {
                    self.state.registration = Some(RegistrationForm::new(tournament_id));
                }
                vec![NetworkRequest::LoadTournaments]
            }
            Route::Admin => vec![NetworkRequest::LoadTeams, NetworkRequest::LoadMatches],
            Route::About | Route::AdminLogin | Route::SuperAdminLogin => Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_tournaments_loaded(&mut self, tournaments: Vec<Tournament>) {
        if !self.state.search.loaded {
            self.state.search.load(tournaments.clone());
        }
        let len = tournaments.len();
        self.state.register_cursor.clamp(len);
        self.state.super_admin.cursor.clamp(len);
        self.state.upcoming.cursor.clamp(self.state.upcoming.visible_count(len));
        self.state.tournaments = Some(tournaments);
    }

    pub fn on_matches_loaded(&mut self, matches: Vec<Match>) {
        self.state.matches = Some(matches);
        let events_len = self.events_matches().len();
        self.state.events_cursor.clamp(events_len);
        let len = self.state.matches.as_ref().map_or(0, Vec::len);
        self.state.cards_cursor.clamp(len);
    }

    pub fn on_teams_loaded(&mut self, teams: Vec<Team>) {
        self.state.admin.cursor.clamp(teams.len());
        self.state.teams = Some(teams);
    }

    /// Responses for a match the user already left are ignored.
    pub fn on_match_aggregate_loaded(&mut self, aggregate: MatchAggregate) {
        if self.state.match_view.match_id.as_deref() == Some(aggregate.match_id.as_str()) {
            self.state.match_view.aggregate = Some(aggregate);
        }
    }

    pub fn on_team_registered(&mut self, tournament_id: String) {
        info!("team registered for tournament {tournament_id}");
        if let Some(form) = self.state.registration.as_mut()
            && form.tournament_id == tournament_id
        {
            form.on_submitted();
        }
    }

    /// Failures are logged and the affected page keeps its placeholder.
    pub fn on_error(&mut self, request: NetworkRequest, message: String) {
        error!("{request:?} failed: {message}");
        if let NetworkRequest::RegisterTeam { registration } = request
            && let Some(form) = self.state.registration.as_mut()
            && form.tournament_id == registration.tournament_id
        {
            form.on_failed();
            form.errors = vec!["Registration could not be submitted. Press Enter to retry.".into()];
        }
    }

    // -----------------------------------------------------------------------
    // Header search
    // -----------------------------------------------------------------------

    /// Store the highlighted search hit and show it on the Events page.
    pub fn select_highlighted_tournament(&mut self) -> Vec<NetworkRequest> {
        let Some(tournament) = self.state.search.highlighted_tournament() else {
            return Vec::new();
        };
        let selection = SelectedTournament { name: tournament.name.clone(), id: tournament.id.clone() };
        self.select_tournament(selection)
    }

    pub fn select_tournament(&mut self, selection: SelectedTournament) -> Vec<NetworkRequest> {
        if let Err(e) = self.selection_store.save(&selection) {
            warn!(
                "could not persist tournament selection to {}: {e}",
                self.selection_store.path().display()
            );
        }
        self.state.selection = Some(selection);
        self.state.events_cursor.reset();
        self.state.search.clear();

        if self.state.route == Route::Events {
            return Vec::new();
        }
        self.navigate(Route::Events)
    }

    /// The tournament the Events page shows: the stored selection, or the
    /// first one listed.
    pub fn events_tournament(&self) -> Option<&Tournament> {
        let tournaments = self.state.tournaments.as_deref()?;
        self.state
            .selection
            .as_ref()
            .and_then(|s| tournaments.iter().find(|t| t.id == s.id))
            .or_else(|| tournaments.first())
    }

    /// Matches for the Events page. Matches without a tournament reference
    /// are shown for every tournament.
    pub fn events_matches(&self) -> Vec<&Match> {
        let Some(matches) = self.state.matches.as_deref() else {
            return Vec::new();
        };
        let tournament_id = self
            .events_tournament()
            .map(|t| t.id.clone())
            .or_else(|| self.state.selection.as_ref().map(|s| s.id.clone()));
        matches
            .iter()
            .filter(|m| match (&m.tournament_id, &tournament_id) {
                (Some(owner), Some(wanted)) => owner == wanted,
                _ => true,
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Page interaction
    // -----------------------------------------------------------------------

    pub fn cursor_down(&mut self) {
        match self.state.route {
            Route::Events => {
                let len = self.events_matches().len();
                self.state.events_cursor.down(len);
            }
            Route::MatchCards => {
                let len = self.state.matches.as_ref().map_or(0, Vec::len);
                self.state.cards_cursor.down(len);
            }
            Route::Upcoming => {
                let total = self.state.tournaments.as_ref().map_or(0, Vec::len);
                let len = self.state.upcoming.visible_count(total);
                self.state.upcoming.cursor.down(len);
            }
            Route::Register => {
                let len = self.state.tournaments.as_ref().map_or(0, Vec::len);
                self.state.register_cursor.down(len);
            }
            Route::SuperAdmin => {
                let len = self.state.tournaments.as_ref().map_or(0, Vec::len);
                self.state.super_admin.cursor.down(len);
            }
            Route::Admin => {
                let len = self.admin_list_len();
                self.state.admin.cursor.down(len);
            }
            Route::MatchDetails { .. } => {
                self.state.match_view.scroll_offset =
                    self.state.match_view.scroll_offset.saturating_add(1);
            }
            Route::About => self.state.about_scroll = self.state.about_scroll.saturating_add(1),
            _ => {}
        }
    }

    pub fn cursor_up(&mut self) {
        match self.state.route {
            Route::Events => self.state.events_cursor.up(),
            Route::MatchCards => self.state.cards_cursor.up(),
            Route::Upcoming => self.state.upcoming.cursor.up(),
            Route::Register => self.state.register_cursor.up(),
            Route::SuperAdmin => self.state.super_admin.cursor.up(),
            Route::Admin => self.state.admin.cursor.up(),
            Route::MatchDetails { .. } => {
                self.state.match_view.scroll_offset =
                    self.state.match_view.scroll_offset.saturating_sub(1);
            }
            Route::About => self.state.about_scroll = self.state.about_scroll.saturating_sub(1),
            _ => {}
        }
    }

    /// Enter on the current page.
    pub fn activate(&mut self) -> Vec<NetworkRequest> {
        match self.state.route.clone() {
            Route::Home => match self.state.tournaments.as_ref().and_then(|t| t.first()) {
                Some(t) => {
                    let tournament_id = t.id.clone();
                    self.navigate(Route::RegisterTeam { tournament_id })
                }
                None => Vec::new(),
            },
            Route::Events => {
                let selected = self
                    .events_matches()
                    .get(self.state.events_cursor.selected)
                    .map(|m| m.id.clone());
                self.open_match(selected)
            }
            Route::MatchCards => {
                let selected = self
                    .state
                    .matches
                    .as_ref()
                    .and_then(|m| m.get(self.state.cards_cursor.selected))
                    .map(|m| m.id.clone());
                self.open_match(selected)
            }
            Route::Upcoming => {
                let selected = self.tournament_id_at(self.state.upcoming.cursor.selected);
                self.register_for(selected)
            }
            Route::Register => {
                let selected = self.tournament_id_at(self.state.register_cursor.selected);
                self.register_for(selected)
            }
            Route::RegisterTeam { .. } => self.submit_registration().into_iter().collect(),
            Route::AdminLogin => {
                if self.state.admin.login.attempt(&self.settings.admin) {
                    self.state.admin.logged_in = true;
                    self.navigate(Route::Admin)
                } else {
                    Vec::new()
                }
            }
            Route::SuperAdminLogin => {
                if self.state.super_admin.login.attempt(&self.settings.super_admin) {
                    self.state.super_admin.logged_in = true;
                    self.navigate(Route::SuperAdmin)
                } else {
                    Vec::new()
                }
            }
            Route::Admin => self.activate_admin_row(),
            Route::MatchDetails { .. } | Route::About | Route::SuperAdmin => Vec::new(),
        }
    }

    fn open_match(&mut self, match_id: Option<String>) -> Vec<NetworkRequest> {
        match match_id {
            Some(match_id) => self.navigate(Route::MatchDetails { match_id }),
            None => Vec::new(),
        }
    }

    fn register_for(&mut self, tournament_id: Option<String>) -> Vec<NetworkRequest> {
        match tournament_id {
            Some(tournament_id) => self.navigate(Route::RegisterTeam { tournament_id }),
            None => Vec::new(),
        }
    }

    fn tournament_id_at(&self, idx: usize) -> Option<String> {
        self.state
            .tournaments
            .as_ref()
            .and_then(|t| t.get(idx))
            .map(|t| t.id.clone())
    }

    pub fn toggle_show_more(&mut self) {
        if self.state.route == Route::Upcoming {
            self.state.upcoming.show_all = !self.state.upcoming.show_all;
            let total = self.state.tournaments.as_ref().map_or(0, Vec::len);
            let len = self.state.upcoming.visible_count(total);
            self.state.upcoming.cursor.clamp(len);
        }
    }

    /// The tournament a registration form is for, once the list has loaded.
    pub fn registration_tournament(&self) -> Option<&Tournament> {
        let form = self.state.registration.as_ref()?;
        self.state
            .tournaments
            .as_ref()?
            .iter()
            .find(|t| t.id == form.tournament_id)
    }

    pub fn submit_registration(&mut self) -> Option<NetworkRequest> {
        let form = self.state.registration.as_mut()?;
        if form.status == SubmitStatus::Submitting {
            return None;
        }
        let registration = form.validate()?;
        form.status = SubmitStatus::Submitting;
        Some(NetworkRequest::RegisterTeam { registration })
    }

    // -----------------------------------------------------------------------
    // Admin
    // -----------------------------------------------------------------------

    pub fn admin_toggle_tab(&mut self) {
        self.state.admin.tab = self.state.admin.tab.toggle();
        self.state.admin.cursor.reset();
        self.state.admin.expanded_team = None;
    }

    fn admin_list_len(&self) -> usize {
        use crate::state::app_state::AdminTab;
        match self.state.admin.tab {
            AdminTab::Teams => self.state.teams.as_ref().map_or(0, Vec::len),
            AdminTab::Matches => self.state.matches.as_ref().map_or(0, Vec::len),
        }
    }

    fn activate_admin_row(&mut self) -> Vec<NetworkRequest> {
        use crate::state::app_state::AdminTab;
        let idx = self.state.admin.cursor.selected;
        match self.state.admin.tab {
            AdminTab::Teams => {
                let team_id = self
                    .state
                    .teams
                    .as_ref()
                    .and_then(|t| t.get(idx))
                    .map(|t| t.id.clone());
                if let Some(team_id) = team_id {
                    info!("edit requested for team {team_id}");
                    self.state.admin.expanded_team =
                        if self.state.admin.expanded_team.as_ref() == Some(&team_id) {
                            None
                        } else {
                            Some(team_id)
                        };
                }
                Vec::new()
            }
            AdminTab::Matches => {
                let selected = self
                    .state
                    .matches
                    .as_ref()
                    .and_then(|m| m.get(idx))
                    .map(|m| m.id.clone());
                self.open_match(selected)
            }
        }
    }

    /// Drop whichever admin session the current page belongs to.
    pub fn logout(&mut self) -> Vec<NetworkRequest> {
        match self.state.route {
            Route::Admin => {
                self.state.admin.logged_in = false;
                self.navigate(Route::AdminLogin)
            }
            Route::SuperAdmin => {
                self.state.super_admin.logged_in = false;
                self.navigate(Route::SuperAdminLogin)
            }
            _ => Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Misc
    // -----------------------------------------------------------------------

    pub fn advance_animation(&mut self) {
        self.state.animation.advance();
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn poster_url(&self, tournament: &Tournament) -> Option<String> {
        self.api.poster_url(tournament)
    }

    pub fn logo_url(&self, logo: Option<&str>) -> Option<String> {
        logo.and_then(|l| self.api.asset_url(l))
    }
}
