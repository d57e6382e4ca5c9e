use crate::state::network::LoadingState;
use athletrack_api::{Match, MatchAggregate, Team, TeamRegistration, Tournament};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadTournaments,
    LoadMatches,
    LoadTeams,
    LoadMatchAggregate { match_id: String },
    RegisterTeam { registration: TeamRegistration },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TournamentsLoaded { tournaments: Vec<Tournament> },
    MatchesLoaded { matches: Vec<Match> },
    TeamsLoaded { teams: Vec<Team> },
    MatchAggregateLoaded { aggregate: MatchAggregate },
    TeamRegistered { tournament_id: String },
    Error { request: NetworkRequest, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    AnimationTick,
}
