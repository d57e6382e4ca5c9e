use crate::state::messages::{NetworkRequest, NetworkResponse};
use athletrack_api::client::{ApiError, AthleTrackApi};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Runs API calls off the UI loop, one request at a time.
pub struct NetworkWorker {
    client: AthleTrackApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: AthleTrackApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = self.handle(request.clone()).await;

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                request,
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle(&self, request: NetworkRequest) -> Result<NetworkResponse, ApiError> {
        match request {
            NetworkRequest::LoadTournaments => {
                debug!("loading tournaments");
                let tournaments = self.client.fetch_tournaments().await?;
                Ok(NetworkResponse::TournamentsLoaded { tournaments })
            }
            NetworkRequest::LoadMatches => {
                debug!("loading matches");
                let matches = self.client.fetch_matches().await?;
                Ok(NetworkResponse::MatchesLoaded { matches })
            }
            NetworkRequest::LoadTeams => {
                debug!("loading teams");
                let teams = self.client.fetch_teams().await?;
                Ok(NetworkResponse::TeamsLoaded { teams })
            }
            NetworkRequest::LoadMatchAggregate { match_id } => {
                debug!("loading match details for {match_id}");
                let aggregate = self.client.fetch_match_aggregate(&match_id).await?;
                Ok(NetworkResponse::MatchAggregateLoaded { aggregate })
            }
            NetworkRequest::RegisterTeam { registration } => {
                debug!("registering team {} for {}", registration.team_name, registration.tournament_id);
                self.client.register_team(&registration).await?;
                Ok(NetworkResponse::TeamRegistered { tournament_id: registration.tournament_id })
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                if responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
