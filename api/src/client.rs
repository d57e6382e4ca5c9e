use crate::aggregate::MatchAggregate;
use crate::wire::{
    RawCoach, RawMatch, RawMatchTeam, RawPlayer, RawPrizePool, RawTeam, RawTeamDetails,
    RawTournament, RegistrationPlayer, RegistrationRequest, TournamentsResponse,
};
use crate::{
    Coach, Match, MatchTeam, Player, PrizePool, StatEntry, Team, TeamRegistration, Tournament,
};
use chrono::{DateTime, NaiveDate, Utc};
use futures_util::future::join_all;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "https://athle-track-backend-ecru.vercel.app";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// AthleTrack API client.
#[derive(Debug, Clone)]
pub struct AthleTrackApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for AthleTrackApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    MissingField(&'static str, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::MissingField(field, context) => {
                write!(f, "Missing field `{field}` in {context}")
            }
            ApiError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}

impl AthleTrackApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("athletrack/0.1 (terminal tournament viewer)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public URL of a tournament's poster, if it has one.
    pub fn poster_url(&self, tournament: &Tournament) -> Option<String> {
        tournament
            .poster_file()
            .map(|file| format!("{}/public/{file}", self.base_url))
    }

    /// Public URL for a stored upload such as a team logo. Absolute URLs
    /// pass through; server paths resolve under `/public/` like posters.
    pub fn asset_url(&self, stored: &str) -> Option<String> {
        let stored = stored.trim();
        if stored.starts_with("http://") || stored.starts_with("https://") {
            return Some(stored.to_owned());
        }
        stored
            .rsplit(['\\', '/'])
            .next()
            .filter(|file| !file.is_empty())
            .map(|file| format!("{}/public/{file}", self.base_url))
    }

    /// Every tournament, in the order the API lists them.
    pub async fn fetch_tournaments(&self) -> ApiResult<Vec<Tournament>> {
        let url = format!("{}/api/tournaments/", self.base_url);
        let raw: TournamentsResponse = self.get(&url).await?;
        Ok(raw.all_tournaments.into_iter().map(map_tournament).collect())
    }

    pub async fn fetch_match(&self, match_id: &str) -> ApiResult<Match> {
        let url = format!("{}/api/match/matches/{match_id}/", self.base_url);
        let raw: RawMatch = self.get(&url).await?;
        map_match(raw, &url)
    }

    /// All matches. Records that cannot be mapped are skipped.
    pub async fn fetch_matches(&self) -> ApiResult<Vec<Match>> {
        let url = format!("{}/api/match/matches/", self.base_url);
        let raw: Vec<RawMatch> = self.get(&url).await?;
        Ok(raw
            .into_iter()
            .filter_map(|m| match map_match(m, &url) {
                Ok(m) => Some(m),
                Err(e) => {
                    debug!("skipping match record: {e}");
                    None
                }
            })
            .collect())
    }

    pub async fn fetch_player(&self, player_id: &str) -> ApiResult<Player> {
        let url = format!("{}/api/player/getPlayerById/{player_id}", self.base_url);
        let raw: RawPlayer = self.get(&url).await?;
        map_player(raw, player_id, &url)
    }

    pub async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        let url = format!("{}/api/team/teams", self.base_url);
        let raw: Vec<RawTeam> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_team).collect())
    }

    /// Fetch a match, then every referenced player concurrently, and join them.
    ///
    /// Only the match fetch can fail the aggregation; player lookups that
    /// fail just drop their line.
    pub async fn fetch_match_aggregate(&self, match_id: &str) -> ApiResult<MatchAggregate> {
        let m = self.fetch_match(match_id).await?;
        debug!(
            "match {match_id}: resolving {} player stat lines",
            m.player_stats.len()
        );
        let lookups = join_all(m.player_stats.iter().map(|entry| async move {
            match entry.player_id.as_deref() {
                Some(player_id) => self.fetch_player(player_id).await,
                None => Err(ApiError::MissingField("player_id", format!("match {match_id}"))),
            }
        }))
        .await;
        Ok(MatchAggregate::assemble(&m, lookups))
    }

    pub async fn register_team(&self, registration: &TeamRegistration) -> ApiResult<()> {
        let url = format!("{}/api/team/teams", self.base_url);
        let body = registration_request(registration);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;
        response
            .error_for_status()
            .map(|_| ())
            .map_err(|e| ApiError::Api(e, url))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_owned()));
        }

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_tournament(raw: RawTournament) -> Tournament {
    Tournament {
        id: raw.id.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        event_name: raw.event_name,
        organizer: raw.organizer.and_then(|o| o.name).unwrap_or_default(),
        location: raw.location.unwrap_or_default(),
        start_date: raw.start_date.as_deref().and_then(parse_start_date),
        prize_pool: raw.prize_pool.map(map_prize_pool).unwrap_or_default(),
        poster_image: raw.poster_image.filter(|p| !p.trim().is_empty()),
        category: raw.category,
        featured: raw.featured.unwrap_or(false),
    }
}

fn map_prize_pool(raw: RawPrizePool) -> PrizePool {
    PrizePool {
        first: parse_amount(raw.first_prize.as_deref()),
        second: parse_amount(raw.second_prize.as_deref()),
        third: parse_amount(raw.third_prize.as_deref()),
        mvp: parse_amount(raw.mvp.as_deref()),
        entry_fee: parse_amount(raw.entry_fee.as_deref()),
    }
}

/// Blank, malformed or out-of-range amounts count as zero. Fractions are
/// truncated.
fn parse_amount(raw: Option<&str>) -> u64 {
    let Some(s) = raw.map(|s| s.trim().replace(',', "")) else {
        return 0;
    };
    s.parse::<u64>()
        .ok()
        .or_else(|| {
            s.parse::<f64>()
                .ok()
                // 2^64 is the first float past u64::MAX
                .filter(|f| f.is_finite() && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        })
        .unwrap_or(0)
}

/// Accepts full RFC 3339 timestamps and bare `YYYY-MM-DD` dates.
fn parse_start_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc())
        })
}

fn map_match(raw: RawMatch, url: &str) -> ApiResult<Match> {
    let id = raw
        .id
        .ok_or_else(|| ApiError::MissingField("_id", url.to_owned()))?;
    let team_1 = map_match_team(raw.team_1, "team_1", url)?;
    let team_2 = map_match_team(raw.team_2, "team_2", url)?;

    let player_stats = raw
        .player_stats
        .into_iter()
        .map(|s| StatEntry {
            player_id: s.player_id.filter(|id| !id.trim().is_empty()),
            team_id: s.team_id.unwrap_or_default(),
            points: s.points,
            assists: s.assists,
            rebounds: s.rebounds,
        })
        .collect();

    Ok(Match {
        id,
        tournament_id: raw.tournament.map(|t| t.id().to_owned()),
        team_1,
        team_2,
        player_stats,
    })
}

fn map_match_team(raw: Option<RawMatchTeam>, field: &'static str, url: &str) -> ApiResult<MatchTeam> {
    let raw = raw.ok_or_else(|| ApiError::MissingField(field, url.to_owned()))?;
    let id = raw
        .id
        .ok_or_else(|| ApiError::MissingField(field, url.to_owned()))?;
    let details = raw.team_details.unwrap_or_default();
    Ok(MatchTeam {
        id,
        name: details.name.unwrap_or_else(|| "Unknown team".into()),
        logo: details.logo.filter(|l| !l.trim().is_empty()),
    })
}

fn map_player(raw: RawPlayer, requested_id: &str, url: &str) -> ApiResult<Player> {
    let name = raw
        .name
        .ok_or_else(|| ApiError::MissingField("name", url.to_owned()))?;
    Ok(Player {
        id: raw.id.unwrap_or_else(|| requested_id.to_owned()),
        name,
    })
}

fn map_team(raw: RawTeam) -> Team {
    let details = raw.team_details.unwrap_or_default();
    let coach = raw.coach.unwrap_or_default();
    Team {
        id: raw.id.unwrap_or_default(),
        name: details.name.unwrap_or_default(),
        origin: details.origin.unwrap_or_default(),
        logo: details.logo,
        coach: Coach {
            name: coach.name.unwrap_or_default(),
            phone_number: coach.phone_number.unwrap_or_default(),
        },
    }
}

fn registration_request(r: &TeamRegistration) -> RegistrationRequest {
    RegistrationRequest {
        tournament_id: r.tournament_id.clone(),
        team_details: RawTeamDetails {
            name: Some(r.team_name.clone()),
            origin: Some(r.origin.clone()),
            logo: None,
        },
        coach: RawCoach {
            name: Some(r.coach_name.clone()),
            phone_number: Some(r.coach_phone.clone()),
        },
        players: r
            .players
            .iter()
            .map(|name| RegistrationPlayer { name: name.clone() })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn amounts_accept_strings_numbers_and_blanks() {
        assert_eq!(parse_amount(Some("50000")), 50_000);
        assert_eq!(parse_amount(Some(" 25,000 ")), 25_000);
        assert_eq!(parse_amount(Some("1500.75")), 1_500);
        assert_eq!(parse_amount(Some("")), 0);
        assert_eq!(parse_amount(Some("free")), 0);
        assert_eq!(parse_amount(Some("-20")), 0);
        assert_eq!(parse_amount(None), 0);
    }

    #[test]
    fn amounts_past_u64_range_count_as_zero() {
        assert_eq!(parse_amount(Some("1e30")), 0);
        assert_eq!(parse_amount(Some("18446744073709551616")), 0);
        assert_eq!(parse_amount(Some("18446744073709551615")), u64::MAX);
        assert_eq!(parse_amount(Some("inf")), 0);
        assert_eq!(parse_amount(Some("NaN")), 0);
    }

    #[test]
    fn huge_prize_strings_do_not_overflow_the_total() {
        let raw: RawPrizePool =
            serde_json::from_str(r#"{ "firstPrize": "1e30", "secondPrize": "1", "mvp": 1e300 }"#).unwrap();
        let pool = map_prize_pool(raw);
        assert_eq!((pool.first, pool.second, pool.mvp), (0, 1, 0));
        assert_eq!(pool.total(), 1);

        let pool = PrizePool { first: u64::MAX, second: 1, ..Default::default() };
        assert_eq!(pool.total(), u64::MAX);
    }

    #[test]
    fn asset_urls_resolve_stored_paths_and_keep_absolute_ones() {
        let api = AthleTrackApi::new("https://example.test", DEFAULT_TIMEOUT);
        assert_eq!(
            api.asset_url("public\\logos\\lions.png").as_deref(),
            Some("https://example.test/public/lions.png")
        );
        assert_eq!(
            api.asset_url("https://cdn.example.test/peaks.png").as_deref(),
            Some("https://cdn.example.test/peaks.png")
        );
        assert_eq!(api.asset_url("  "), None);
    }

    #[test]
    fn start_date_parses_timestamps_and_plain_dates() {
        let dt = parse_start_date("2025-04-12T09:30:00.000Z").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2025, 4, 12, 9));
        let d = parse_start_date("2025-05-01").unwrap();
        assert_eq!((d.month(), d.day(), d.hour()), (5, 1, 0));
        assert!(parse_start_date("soon").is_none());
    }

    #[test]
    fn tournament_maps_from_wire_json() {
        let json = r#"{
            "allTournaments": [{
                "_id": "t1",
                "name": "Kathmandu Hoops Open",
                "organizer": { "name": "KHA" },
                "location": "Kathmandu",
                "startDate": "2025-04-12T00:00:00.000Z",
                "prizePool": { "firstPrize": "50000", "secondPrize": 25000, "thirdPrize": "10000", "mvp": "5000", "entryFee": "3000" },
                "posterImage": "public\\posters\\khopen.png",
                "featured": true
            }]
        }"#;
        let raw: TournamentsResponse = serde_json::from_str(json).unwrap();
        let t = map_tournament(raw.all_tournaments.into_iter().next().unwrap());
        assert_eq!(t.id, "t1");
        assert_eq!(t.organizer, "KHA");
        assert_eq!(t.prize_pool.total(), 90_000);
        assert_eq!(t.prize_pool.entry_fee, 3_000);
        assert_eq!(t.start_day(), "2025-04-12");
        assert!(t.featured);

        let api = AthleTrackApi::new("https://example.test/", DEFAULT_TIMEOUT);
        assert_eq!(
            api.poster_url(&t).as_deref(),
            Some("https://example.test/public/khopen.png")
        );
    }

    #[test]
    fn tournament_with_missing_sections_maps_to_defaults() {
        let raw: RawTournament = serde_json::from_str(r#"{ "_id": "t2", "name": "Bare" }"#).unwrap();
        let t = map_tournament(raw);
        assert_eq!(t.prize_pool, PrizePool::default());
        assert_eq!(t.start_day(), "TBA");
        assert!(t.poster_image.is_none());
    }

    #[test]
    fn match_maps_teams_and_stats() {
        let json = r#"{
            "_id": "m1",
            "tournament": { "_id": "t1", "name": "Kathmandu Hoops Open" },
            "team_1": { "_id": "a", "team_details": { "name": "Lions", "logo": "lions.png" } },
            "team_2": { "_id": "b", "team_details": { "name": "Peaks" } },
            "player_stats": [
                { "player_id": "p1", "team_id": "a", "points": 12, "assists": 3, "rebounds": 4 },
                { "player_id": "p2", "team_id": "b", "points": 8 },
                { "team_id": "b", "points": 99 }
            ]
        }"#;
        let raw: RawMatch = serde_json::from_str(json).unwrap();
        let m = map_match(raw, "test").unwrap();
        assert_eq!(m.tournament_id.as_deref(), Some("t1"));
        assert_eq!(m.team_1.name, "Lions");
        assert_eq!(m.team_2.logo, None);
        assert_eq!(m.player_stats.len(), 3, "entries without a player id still carry points");
        assert_eq!(m.player_stats[1].assists, 0);
        assert_eq!(m.player_stats[2].player_id, None);
        assert_eq!(m.player_stats[2].points, 99);
    }

    #[test]
    fn match_tournament_reference_may_be_a_bare_id() {
        let json = r#"{
            "_id": "m2", "tournament": "t9",
            "team_1": { "_id": "a" }, "team_2": { "_id": "b" }
        }"#;
        let raw: RawMatch = serde_json::from_str(json).unwrap();
        let m = map_match(raw, "test").unwrap();
        assert_eq!(m.tournament_id.as_deref(), Some("t9"));
        assert!(m.player_stats.is_empty());
    }

    #[test]
    fn match_without_team_is_a_missing_field() {
        let raw: RawMatch = serde_json::from_str(r#"{ "_id": "m3", "team_1": { "_id": "a" } }"#).unwrap();
        let err = map_match(raw, "test").unwrap_err();
        assert!(matches!(err, ApiError::MissingField("team_2", _)));
    }

    #[test]
    fn player_without_name_is_a_missing_field() {
        let raw = RawPlayer { id: Some("p1".into()), name: None };
        assert!(matches!(
            map_player(raw, "p1", "test"),
            Err(ApiError::MissingField("name", _))
        ));
        let raw = RawPlayer { id: None, name: Some("Sita".into()) };
        assert_eq!(map_player(raw, "p7", "test").unwrap().id, "p7");
    }

    #[test]
    fn team_maps_coach_details() {
        let json = r#"{
            "_id": "tm1",
            "team_details": { "name": "Lions", "origin": "Lalitpur" },
            "coach": { "name": "Ram", "phone_number": "9800000000" }
        }"#;
        let t = map_team(serde_json::from_str(json).unwrap());
        assert_eq!(t.origin, "Lalitpur");
        assert_eq!(t.coach.phone_number, "9800000000");
    }

    #[test]
    fn registration_request_uses_team_document_shape() {
        let reg = TeamRegistration {
            tournament_id: "t1".into(),
            team_name: "Lions".into(),
            origin: "Lalitpur".into(),
            coach_name: "Ram".into(),
            coach_phone: "9800000000".into(),
            players: vec!["Sita".into(), "Hari".into()],
        };
        let value = serde_json::to_value(registration_request(&reg)).unwrap();
        assert_eq!(value["team_details"]["name"], "Lions");
        assert_eq!(value["coach"]["phone_number"], "9800000000");
        assert_eq!(value["players"][1]["name"], "Hari");
        assert_eq!(value["tournament_id"], "t1");
    }
}
