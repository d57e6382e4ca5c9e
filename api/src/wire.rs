/// AthleTrack API raw wire types: serde shapes for deserializing responses.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Tournaments  (GET /api/tournaments/)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TournamentsResponse {
    #[serde(default)]
    pub all_tournaments: Vec<RawTournament>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawTournament {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub event_name: Option<String>,
    pub organizer: Option<RawOrganizer>,
    pub location: Option<String>,
    pub start_date: Option<String>, // ISO 8601
    pub prize_pool: Option<RawPrizePool>,
    pub poster_image: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawOrganizer {
    pub name: Option<String>,
}

/// Amounts are entered through a form and stored as strings on most records,
/// but older records carry plain numbers.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawPrizePool {
    #[serde(default, deserialize_with = "amount")]
    pub first_prize: Option<String>,
    #[serde(default, deserialize_with = "amount")]
    pub second_prize: Option<String>,
    #[serde(default, deserialize_with = "amount")]
    pub third_prize: Option<String>,
    #[serde(default, deserialize_with = "amount")]
    pub mvp: Option<String>,
    #[serde(default, deserialize_with = "amount")]
    pub entry_fee: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Amount {
    Int(u64),
    Float(f64),
    Text(String),
}

fn amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Amount>::deserialize(deserializer)?;
    Ok(raw.map(|a| match a {
        Amount::Int(n) => n.to_string(),
        Amount::Float(f) => f.to_string(),
        Amount::Text(s) => s,
    }))
}

// ---------------------------------------------------------------------------
// Matches  (GET /api/match/matches/, GET /api/match/matches/{id}/)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawMatch {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    /// Owning tournament; either a bare id or a populated document.
    pub tournament: Option<RawRef>,
    pub team_1: Option<RawMatchTeam>,
    pub team_2: Option<RawMatchTeam>,
    #[serde(default)]
    pub player_stats: Vec<RawStatEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum RawRef {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl RawRef {
    pub fn id(&self) -> &str {
        match self {
            RawRef::Id(id) | RawRef::Doc { id } => id,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawMatchTeam {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub team_details: Option<RawTeamDetails>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawStatEntry {
    pub player_id: Option<String>,
    pub team_id: Option<String>,
    #[serde(default, deserialize_with = "stat_count")]
    pub points: u32,
    #[serde(default, deserialize_with = "stat_count")]
    pub assists: u32,
    #[serde(default, deserialize_with = "stat_count")]
    pub rebounds: u32,
}

/// Counts are typed in by hand on the admin side and arrive as numbers,
/// numeric strings, floats or null.
#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Int(u64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Null, negative or unreadable counts are zero. Oversized ones saturate.
fn stat_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Count>::deserialize(deserializer)?;
    let count = match raw {
        Some(Count::Int(n)) => u32::try_from(n).unwrap_or(u32::MAX),
        Some(Count::Float(f)) => float_count(f),
        Some(Count::Text(s)) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(float_count))
                .unwrap_or(0)
        }
        Some(Count::Other(_)) | None => 0,
    };
    Ok(count)
}

fn float_count(f: f64) -> u32 {
    if f.is_finite() && f >= 0.0 {
        // `as` saturates at u32::MAX
        f as u32
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// Players  (GET /api/player/getPlayerById/{id})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawPlayer {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Teams  (GET /api/team/teams, POST /api/team/teams)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawTeam {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub team_details: Option<RawTeamDetails>,
    pub coach: Option<RawCoach>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct RawTeamDetails {
    pub name: Option<String>,
    pub origin: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct RawCoach {
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct RegistrationRequest {
    pub tournament_id: String,
    pub team_details: RawTeamDetails,
    pub coach: RawCoach,
    pub players: Vec<RegistrationPlayer>,
}

#[derive(Debug, Serialize, Clone)]
pub struct RegistrationPlayer {
    pub name: String,
}
