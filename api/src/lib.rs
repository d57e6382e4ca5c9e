pub mod aggregate;
pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use aggregate::{MatchAggregate, PlayerStatLine, TeamScore};

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the API wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    /// Marketing name shown on event cards; falls back to `name`.
    pub event_name: Option<String>,
    pub organizer: String,
    pub location: String,
    pub start_date: Option<DateTime<Utc>>,
    pub prize_pool: PrizePool,
    pub poster_image: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
}

impl Tournament {
    pub fn display_name(&self) -> &str {
        self.event_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.name)
    }

    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("Tournament")
    }

    /// Last segment of the stored poster path. Uploads are recorded with
    /// Windows separators on the server, so both `\` and `/` split.
    pub fn poster_file(&self) -> Option<&str> {
        self.poster_image
            .as_deref()
            .and_then(|p| p.rsplit(['\\', '/']).next())
            .filter(|f| !f.is_empty())
    }

    /// `YYYY-MM-DD` part of the start date, as shown on event cards.
    pub fn start_day(&self) -> String {
        self.start_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "TBA".to_string())
    }
}

/// Prize money in whole currency units (NPR).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizePool {
    pub first: u64,
    pub second: u64,
    pub third: u64,
    pub mvp: u64,
    pub entry_fee: u64,
}

impl PrizePool {
    /// Everything paid out. The entry fee is income, not prize money.
    pub fn total(&self) -> u64 {
        self.first
            .saturating_add(self.second)
            .saturating_add(self.third)
            .saturating_add(self.mvp)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Match {
    pub id: String,
    pub tournament_id: Option<String>,
    pub team_1: MatchTeam,
    pub team_2: MatchTeam,
    pub player_stats: Vec<StatEntry>,
}

impl Match {
    /// Which side of the match a team id belongs to, if either.
    pub fn side_of(&self, team_id: &str) -> Option<Side> {
        if team_id == self.team_1.id {
            Some(Side::First)
        } else if team_id == self.team_2.id {
            Some(Side::Second)
        } else {
            None
        }
    }

    pub fn team(&self, side: Side) -> &MatchTeam {
        match side {
            Side::First => &self.team_1,
            Side::Second => &self.team_2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

/// Team summary embedded in a match record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchTeam {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
}

/// One player's line within a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatEntry {
    /// None when the record has no usable player reference. The line can't
    /// be resolved to a name but its points still count.
    pub player_id: Option<String>,
    pub team_id: String,
    pub points: u32,
    pub assists: u32,
    pub rebounds: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub logo: Option<String>,
    pub coach: Coach,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coach {
    pub name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
}

/// Payload for registering a team into a tournament.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamRegistration {
    pub tournament_id: String,
    pub team_name: String,
    pub origin: String,
    pub coach_name: String,
    pub coach_phone: String,
    pub players: Vec<String>,
}
