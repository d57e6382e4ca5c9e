//! Joins a match record with its per-player lookups into a display-ready view.

use crate::client::ApiResult;
use crate::{Match, MatchTeam, Player, Side, StatEntry};
use log::warn;

/// Display-ready join of a match, both teams and resolved player names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchAggregate {
    pub match_id: String,
    pub team_1: TeamScore,
    pub team_2: TeamScore,
    /// Lines for every player whose lookup succeeded, in stat-list order.
    pub player_stats: Vec<PlayerStatLine>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamScore {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub score: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStatLine {
    pub player_id: String,
    pub player_name: String,
    /// None when the stat entry's team id matches neither side.
    pub side: Option<Side>,
    /// Empty when `side` is None.
    pub team_name: String,
    pub points: u32,
    pub assists: u32,
    pub rebounds: u32,
}

impl MatchAggregate {
    /// Build the aggregate from a match and one lookup result per stat entry.
    ///
    /// `lookups` must be in the same order as `m.player_stats`. Failed lookups
    /// drop their line; score totals always come from the full stat list.
    pub fn assemble(m: &Match, lookups: Vec<ApiResult<Player>>) -> Self {
        let (score_1, score_2) = team_totals(m);

        let player_stats = m
            .player_stats
            .iter()
            .zip(lookups)
            .filter_map(|(entry, lookup)| match lookup {
                Ok(player) => Some(stat_line(m, entry, player)),
                Err(e) => {
                    warn!(
                        "dropping stat line for player {} in match {}: {e}",
                        entry.player_id.as_deref().unwrap_or("<none>"),
                        m.id
                    );
                    None
                }
            })
            .collect();

        Self {
            match_id: m.id.clone(),
            team_1: team_score(&m.team_1, score_1),
            team_2: team_score(&m.team_2, score_2),
            player_stats,
        }
    }

    pub fn players_for(&self, side: Side) -> impl Iterator<Item = &PlayerStatLine> {
        self.player_stats
            .iter()
            .filter(move |line| line.side == Some(side))
    }

    pub fn team(&self, side: Side) -> &TeamScore {
        match side {
            Side::First => &self.team_1,
            Side::Second => &self.team_2,
        }
    }
}

/// Sum of points per side, saturating. Entries matching neither team count
/// for neither.
pub fn team_totals(m: &Match) -> (u32, u32) {
    m.player_stats
        .iter()
        .fold((0u32, 0u32), |(first, second), entry| match m.side_of(&entry.team_id) {
            Some(Side::First) => (first.saturating_add(entry.points), second),
            Some(Side::Second) => (first, second.saturating_add(entry.points)),
            None => (first, second),
        })
}

fn stat_line(m: &Match, entry: &StatEntry, player: Player) -> PlayerStatLine {
    let side = m.side_of(&entry.team_id);
    PlayerStatLine {
        player_id: entry.player_id.clone().unwrap_or_default(),
        player_name: player.name,
        side,
        team_name: side.map(|s| m.team(s).name.clone()).unwrap_or_default(),
        points: entry.points,
        assists: entry.assists,
        rebounds: entry.rebounds,
    }
}

fn team_score(team: &MatchTeam, score: u32) -> TeamScore {
    TeamScore {
        id: team.id.clone(),
        name: team.name.clone(),
        logo: team.logo.clone(),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiError;

    fn entry(player: &str, team: &str, points: u32) -> StatEntry {
        StatEntry {
            player_id: Some(player.into()),
            team_id: team.into(),
            points,
            assists: 1,
            rebounds: 2,
        }
    }

    fn sample_match() -> Match {
        Match {
            id: "m1".into(),
            tournament_id: None,
            team_1: MatchTeam { id: "a".into(), name: "Lalitpur Lions".into(), logo: Some("lions.png".into()) },
            team_2: MatchTeam { id: "b".into(), name: "Pokhara Peaks".into(), logo: None },
            player_stats: vec![
                entry("a1", "a", 2),
                entry("a2", "a", 2),
                entry("a3", "a", 3),
                entry("b1", "b", 5),
            ],
        }
    }

    fn found(id: &str) -> ApiResult<Player> {
        Ok(Player { id: id.into(), name: format!("Player {id}") })
    }

    fn missing(id: &str) -> ApiResult<Player> {
        Err(ApiError::NotFound(format!("player {id}")))
    }

    #[test]
    fn totals_are_summed_per_team() {
        let m = sample_match();
        let agg = MatchAggregate::assemble(&m, vec![found("a1"), found("a2"), found("a3"), found("b1")]);
        assert_eq!(agg.team_1.score, 7);
        assert_eq!(agg.team_2.score, 5);
        assert_eq!(agg.team_1.name, "Lalitpur Lions");
        assert_eq!(agg.team_1.logo.as_deref(), Some("lions.png"));
        assert_eq!(agg.player_stats.len(), 4);
    }

    #[test]
    fn failed_lookups_drop_only_their_lines() {
        let m = sample_match();
        let agg = MatchAggregate::assemble(&m, vec![found("a1"), missing("a2"), found("a3"), missing("b1")]);
        assert_eq!(agg.player_stats.len(), 2);
        let ids: Vec<_> = agg.player_stats.iter().map(|l| l.player_id.as_str()).collect();
        assert_eq!(ids, ["a1", "a3"]);
        assert_eq!(agg.team_1.score, 7);
        assert_eq!(agg.team_2.score, 5);
    }

    #[test]
    fn all_lookups_failing_still_computes_totals() {
        let m = sample_match();
        let agg = MatchAggregate::assemble(&m, vec![missing("a1"), missing("a2"), missing("a3"), missing("b1")]);
        assert!(agg.player_stats.is_empty());
        assert_eq!((agg.team_1.score, agg.team_2.score), (7, 5));
    }

    #[test]
    fn lines_are_annotated_with_names_and_sides() {
        let m = sample_match();
        let agg = MatchAggregate::assemble(&m, vec![found("a1"), found("a2"), found("a3"), found("b1")]);
        let last = agg.player_stats.last().unwrap();
        assert_eq!(last.player_name, "Player b1");
        assert_eq!(last.team_name, "Pokhara Peaks");
        assert_eq!(last.side, Some(Side::Second));
        assert_eq!(agg.players_for(Side::First).count(), 3);
        assert_eq!(agg.players_for(Side::Second).count(), 1);
    }

    #[test]
    fn unknown_team_counts_for_neither_side() {
        let mut m = sample_match();
        m.player_stats.push(entry("x1", "zzz", 10));
        let agg = MatchAggregate::assemble(
            &m,
            vec![found("a1"), found("a2"), found("a3"), found("b1"), found("x1")],
        );
        assert_eq!((agg.team_1.score, agg.team_2.score), (7, 5));
        let stray = agg.player_stats.last().unwrap();
        assert_eq!(stray.side, None);
        assert!(stray.team_name.is_empty());
        assert_eq!(agg.player_stats.len(), 5);
    }

    #[test]
    fn entries_without_player_still_score() {
        let mut m = sample_match();
        m.player_stats.push(StatEntry { player_id: None, team_id: "b".into(), points: 4, ..Default::default() });
        let agg = MatchAggregate::assemble(
            &m,
            vec![
                found("a1"),
                found("a2"),
                found("a3"),
                found("b1"),
                Err(ApiError::MissingField("player_id", "match m1".into())),
            ],
        );
        assert_eq!((agg.team_1.score, agg.team_2.score), (7, 9));
        assert_eq!(agg.player_stats.len(), 4);
    }

    #[test]
    fn totals_saturate() {
        let mut m = sample_match();
        m.player_stats.push(entry("a4", "a", u32::MAX));
        assert_eq!(team_totals(&m), (u32::MAX, 5));
    }

    #[test]
    fn empty_stat_list_gives_zero_scores() {
        let mut m = sample_match();
        m.player_stats.clear();
        let agg = MatchAggregate::assemble(&m, vec![]);
        assert_eq!((agg.team_1.score, agg.team_2.score), (0, 0));
        assert!(agg.player_stats.is_empty());
    }
}
