use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One player-season-team statistical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonLine {
    pub season: i32,
    /// Absent when no team-id alias resolved in the source line; such lines
    /// still count toward career totals but never toward team membership.
    pub team_id: Option<u32>,
    pub games_played: u32,
    pub pts: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    pub threes_made: u32,
    pub total_rebounds: u32,
    pub fga: u32,
    pub fta: u32,
    pub tpa: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_shares: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ows: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dws: Option<f64>,
    pub playoffs: bool,
}

impl SeasonLine {
    /// Win shares for this line: the explicit aggregate when finite,
    /// otherwise offensive + defensive components (absent parts are zero).
    ///
    /// This is the single implementation of the fallback; both career
    /// aggregation and rarity scoring go through it.
    pub fn effective_win_shares(&self) -> f64 {
        match self.win_shares {
            Some(ws) if ws.is_finite() => ws,
            _ => self.ows.unwrap_or(0.0) + self.dws.unwrap_or(0.0),
        }
    }
}

/// A season-stamped award or selection. `kind` is an open string set, not
/// an enum, because league exports vary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub season: i32,
    pub kind: String,
}

/// Aggregate over a player's regular-season lines. Derived, never set
/// independently; recomputing from `seasons` must reproduce it exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerTotals {
    pub pts: u64,
    pub ast: u64,
    pub stl: u64,
    pub blk: u64,
    pub threes_made: u64,
    pub total_rebounds: u64,
    pub games_played: u64,
    pub win_shares: f64,
}

impl CareerTotals {
    /// Aggregate the regular-season lines of `seasons`; playoff lines never
    /// contribute.
    pub fn from_seasons(seasons: &[SeasonLine]) -> Self {
        let mut totals = CareerTotals::default();
        for line in seasons.iter().filter(|line| !line.playoffs) {
            totals.pts += u64::from(line.pts);
            totals.ast += u64::from(line.ast);
            totals.stl += u64::from(line.stl);
            totals.blk += u64::from(line.blk);
            totals.threes_made += u64::from(line.threes_made);
            totals.total_rebounds += u64::from(line.total_rebounds);
            totals.games_played += u64::from(line.games_played);
            totals.win_shares += line.effective_win_shares();
        }
        totals
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftFacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pick: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    /// Season lines in ascending season order, regular season and playoffs.
    pub seasons: Vec<SeasonLine>,
    pub awards: Vec<Award>,
    /// Teams the player actually played games for (plus explicit team
    /// history from the source document).
    pub teams_played_for: BTreeSet<u32>,
    pub career: CareerTotals,
    pub draft: DraftFacts,
    pub hall_of_fame: bool,
}

impl Player {
    pub fn played_for(&self, team_id: u32) -> bool {
        self.teams_played_for.contains(&team_id)
    }

    /// Best single-season regular-season per-game rate for a stat, over
    /// seasons with at least one game played. Zero-game seasons are never
    /// considered; a player with no usable seasons rates 0.
    pub fn best_season_rate(&self, stat: impl Fn(&SeasonLine) -> u32) -> f64 {
        self.seasons
            .iter()
            .filter(|line| !line.playoffs && line.games_played > 0)
            .map(|line| f64::from(stat(line)) / f64::from(line.games_played))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{player, season};

    #[test]
    fn test_career_totals_ignore_playoff_lines() {
        let mut playoff = season(2001, 0, 20, 500);
        playoff.playoffs = true;
        let p = player(1, "Test Player", vec![season(2000, 0, 82, 2000), playoff]);
        assert_eq!(p.career.pts, 2000);
        assert_eq!(p.career.games_played, 82);
    }

    #[test]
    fn test_career_totals_recompute_idempotent() {
        let p = player(
            1,
            "Test Player",
            vec![season(2000, 0, 82, 1800), season(2001, 1, 70, 1500)],
        );
        assert_eq!(CareerTotals::from_seasons(&p.seasons), p.career);
    }

    #[test]
    fn test_effective_win_shares_prefers_explicit_value() {
        let mut line = season(2000, 0, 82, 1000);
        line.win_shares = Some(7.5);
        line.ows = Some(1.0);
        line.dws = Some(1.0);
        assert_eq!(line.effective_win_shares(), 7.5);
    }

    #[test]
    fn test_effective_win_shares_falls_back_to_components() {
        let mut line = season(2000, 0, 82, 1000);
        line.win_shares = Some(f64::NAN);
        line.ows = Some(4.25);
        line.dws = None;
        assert_eq!(line.effective_win_shares(), 4.25);
    }

    #[test]
    fn test_best_season_rate_skips_zero_game_seasons() {
        let p = player(1, "Test Player", vec![season(2000, 0, 0, 0), season(2001, 0, 10, 320)]);
        assert_eq!(p.best_season_rate(|line| line.pts), 32.0);
    }
}
