//! Shared fixture builders for unit tests.

use crate::models::{CareerTotals, DraftFacts, League, Player, SeasonLine, Team};
use std::collections::BTreeSet;

pub(crate) fn season(season: i32, team_id: u32, games_played: u32, pts: u32) -> SeasonLine {
    SeasonLine {
        season,
        team_id: Some(team_id),
        games_played,
        pts,
        ast: 0,
        stl: 0,
        blk: 0,
        threes_made: 0,
        total_rebounds: 0,
        fga: 0,
        fta: 0,
        tpa: 0,
        win_shares: None,
        ows: None,
        dws: None,
        playoffs: false,
    }
}

/// Player with career totals and team membership derived from the lines,
/// the same way the normalizer derives them.
pub(crate) fn player(id: u32, name: &str, seasons: Vec<SeasonLine>) -> Player {
    let teams_played_for: BTreeSet<u32> = seasons
        .iter()
        .filter(|line| !line.playoffs && line.games_played > 0)
        .filter_map(|line| line.team_id)
        .collect();
    Player {
        id,
        name: name.to_owned(),
        birth_year: None,
        career: CareerTotals::from_seasons(&seasons),
        seasons,
        awards: Vec::new(),
        teams_played_for,
        draft: DraftFacts::default(),
        hall_of_fame: false,
    }
}

pub(crate) fn team(id: u32) -> Team {
    Team {
        id,
        display_name: format!("Team {}", id),
        abbreviation: format!("T{}", id),
    }
}

pub(crate) fn league(team_count: u32, players: Vec<Player>) -> League {
    let season_range = players
        .iter()
        .flat_map(|p| p.seasons.iter().map(|line| line.season))
        .fold(None, |range: Option<(i32, i32)>, s| match range {
            None => Some((s, s)),
            Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
        });
    League {
        teams: (0..team_count).map(team).collect(),
        players,
        season_range,
    }
}
