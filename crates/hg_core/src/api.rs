//! Convenience entry points over the import and generation pipeline.
//!
//! These are the operations external collaborators call: the fetch layer
//! hands `import_league` raw bytes plus an optional hint, persistence
//! feeds stored blobs through the same path, and presentation consumes
//! the returned `League`/`Grid` as plain structured data.

use crate::decode::{decode, SizeLimits};
use crate::error::Result;
use crate::grid::{build_grid, Grid, GridConfig, RandomTeams};
use crate::models::League;
use crate::normalize::normalize;

/// Decode raw export bytes and normalize them into a `League`.
pub fn import_league(bytes: &[u8], hint: Option<&str>, limits: &SizeLimits) -> Result<League> {
    let doc = decode(bytes, hint, limits)?;
    let league = normalize(&doc)?;
    log::info!(
        "imported league: {} teams, {} players",
        league.teams.len(),
        league.players.len()
    );
    Ok(league)
}

/// Generate a team-by-team grid with the default random selection.
pub fn generate_grid(league: &League, config: &GridConfig) -> Result<Grid> {
    build_grid(league, config, &RandomTeams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_import_league_end_to_end() {
        let doc = json!({
            "teams": [{ "tid": 0, "region": "Test", "name": "Team" }],
            "players": [{
                "name": "End ToEnd",
                "stats": [{ "season": 2020, "tid": 0, "gp": 62, "pts": 1400 }]
            }]
        });
        let bytes = serde_json::to_vec(&doc).unwrap();
        let league = import_league(&bytes, None, &SizeLimits::default()).unwrap();
        assert_eq!(league.teams[0].display_name, "Test Team");
        assert_eq!(league.players[0].career.pts, 1400);
        assert_eq!(league.season_range, Some((2020, 2020)));
    }

    #[test]
    fn test_generate_grid_from_imported_league() {
        use crate::testutil::{league, player, season};

        // 6 teams of 10 one-team players plus a journeyman on all of them,
        // so every cell of any team-by-team selection holds the journeyman.
        let mut players = Vec::new();
        let mut pid = 0;
        for team in 0..6u32 {
            for _ in 0..10 {
                players.push(player(pid, &format!("P{}", pid), vec![season(2000, team, 40, 400)]));
                pid += 1;
            }
        }
        let lines = (0..6).map(|team| season(2001 + team as i32, team, 20, 200)).collect();
        players.push(player(pid, "Journeyman", lines));
        let lg = league(6, players);

        let config = GridConfig { seed: Some(9), ..GridConfig::default() };
        let grid = generate_grid(&lg, &config).unwrap();
        assert!(grid.answers.iter().flatten().all(|cell| cell.contains(&pid)));
    }

    #[test]
    fn test_import_rejects_html() {
        let err = import_league(b"<html></html>", None, &SizeLimits::default()).unwrap_err();
        assert_eq!(err.kind(), "web_page");
    }
}
