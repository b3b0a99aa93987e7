//! Grid construction: pick six criteria, compute every cell's eligible
//! set, and reject layouts with an unsolvable cell.
//!
//! Generation is deterministic for a given seed: the same league, config,
//! and strategy always produce the same grid.

use crate::criteria::{AchievementId, CellSpec, CATALOG};
use crate::error::{ImportError, Result};
use crate::models::League;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Minimum players who ever satisfied a team's membership predicate
    /// for that team to be usable as a criterion.
    pub min_roster_size: usize,
    /// Minimum eligible players per cell for a layout to be accepted.
    pub min_cell_answers: usize,
    /// Fresh criterion selections to try before giving up on a league.
    pub max_attempts: u32,
    /// Fixed seed for reproducible grids; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { min_roster_size: 10, min_cell_answers: 1, max_attempts: 25, seed: None }
    }
}

/// A generated 3x3 puzzle. Every answer set is non-empty by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub id: String,
    pub rows: [CellSpec; 3],
    pub cols: [CellSpec; 3],
    /// `answers[row][col]` holds the ids of every player satisfying both
    /// axis criteria.
    pub answers: [[BTreeSet<u32>; 3]; 3],
}

impl Grid {
    pub fn cell(&self, row: usize, col: usize) -> &BTreeSet<u32> {
        &self.answers[row][col]
    }
}

/// Picks the six criteria for one attempt. Implementations must return
/// well-formed criteria; for team criteria the row and column team sets
/// must not overlap.
pub trait SelectionStrategy {
    fn select(
        &self,
        league: &League,
        usable_teams: &[u32],
        rng: &mut ChaCha8Rng,
    ) -> ([CellSpec; 3], [CellSpec; 3]);
}

/// Three random row teams and three disjoint random column teams.
pub struct RandomTeams;

impl SelectionStrategy for RandomTeams {
    fn select(
        &self,
        league: &League,
        usable_teams: &[u32],
        rng: &mut ChaCha8Rng,
    ) -> ([CellSpec; 3], [CellSpec; 3]) {
        let picks: Vec<u32> = usable_teams.choose_multiple(rng, 6).copied().collect();
        let spec = |id: u32| team_spec(league, id);
        (
            [spec(picks[0]), spec(picks[1]), spec(picks[2])],
            [spec(picks[3]), spec(picks[4]), spec(picks[5])],
        )
    }
}

/// Random teams on the rows, a random mix of one team and two catalog
/// achievements on the columns.
pub struct TeamsAndAchievements {
    /// Achievement pool to draw from; defaults to the full catalog.
    pub achievements: Vec<AchievementId>,
}

impl Default for TeamsAndAchievements {
    fn default() -> Self {
        Self { achievements: CATALOG.to_vec() }
    }
}

impl TeamsAndAchievements {
    /// Pool actually drawn from: an under-sized pool falls back so the
    /// two achievement slots can always be filled.
    fn pool(&self) -> Vec<AchievementId> {
        match self.achievements.len() {
            0 => CATALOG.to_vec(),
            1 => vec![self.achievements[0], self.achievements[0]],
            _ => self.achievements.clone(),
        }
    }
}

impl SelectionStrategy for TeamsAndAchievements {
    fn select(
        &self,
        league: &League,
        usable_teams: &[u32],
        rng: &mut ChaCha8Rng,
    ) -> ([CellSpec; 3], [CellSpec; 3]) {
        let picks: Vec<u32> = usable_teams.choose_multiple(rng, 4).copied().collect();
        let achievements: Vec<AchievementId> =
            self.pool().choose_multiple(rng, 2).copied().collect();
        let rows = [
            team_spec(league, picks[0]),
            team_spec(league, picks[1]),
            team_spec(league, picks[2]),
        ];
        let mut cols = [
            team_spec(league, picks[3]),
            CellSpec::achievement(achievements[0]),
            CellSpec::achievement(achievements[1]),
        ];
        cols.shuffle(rng);
        (rows, cols)
    }
}

fn team_spec(league: &League, team_id: u32) -> CellSpec {
    let team_name = league
        .team(team_id)
        .map_or_else(|| format!("Team {}", team_id), |team| team.display_name.clone());
    CellSpec::Team { team_id, team_name }
}

/// Build a grid, retrying with fresh criterion selections until every
/// cell has at least one answer or the attempt budget runs out.
///
/// Fails with `InsufficientData` when fewer than 6 teams meet the
/// minimum-roster threshold or no attempt produced a solvable grid; the
/// caller may retry with a different config, this is expected control
/// flow rather than a fatal condition.
pub fn build_grid(
    league: &League,
    config: &GridConfig,
    strategy: &dyn SelectionStrategy,
) -> Result<Grid> {
    let usable_teams: Vec<u32> = league
        .teams
        .iter()
        .map(|team| team.id)
        .filter(|&id| league.roster_size(id) >= config.min_roster_size)
        .collect();
    if usable_teams.len() < 6 {
        return Err(ImportError::InsufficientData(format!(
            "only {} teams have a roster of {}+ players (need 6)",
            usable_teams.len(),
            config.min_roster_size
        )));
    }

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for attempt in 0..config.max_attempts {
        let (rows, cols) = strategy.select(league, &usable_teams, &mut rng);
        match answer_matrix(league, &rows, &cols, config.min_cell_answers.max(1)) {
            Some(answers) => {
                log::debug!("grid built on attempt {} (seed {:#x})", attempt + 1, seed);
                return Ok(Grid { id: format!("{:016x}-{}", seed, attempt), rows, cols, answers });
            }
            None => log::debug!("attempt {} rejected: cell below answer minimum", attempt + 1),
        }
    }

    Err(ImportError::InsufficientData(format!(
        "no solvable grid found in {} attempts",
        config.max_attempts
    )))
}

/// Eligible sets for all nine cells, or `None` if any cell falls below
/// the answer minimum.
fn answer_matrix(
    league: &League,
    rows: &[CellSpec; 3],
    cols: &[CellSpec; 3],
    min_cell_answers: usize,
) -> Option<[[BTreeSet<u32>; 3]; 3]> {
    let mut answers: [[BTreeSet<u32>; 3]; 3] = Default::default();
    for (r, row_spec) in rows.iter().enumerate() {
        for (c, col_spec) in cols.iter().enumerate() {
            let eligible: BTreeSet<u32> = league
                .players
                .iter()
                .filter(|player| row_spec.matches(player) && col_spec.matches(player))
                .map(|player| player.id)
                .collect();
            if eligible.len() < min_cell_answers {
                return None;
            }
            answers[r][c] = eligible;
        }
    }
    Some(answers)
}
