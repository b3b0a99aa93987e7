//! Rarity scoring: rank a cell's eligible players by how surprising each
//! one is as an answer.
//!
//! Both strategies share one implementation of the ordering and scoring
//! rules so their degenerate-case and tie-break behavior cannot drift
//! apart: rank 1 is always the rarest answer and always scores 100 (when
//! N >= 2), ties always break by ascending player id, and a set of exactly
//! one player scores the neutral midpoint 50.

use crate::models::Player;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RarityStrategy {
    /// Rarity by familiarity: fewest career regular-season games played
    /// ranks rarest.
    CountPercentile,
    /// Rarity by performance: fewest career win shares (with the
    /// offensive+defensive fallback) ranks rarest.
    WinShares,
}

/// Rank and score of one eligible player within one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityResult {
    pub player_id: u32,
    /// 1 = rarest.
    pub rank: u32,
    /// 0..=100; 100 = rarest, 0 = commonest (50 for a singleton set).
    pub score: u8,
}

fn sort_key(strategy: RarityStrategy, player: &Player) -> f64 {
    match strategy {
        RarityStrategy::CountPercentile => player.career.games_played as f64,
        RarityStrategy::WinShares => player.career.win_shares,
    }
}

/// Score every player of a cell's eligible set.
///
/// Pure function of the set: input order never affects the result, and
/// recomputation over an unchanged set is bit-identical (downstream caches
/// rely on this).
pub fn score(strategy: RarityStrategy, eligible: &[&Player]) -> HashMap<u32, RarityResult> {
    let mut ordered: Vec<(f64, u32)> = eligible
        .iter()
        .map(|player| (sort_key(strategy, player), player.id))
        .collect();
    ordered.sort_by(|a, b| {
        a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal).then(a.1.cmp(&b.1))
    });

    let n = ordered.len();
    ordered
        .into_iter()
        .enumerate()
        .map(|(index, (_, player_id))| {
            let score = match n {
                1 => 50,
                _ => (100.0 * (1.0 - index as f64 / (n - 1) as f64)).round() as u8,
            };
            (player_id, RarityResult { player_id, rank: index as u32 + 1, score })
        })
        .collect()
}

/// Player ids of an eligible set ordered rarest first; the stable default
/// for bounded answer previews.
pub fn ranked_ids(strategy: RarityStrategy, eligible: &[&Player]) -> Vec<u32> {
    let results = score(strategy, eligible);
    let mut ids: Vec<u32> = results.keys().copied().collect();
    ids.sort_by_key(|id| results[id].rank);
    ids
}

/// Cache key for one cell of one grid.
pub fn cell_key(grid_id: &str, row: usize, col: usize) -> String {
    format!("{}:{}:{}", grid_id, row, col)
}

/// Rarity results cached per cell identifier.
///
/// Injected by the caller rather than held as ambient state. Entries must
/// be invalidated whenever the eligible set behind a key can change (grid
/// regeneration); recomputing and overwriting with an identical result is
/// always safe.
#[derive(Debug, Default)]
pub struct RarityCache {
    entries: HashMap<String, HashMap<u32, RarityResult>>,
}

impl RarityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        key: &str,
        strategy: RarityStrategy,
        eligible: &[&Player],
    ) -> &HashMap<u32, RarityResult> {
        self.entries
            .entry(key.to_owned())
            .or_insert_with(|| score(strategy, eligible))
    }

    pub fn get(&self, key: &str) -> Option<&HashMap<u32, RarityResult>> {
        self.entries.get(key)
    }

    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every cached cell belonging to a grid.
    pub fn invalidate_grid(&mut self, grid_id: &str) {
        let prefix = format!("{}:", grid_id);
        self.entries.retain(|key, _| !key.starts_with(&prefix));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Player;
    use crate::testutil::{player, season};
    use proptest::prelude::*;

    fn with_games(id: u32, games: u32) -> Player {
        player(id, &format!("P{}", id), vec![season(2000, 0, games, games * 10)])
    }

    fn with_win_shares(id: u32, ws: f64) -> Player {
        let mut line = season(2000, 0, 50, 500);
        line.win_shares = Some(ws);
        player(id, &format!("P{}", id), vec![line])
    }

    #[test]
    fn test_empty_set_yields_empty_mapping() {
        assert!(score(RarityStrategy::CountPercentile, &[]).is_empty());
    }

    #[test]
    fn test_singleton_scores_neutral_midpoint() {
        let p = with_games(1, 100);
        let results = score(RarityStrategy::CountPercentile, &[&p]);
        assert_eq!(results[&1], RarityResult { player_id: 1, rank: 1, score: 50 });
    }

    #[test]
    fn test_extremes_score_100_and_0() {
        let players: Vec<Player> = (0..5).map(|i| with_games(i, (i + 1) * 100)).collect();
        let refs: Vec<&Player> = players.iter().collect();
        let results = score(RarityStrategy::CountPercentile, &refs);
        // Fewest games = rarest
        assert_eq!(results[&0].rank, 1);
        assert_eq!(results[&0].score, 100);
        assert_eq!(results[&4].rank, 5);
        assert_eq!(results[&4].score, 0);
        assert_eq!(results[&2].score, 50);
    }

    #[test]
    fn test_win_share_strategy_ranks_fewest_shares_rarest() {
        let a = with_win_shares(1, 120.0);
        let b = with_win_shares(2, 3.5);
        let c = with_win_shares(3, 45.0);
        let results = score(RarityStrategy::WinShares, &[&a, &b, &c]);
        assert_eq!(results[&2].rank, 1);
        assert_eq!(results[&2].score, 100);
        assert_eq!(results[&1].rank, 3);
        assert_eq!(results[&1].score, 0);
    }

    #[test]
    fn test_win_share_ties_break_by_ascending_id() {
        let a = with_win_shares(9, 10.0);
        let b = with_win_shares(4, 10.0);
        let c = with_win_shares(7, 10.0);
        let results = score(RarityStrategy::WinShares, &[&a, &b, &c]);
        assert_eq!(results[&4].rank, 1);
        assert_eq!(results[&7].rank, 2);
        assert_eq!(results[&9].rank, 3);
    }

    #[test]
    fn test_win_share_fallback_matches_career_aggregation() {
        let mut line = season(2000, 0, 50, 500);
        line.ows = Some(2.0);
        line.dws = Some(1.5);
        let p = player(1, "Fallback", vec![line]);
        assert_eq!(p.career.win_shares, 3.5);
    }

    #[test]
    fn test_ranked_ids_rarest_first() {
        let players: Vec<Player> = (0..4).map(|i| with_games(i, (4 - i) * 10)).collect();
        let refs: Vec<&Player> = players.iter().collect();
        // Player 3 has the fewest games
        assert_eq!(ranked_ids(RarityStrategy::CountPercentile, &refs), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_cache_get_or_compute_and_invalidate() {
        let players: Vec<Player> = (0..3).map(|i| with_games(i, (i + 1) * 10)).collect();
        let refs: Vec<&Player> = players.iter().collect();
        let mut cache = RarityCache::new();
        let key = cell_key("grid-a", 0, 1);

        let first = cache.get_or_compute(&key, RarityStrategy::CountPercentile, &refs).clone();
        assert_eq!(first.len(), 3);
        assert_eq!(cache.get(&key), Some(&first));

        cache.get_or_compute(&cell_key("grid-a", 2, 2), RarityStrategy::CountPercentile, &refs);
        cache.get_or_compute(&cell_key("grid-b", 0, 0), RarityStrategy::CountPercentile, &refs);
        assert_eq!(cache.len(), 3);

        cache.invalidate_grid("grid-a");
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key).is_none());
        assert!(cache.get(&cell_key("grid-b", 0, 0)).is_some());
    }

    proptest! {
        /// Scores are a permutation-invariant function of the set, ranks
        /// are a permutation of 1..=N, and the extremes hit 100 and 0.
        #[test]
        fn prop_scoring_is_order_independent(
            games in proptest::collection::vec(0u32..3000, 2..40),
            shuffle_seed in any::<u64>(),
        ) {
            let players: Vec<Player> = games
                .iter()
                .enumerate()
                .map(|(i, &g)| with_games(i as u32, g))
                .collect();
            let refs: Vec<&Player> = players.iter().collect();

            let mut shuffled = refs.clone();
            // Cheap deterministic shuffle
            let n = shuffled.len();
            for i in 0..n {
                let j = (shuffle_seed as usize).wrapping_mul(i + 1) % n;
                shuffled.swap(i, j);
            }

            for strategy in [RarityStrategy::CountPercentile, RarityStrategy::WinShares] {
                let a = score(strategy, &refs);
                let b = score(strategy, &shuffled);
                prop_assert_eq!(&a, &b);

                let mut ranks: Vec<u32> = a.values().map(|r| r.rank).collect();
                ranks.sort_unstable();
                let expected: Vec<u32> = (1..=n as u32).collect();
                prop_assert_eq!(ranks, expected);

                prop_assert!(a.values().any(|r| r.rank == 1 && r.score == 100));
                prop_assert!(a.values().any(|r| r.rank == n as u32 && r.score == 0));
            }
        }
    }
}
