//! # hg_core - League Import & Grid Answer Engine
//!
//! This library turns a raw sports-league export (JSON, optionally
//! gzip-compressed) into a canonical statistical model and generates 3x3
//! grid trivia puzzles from it: each cell is the intersection of a row
//! criterion and a column criterion, answered by every player satisfying
//! both.
//!
//! ## Features
//! - Tolerant import of several loose export schemas into one closed model
//! - Catalog of pure eligibility predicates (teams, career totals, season
//!   rates, awards, draft facts)
//! - Grid construction with per-cell answer sets and validity checks
//! - Deterministic rarity ranking of answers (two strategies)
//! - Guess evaluation with rule-driven natural-language explanations
//!
//! All operations are pure, synchronous transformations over immutable
//! inputs; the crate performs no network or file I/O of its own.

pub mod api;
pub mod criteria;
pub mod decode;
pub mod error;
pub mod explain;
pub mod grid;
pub mod models;
pub mod normalize;
pub mod rarity;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export the import pipeline
pub use api::{generate_grid, import_league};
pub use decode::{decode, SizeLimits};
pub use error::{ImportError, Result};
pub use normalize::{export_document, normalize};

// Re-export the canonical model
pub use models::{Award, CareerTotals, DraftFacts, League, Player, SeasonLine, Team};

// Re-export grid construction and scoring
pub use criteria::{classify_label, AchievementId, CellSpec};
pub use grid::{build_grid, Grid, GridConfig, RandomTeams, SelectionStrategy, TeamsAndAchievements};
pub use rarity::{cell_key, ranked_ids, score, RarityCache, RarityResult, RarityStrategy};

// Re-export guess evaluation
pub use explain::{evaluate, explain, GuessOutcome};
