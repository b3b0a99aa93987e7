//! Canonical league model.
//!
//! The closed shapes every downstream component operates on. A `League` is
//! immutable once normalization completes; nothing in this crate mutates
//! it afterwards.

mod league;
mod player;

pub use league::{League, Team};
pub use player::{Award, CareerTotals, DraftFacts, Player, SeasonLine};
