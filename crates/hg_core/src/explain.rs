//! Guess evaluation and natural-language explanations for misses.
//!
//! Explanations are HTML fragments: each sub-clause is wrapped in a span
//! marking whether that half of the guess was right, so the presentation
//! layer can color them independently.

use crate::criteria::{AchievementId, CellSpec};
use crate::models::Player;
use serde::{Deserialize, Serialize};

/// Pass/fail of one guess against both axes of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub row_pass: bool,
    pub col_pass: bool,
    pub correct: bool,
}

/// Evaluate a guessed player against a cell's row and column criteria.
pub fn evaluate(player: &Player, row: &CellSpec, col: &CellSpec) -> GuessOutcome {
    let row_pass = row.matches(player);
    let col_pass = col.matches(player);
    GuessOutcome { row_pass, col_pass, correct: row_pass && col_pass }
}

/// Render an explanation for an incorrect guess; `None` when the guess
/// was correct.
///
/// Clauses with different pass/fail status join with "but", same status
/// with "and". A contradiction (both axes passing on an outcome flagged
/// incorrect) cannot occur under a consistent grid but still renders
/// informatively.
pub fn explain(
    player: &Player,
    row: &CellSpec,
    col: &CellSpec,
    outcome: GuessOutcome,
) -> Option<String> {
    if outcome.correct {
        return None;
    }
    let row_clause = clause(row, outcome.row_pass);
    let col_clause = clause(col, outcome.col_pass);
    let join = if outcome.row_pass == outcome.col_pass { "and" } else { "but" };
    Some(format!(
        "{} {} {} {}.",
        player.name,
        wrap(&row_clause, outcome.row_pass),
        join,
        wrap(&col_clause, outcome.col_pass)
    ))
}

fn clause(spec: &CellSpec, pass: bool) -> String {
    match spec {
        CellSpec::Team { team_name, .. } => {
            if pass {
                format!("played for the {}", team_name)
            } else {
                format!("never played for the {}", team_name)
            }
        }
        CellSpec::Achievement { id, .. } => achievement_phrase(*id, pass).to_owned(),
    }
}

fn wrap(clause: &str, pass: bool) -> String {
    let marker = if pass { "clause-pass" } else { "clause-fail" };
    format!("<span class=\"{}\">{}</span>", marker, clause)
}

/// Positive/negative phrase for each achievement. Unknown identifiers fall
/// back to a generic phrase rather than failing.
fn achievement_phrase(id: AchievementId, pass: bool) -> &'static str {
    match (id, pass) {
        (AchievementId::Points20k, true) => "scored 20,000+ career points",
        (AchievementId::Points20k, false) => "did not score 20,000+ career points",
        (AchievementId::Rebounds10k, true) => "grabbed 10,000+ career rebounds",
        (AchievementId::Rebounds10k, false) => "did not grab 10,000+ career rebounds",
        (AchievementId::Assists5k, true) => "dished 5,000+ career assists",
        (AchievementId::Assists5k, false) => "did not dish 5,000+ career assists",
        (AchievementId::Steals2k, true) => "recorded 2,000+ career steals",
        (AchievementId::Steals2k, false) => "did not record 2,000+ career steals",
        (AchievementId::Blocks1500, true) => "recorded 1,500+ career blocks",
        (AchievementId::Blocks1500, false) => "did not record 1,500+ career blocks",
        (AchievementId::Threes2k, true) => "made 2,000+ career threes",
        (AchievementId::Threes2k, false) => "did not make 2,000+ career threes",
        (AchievementId::Ppg30, true) => "averaged 30+ points per game in a season",
        (AchievementId::Ppg30, false) => "never averaged 30+ points per game in a season",
        (AchievementId::Apg10, true) => "averaged 10+ assists per game in a season",
        (AchievementId::Apg10, false) => "never averaged 10+ assists per game in a season",
        (AchievementId::Rpg15, true) => "averaged 15+ rebounds per game in a season",
        (AchievementId::Rpg15, false) => "never averaged 15+ rebounds per game in a season",
        (AchievementId::Bpg2_5, true) => "averaged 2.5+ blocks per game in a season",
        (AchievementId::Bpg2_5, false) => "never averaged 2.5+ blocks per game in a season",
        (AchievementId::Spg2, true) => "averaged 2+ steals per game in a season",
        (AchievementId::Spg2, false) => "never averaged 2+ steals per game in a season",
        (AchievementId::Mvp, true) => "won an MVP award",
        (AchievementId::Mvp, false) => "never won an MVP award",
        (AchievementId::Dpoy, true) => "won Defensive Player of the Year",
        (AchievementId::Dpoy, false) => "never won Defensive Player of the Year",
        (AchievementId::Roy, true) => "won Rookie of the Year",
        (AchievementId::Roy, false) => "never won Rookie of the Year",
        (AchievementId::AllStar, true) => "made an All-Star team",
        (AchievementId::AllStar, false) => "never made an All-Star team",
        (AchievementId::Champion, true) => "won a championship",
        (AchievementId::Champion, false) => "never won a championship",
        (AchievementId::FinalsMvp, true) => "won a Finals MVP",
        (AchievementId::FinalsMvp, false) => "never won a Finals MVP",
        (AchievementId::HallOfFame, true) => "made the Hall of Fame",
        (AchievementId::HallOfFame, false) => "is not in the Hall of Fame",
        (AchievementId::FirstOverall, true) => "was the #1 overall pick",
        (AchievementId::FirstOverall, false) => "was not the #1 overall pick",
        (AchievementId::FirstRound, true) => "was a first-round pick",
        (AchievementId::FirstRound, false) => "was not a first-round pick",
        (AchievementId::SecondRound, true) => "was a second-round pick",
        (AchievementId::SecondRound, false) => "was not a second-round pick",
        (AchievementId::Undrafted, true) => "went undrafted",
        (AchievementId::Undrafted, false) => "did not go undrafted",
        (AchievementId::OneFranchise, true) => "played for only one franchise",
        (AchievementId::OneFranchise, false) => "played for more than one franchise",
        (AchievementId::Unknown, true) => "met the criterion",
        (AchievementId::Unknown, false) => "did not meet the criterion",
    }
}
