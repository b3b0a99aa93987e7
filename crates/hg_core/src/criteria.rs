//! Eligibility criteria: a closed catalog of named predicates plus the
//! cell-axis variant that dispatches to them.
//!
//! Every predicate is pure, stateless, and total: an absent statistic is
//! treated as zero or false, never as an error.

use crate::models::Player;
use serde::{Deserialize, Serialize};

/// Canonical identifier for one achievement predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    // Career totals
    Points20k,
    Rebounds10k,
    Assists5k,
    Steals2k,
    Blocks1500,
    Threes2k,
    // Single-season per-game rates
    Ppg30,
    Apg10,
    Rpg15,
    Bpg2_5,
    Spg2,
    // Awards and selections
    Mvp,
    Dpoy,
    Roy,
    AllStar,
    Champion,
    FinalsMvp,
    HallOfFame,
    // Draft facts
    FirstOverall,
    FirstRound,
    SecondRound,
    Undrafted,
    // Franchise
    OneFranchise,
    /// Sentinel for labels the classifier does not recognize. Never
    /// matches any player.
    Unknown,
}

/// The full catalog, in display order. `Unknown` is deliberately absent.
pub const CATALOG: &[AchievementId] = &[
    AchievementId::Points20k,
    AchievementId::Rebounds10k,
    AchievementId::Assists5k,
    AchievementId::Steals2k,
    AchievementId::Blocks1500,
    AchievementId::Threes2k,
    AchievementId::Ppg30,
    AchievementId::Apg10,
    AchievementId::Rpg15,
    AchievementId::Bpg2_5,
    AchievementId::Spg2,
    AchievementId::Mvp,
    AchievementId::Dpoy,
    AchievementId::Roy,
    AchievementId::AllStar,
    AchievementId::Champion,
    AchievementId::FinalsMvp,
    AchievementId::HallOfFame,
    AchievementId::FirstOverall,
    AchievementId::FirstRound,
    AchievementId::SecondRound,
    AchievementId::Undrafted,
    AchievementId::OneFranchise,
];

impl AchievementId {
    pub fn label(self) -> &'static str {
        match self {
            AchievementId::Points20k => "20,000+ Career Points",
            AchievementId::Rebounds10k => "10,000+ Career Rebounds",
            AchievementId::Assists5k => "5,000+ Career Assists",
            AchievementId::Steals2k => "2,000+ Career Steals",
            AchievementId::Blocks1500 => "1,500+ Career Blocks",
            AchievementId::Threes2k => "2,000+ Career Threes",
            AchievementId::Ppg30 => "Averaged 30+ PPG in a Season",
            AchievementId::Apg10 => "Averaged 10+ APG in a Season",
            AchievementId::Rpg15 => "Averaged 15+ RPG in a Season",
            AchievementId::Bpg2_5 => "Averaged 2.5+ BPG in a Season",
            AchievementId::Spg2 => "Averaged 2+ SPG in a Season",
            AchievementId::Mvp => "MVP Winner",
            AchievementId::Dpoy => "Defensive Player of the Year",
            AchievementId::Roy => "Rookie of the Year",
            AchievementId::AllStar => "All-Star Selection",
            AchievementId::Champion => "Won a Championship",
            AchievementId::FinalsMvp => "Finals MVP",
            AchievementId::HallOfFame => "Hall of Famer",
            AchievementId::FirstOverall => "#1 Overall Pick",
            AchievementId::FirstRound => "First Round Pick",
            AchievementId::SecondRound => "Second Round Pick",
            AchievementId::Undrafted => "Went Undrafted",
            AchievementId::OneFranchise => "Played for Only One Franchise",
            AchievementId::Unknown => "Unknown Criterion",
        }
    }

    /// Evaluate the predicate against a canonical player.
    pub fn test(self, player: &Player) -> bool {
        match self {
            AchievementId::Points20k => player.career.pts >= 20_000,
            AchievementId::Rebounds10k => player.career.total_rebounds >= 10_000,
            AchievementId::Assists5k => player.career.ast >= 5_000,
            AchievementId::Steals2k => player.career.stl >= 2_000,
            AchievementId::Blocks1500 => player.career.blk >= 1_500,
            AchievementId::Threes2k => player.career.threes_made >= 2_000,
            AchievementId::Ppg30 => player.best_season_rate(|s| s.pts) >= 30.0,
            AchievementId::Apg10 => player.best_season_rate(|s| s.ast) >= 10.0,
            AchievementId::Rpg15 => player.best_season_rate(|s| s.total_rebounds) >= 15.0,
            AchievementId::Bpg2_5 => player.best_season_rate(|s| s.blk) >= 2.5,
            AchievementId::Spg2 => player.best_season_rate(|s| s.stl) >= 2.0,
            AchievementId::Mvp => has_award(player, "most valuable player"),
            AchievementId::Dpoy => has_award(player, "defensive player of the year"),
            AchievementId::Roy => has_award(player, "rookie of the year"),
            AchievementId::AllStar => has_award(player, "all-star"),
            AchievementId::Champion => has_award(player, "won championship"),
            AchievementId::FinalsMvp => has_award(player, "finals mvp"),
            AchievementId::HallOfFame => player.hall_of_fame,
            AchievementId::FirstOverall => player.draft.pick == Some(1),
            AchievementId::FirstRound => player.draft.round == Some(1),
            AchievementId::SecondRound => player.draft.round == Some(2),
            AchievementId::Undrafted => player.draft.pick.is_none(),
            AchievementId::OneFranchise => player.teams_played_for.len() == 1,
            AchievementId::Unknown => false,
        }
    }
}

fn has_award(player: &Player, target: &str) -> bool {
    player.awards.iter().any(|award| award.kind.eq_ignore_ascii_case(target))
}

/// One axis of a grid cell: a team-membership criterion or an achievement
/// criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellSpec {
    Team { team_id: u32, team_name: String },
    Achievement { id: AchievementId, label: String },
}

impl CellSpec {
    pub fn achievement(id: AchievementId) -> Self {
        CellSpec::Achievement { id, label: id.label().to_owned() }
    }

    pub fn matches(&self, player: &Player) -> bool {
        match self {
            CellSpec::Team { team_id, .. } => player.played_for(*team_id),
            CellSpec::Achievement { id, .. } => id.test(player),
        }
    }

    pub fn describe(&self) -> &str {
        match self {
            CellSpec::Team { team_name, .. } => team_name,
            CellSpec::Achievement { label, .. } => label,
        }
    }
}

/// Classify a free-text achievement label into a canonical identifier.
///
/// Table-driven keyword matching; the first matching rule wins and
/// unrecognized labels map to the stable `Unknown` sentinel, never an
/// error. Rule order matters: the more specific phrasing is listed before
/// the keyword it contains ("finals mvp" before "mvp").
pub fn classify_label(label: &str) -> AchievementId {
    const RULES: &[(&[&str], AchievementId)] = &[
        (&["finals mvp"], AchievementId::FinalsMvp),
        (&["mvp", "most valuable"], AchievementId::Mvp),
        (&["defensive player"], AchievementId::Dpoy),
        (&["rookie of the year"], AchievementId::Roy),
        (&["all-star", "all star"], AchievementId::AllStar),
        (&["champion", "championship"], AchievementId::Champion),
        (&["hall of fame", "hall of famer", "hof"], AchievementId::HallOfFame),
        (&["#1 overall", "no. 1 overall", "first overall"], AchievementId::FirstOverall),
        (&["undrafted"], AchievementId::Undrafted),
        (&["first round"], AchievementId::FirstRound),
        (&["second round"], AchievementId::SecondRound),
        (&["one franchise", "only one team", "one team"], AchievementId::OneFranchise),
        (&["30+ ppg", "30 ppg", "30+ points per game"], AchievementId::Ppg30),
        (&["10+ apg", "10 apg", "10+ assists per game"], AchievementId::Apg10),
        (&["15+ rpg", "15 rpg", "15+ rebounds per game"], AchievementId::Rpg15),
        (&["2.5+ bpg", "2.5 bpg", "2.5+ blocks per game"], AchievementId::Bpg2_5),
        (&["2+ spg", "2 spg", "2+ steals per game"], AchievementId::Spg2),
        (&["20,000", "20000"], AchievementId::Points20k),
        (&["10,000", "10000"], AchievementId::Rebounds10k),
        (&["5,000", "5000"], AchievementId::Assists5k),
        (&["2,000+ career steals", "2000+ career steals"], AchievementId::Steals2k),
        (&["1,500", "1500"], AchievementId::Blocks1500),
        (&["2,000+ career threes", "2000+ career threes", "three"], AchievementId::Threes2k),
    ];

    let needle = label.to_ascii_lowercase();
    for (keywords, id) in RULES {
        if keywords.iter().any(|kw| needle.contains(kw)) {
            return *id;
        }
    }
    AchievementId::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Award, DraftFacts};
    use crate::testutil::{player, season};

    #[test]
    fn test_career_points_threshold() {
        // Three regular-season lines totalling 21,000 points
        let p = player(
            1,
            "Scorer",
            vec![season(2000, 0, 82, 7000), season(2001, 0, 82, 7000), season(2002, 0, 82, 7000)],
        );
        assert!(AchievementId::Points20k.test(&p));
        assert!(!AchievementId::Assists5k.test(&p));
    }

    #[test]
    fn test_playoff_points_never_contribute() {
        let mut playoff = season(2001, 0, 20, 1500);
        playoff.playoffs = true;
        let p = player(1, "Edge", vec![season(2000, 0, 82, 19_500), playoff]);
        assert!(!AchievementId::Points20k.test(&p));
    }

    #[test]
    fn test_season_rate_excludes_zero_game_seasons() {
        // A 0-game season must never satisfy a rate threshold
        let p = player(1, "Rate", vec![season(2000, 0, 0, 0)]);
        assert!(!AchievementId::Ppg30.test(&p));

        let q = player(2, "Rate", vec![season(2000, 0, 10, 305)]);
        assert!(AchievementId::Ppg30.test(&q));
    }

    #[test]
    fn test_award_predicates_match_kind_string() {
        let mut p = player(1, "Star", vec![season(2000, 0, 82, 100)]);
        p.awards.push(Award { season: 2000, kind: "Most Valuable Player".into() });
        assert!(AchievementId::Mvp.test(&p));
        assert!(!AchievementId::FinalsMvp.test(&p));
        assert!(!AchievementId::AllStar.test(&p));
    }

    #[test]
    fn test_draft_predicates() {
        let mut p = player(1, "Pick", vec![season(2000, 0, 82, 100)]);
        p.draft = DraftFacts { year: Some(1999), round: Some(1), pick: Some(1) };
        assert!(AchievementId::FirstOverall.test(&p));
        assert!(AchievementId::FirstRound.test(&p));
        assert!(!AchievementId::SecondRound.test(&p));
        assert!(!AchievementId::Undrafted.test(&p));

        let q = player(2, "Nobody", vec![season(2000, 0, 82, 100)]);
        assert!(AchievementId::Undrafted.test(&q));
    }

    #[test]
    fn test_one_franchise() {
        let lifer = player(1, "Lifer", vec![season(2000, 0, 82, 100), season(2001, 0, 82, 100)]);
        assert!(AchievementId::OneFranchise.test(&lifer));
        let mover = player(2, "Mover", vec![season(2000, 0, 82, 100), season(2001, 1, 82, 100)]);
        assert!(!AchievementId::OneFranchise.test(&mover));
    }

    #[test]
    fn test_cell_spec_dispatch() {
        let p = player(1, "Member", vec![season(2000, 3, 82, 100)]);
        let team = CellSpec::Team { team_id: 3, team_name: "Team 3".into() };
        let other = CellSpec::Team { team_id: 4, team_name: "Team 4".into() };
        assert!(team.matches(&p));
        assert!(!other.matches(&p));
        assert!(CellSpec::achievement(AchievementId::OneFranchise).matches(&p));
    }

    #[test]
    fn test_classify_label_specific_before_general() {
        assert_eq!(classify_label("Finals MVP"), AchievementId::FinalsMvp);
        assert_eq!(classify_label("MVP Winner"), AchievementId::Mvp);
        assert_eq!(classify_label("20,000+ Career Points"), AchievementId::Points20k);
        assert_eq!(classify_label("Went Undrafted"), AchievementId::Undrafted);
    }

    #[test]
    fn test_classify_unknown_label_is_sentinel() {
        assert_eq!(classify_label("Tallest Player Ever"), AchievementId::Unknown);
        assert_eq!(classify_label(""), AchievementId::Unknown);
    }

    #[test]
    fn test_catalog_labels_classify_to_themselves() {
        for &id in CATALOG {
            assert_eq!(classify_label(id.label()), id, "label {:?}", id.label());
        }
    }
}
