use super::Player;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub display_name: String,
    pub abbreviation: String,
}

/// The normalized in-memory model of one imported league export.
///
/// Owned by the caller for the game's duration; no component mutates a
/// League after normalization completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    /// Min/max season number across all retained lines; `None` when no
    /// season lines exist anywhere in the league.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_range: Option<(i32, i32)>,
}

impl League {
    pub fn team(&self, id: u32) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == id)
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Case-insensitive name lookup; first match in source order wins.
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name.eq_ignore_ascii_case(name))
    }

    /// Number of players who ever played for the team.
    pub fn roster_size(&self, team_id: u32) -> usize {
        self.players.iter().filter(|player| player.played_for(team_id)).count()
    }
}
