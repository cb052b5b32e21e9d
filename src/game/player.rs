use super::GameState;
use crate::types::*;

/// Build the roster from name inputs: names are trimmed, blanks dropped
pub(super) fn build_roster<S: AsRef<str>>(names: &[S]) -> Vec<Player> {
    names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .map(|name| Player {
            name: name.to_string(),
            score: 0,
        })
        .collect()
}

impl GameState {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: PlayerIndex) -> Option<&Player> {
        self.players.get(index)
    }

    /// Whether the player already answered the open question wrong
    pub fn is_blocked(&self, index: PlayerIndex) -> bool {
        self.turn.blocked.contains(&index)
    }

    /// Players who may still be picked for the open question
    pub fn selectable_players(&self) -> Vec<PlayerIndex> {
        if self.turn.phase != TurnPhase::PlayerSelecting {
            return Vec::new();
        }
        (0..self.players.len())
            .filter(|i| !self.is_blocked(*i))
            .collect()
    }
}
