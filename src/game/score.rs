use serde::{Deserialize, Serialize};

use super::GameState;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    Skipped,
}

/// Points gained or lost for an answer. Scores are never clamped.
pub fn score_delta(outcome: AnswerOutcome, points: Points) -> Points {
    match outcome {
        AnswerOutcome::Correct => points,
        AnswerOutcome::Wrong => -points,
        AnswerOutcome::Skipped => 0,
    }
}

/// One row of the final results table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub score: Points,
    pub winner: bool,
}

/// Players ordered by score descending; ties keep roster order
pub fn standings(players: &[Player]) -> Vec<Standing> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    // Stable sort
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, player)| Standing {
            rank: i + 1,
            name: player.name.clone(),
            score: player.score,
            winner: i == 0,
        })
        .collect()
}

impl GameState {
    /// Current standings (the results table once the game is finished)
    pub fn results(&self) -> Vec<Standing> {
        standings(&self.players)
    }
}
