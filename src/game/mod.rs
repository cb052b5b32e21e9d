//! Core quiz state: roster, stage progression, the open question and its turn.
//!
//! Everything here is synchronous and owned by a single [`GameState`]. The only
//! async step, loading a category's questions, happens in the caller before
//! [`GameState::open_question`].

mod player;
mod round;
mod score;
mod snapshot;
mod turn;

pub use round::StageAdvance;
pub use score::{score_delta, standings, AnswerOutcome, Standing};
pub use snapshot::{BoardCell, BoardColumn, GameSnapshot, PlayerView, TurnView};
pub use turn::{OpenOutcome, TurnOutcome};

use crate::types::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

/// Reasons a command is rejected. State is left untouched in every case.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("Enter at least one player name")]
    NoPlayers,

    #[error("No game in progress")]
    NotPlaying,

    #[error("Another question is already open")]
    QuestionAlreadyOpen,

    #[error("No question is open")]
    NoOpenQuestion,

    #[error("Category {0} is not on the board")]
    UnknownCategory(usize),

    #[error("Cell {0} is not on the board")]
    UnknownCell(usize),

    #[error("Cell {0} has already been played")]
    CellUsed(CellId),

    #[error("Player {0} does not exist")]
    UnknownPlayer(PlayerIndex),

    #[error("Player {0} already answered this question")]
    PlayerBlocked(PlayerIndex),

    #[error("Cannot {action} while the turn is {phase:?}")]
    InvalidTurnPhase {
        action: &'static str,
        phase: TurnPhase,
    },
}

impl GameError {
    /// Stable code sent to clients alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            GameError::NoPlayers => "NO_PLAYERS",
            GameError::NotPlaying => "NOT_PLAYING",
            GameError::QuestionAlreadyOpen => "QUESTION_ALREADY_OPEN",
            GameError::NoOpenQuestion => "NO_OPEN_QUESTION",
            GameError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            GameError::UnknownCell(_) => "UNKNOWN_CELL",
            GameError::CellUsed(_) => "CELL_USED",
            GameError::UnknownPlayer(_) => "UNKNOWN_PLAYER",
            GameError::PlayerBlocked(_) => "PLAYER_BLOCKED",
            GameError::InvalidTurnPhase { .. } => "INVALID_TURN_PHASE",
        }
    }
}

/// The whole mutable game: one instance per server, no globals
#[derive(Debug)]
pub struct GameState {
    id: Option<GameId>,
    version: u64,
    phase: GamePhase,
    players: Vec<Player>,
    stage: usize,
    shuffled_categories: Vec<Category>,
    stage_categories: Vec<Category>,
    used_cells: BTreeSet<CellId>,
    current_question: Option<ActiveQuestion>,
    turn: TurnState,
    rng: StdRng,
}

impl GameState {
    /// New game seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic game for tests and replays
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            id: None,
            version: 1,
            phase: GamePhase::Setup,
            players: Vec::new(),
            stage: 0,
            shuffled_categories: Vec::new(),
            stage_categories: Vec::new(),
            used_cells: BTreeSet::new(),
            current_question: None,
            turn: TurnState::default(),
            rng,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Bumped on every mutation so clients can drop stale snapshots
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn used_cells(&self) -> &BTreeSet<CellId> {
        &self.used_cells
    }

    pub fn is_used(&self, cell: &CellId) -> bool {
        self.used_cells.contains(cell)
    }

    pub fn current_question(&self) -> Option<&ActiveQuestion> {
        self.current_question.as_ref()
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        if self.phase == GamePhase::Playing {
            Ok(())
        } else {
            Err(GameError::NotPlaying)
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_in_setup() {
        let game = GameState::with_seed(1);

        assert_eq!(game.phase(), GamePhase::Setup);
        assert!(game.id().is_none());
        assert!(game.players().is_empty());
        assert!(game.used_cells().is_empty());
        assert!(game.current_question().is_none());
        assert_eq!(game.turn().phase, TurnPhase::Closed);
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            GameError::NoPlayers,
            GameError::NotPlaying,
            GameError::QuestionAlreadyOpen,
            GameError::NoOpenQuestion,
            GameError::UnknownCategory(0),
            GameError::UnknownCell(0),
            GameError::CellUsed(CellId::new(0, 0, 0)),
            GameError::UnknownPlayer(0),
            GameError::PlayerBlocked(0),
            GameError::InvalidTurnPhase {
                action: "test",
                phase: TurnPhase::Closed,
            },
        ];
        let codes: BTreeSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_cell_used_message_names_cell() {
        let err = GameError::CellUsed(CellId::new(2, 1, 4));
        assert_eq!(err.to_string(), "Cell 2-1-4 has already been played");
    }
}
