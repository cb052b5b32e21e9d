use crate::game::{GameError, GameSnapshot, Standing};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Commands sent by the host screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask for the current snapshot without changing anything
    GetState,
    StartGame {
        player_names: Vec<String>,
    },
    OpenQuestion {
        category: usize,
        cell: usize,
    },
    SelectPlayer {
        player: PlayerIndex,
    },
    MarkCorrect,
    MarkWrong,
    Skip,
    /// Dismiss the question (after the answer was shown, or to abandon it)
    Close,
    ToggleHostAnswer,
    Restart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        server_now: String,
        snapshot: GameSnapshot,
    },
    /// Full snapshot after a state change
    State {
        snapshot: GameSnapshot,
    },
    /// Final standings, sent once the last stage is complete
    Results {
        standings: Vec<Standing>,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl From<GameError> for ServerMessage {
    fn from(e: GameError) -> Self {
        ServerMessage::Error {
            code: e.code().to_string(),
            msg: e.to_string(),
        }
    }
}
