use crate::game::{GameSnapshot, GameState};
use crate::protocol::ServerMessage;
use crate::questions::{QuestionRepository, QuestionSource};
use tokio::sync::{broadcast, Mutex};

/// Shared application state
///
/// The game has exactly one owner. Commands take the lock for their whole
/// duration, including the question load that precedes opening a cell, so
/// nothing else can interleave with a half-finished transition.
pub struct AppState {
    pub game: Mutex<GameState>,
    pub questions: QuestionRepository,
    /// Broadcast channel for pushing fresh snapshots to every connected screen
    pub broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new(game: GameState, questions: QuestionRepository) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            game: Mutex::new(game),
            questions,
            broadcast: tx,
        }
    }

    /// Deterministic state over any question source (tests, replays)
    pub fn with_source(source: Box<dyn QuestionSource>, seed: u64) -> Self {
        Self::new(GameState::with_seed(seed), QuestionRepository::new(source))
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.game.lock().await.snapshot()
    }

    /// Send to every connected client; no receivers is fine
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        let _ = self.broadcast.send(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{LoadResult, QuestionSource};
    use crate::types::{GamePhase, Question};
    use async_trait::async_trait;

    struct EmptySource;

    #[async_trait]
    impl QuestionSource for EmptySource {
        async fn fetch(&self, _file: &str) -> LoadResult<Vec<Question>> {
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "empty"
        }
    }

    #[tokio::test]
    async fn test_new_state_starts_in_setup() {
        let state = AppState::with_source(Box::new(EmptySource), 1);
        let snapshot = state.snapshot().await;

        assert_eq!(snapshot.phase, GamePhase::Setup);
        assert_eq!(snapshot.version, 1);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let state = AppState::with_source(Box::new(EmptySource), 1);
        let mut rx = state.broadcast.subscribe();

        let snapshot = state.snapshot().await;
        state.broadcast_to_all(ServerMessage::State { snapshot });

        assert!(matches!(rx.recv().await, Ok(ServerMessage::State { .. })));
    }

    #[tokio::test]
    async fn test_broadcast_without_receivers_is_ignored() {
        let state = AppState::with_source(Box::new(EmptySource), 1);
        state.broadcast_to_all(ServerMessage::Error {
            code: "TEST".to_string(),
            msg: "nobody listening".to_string(),
        });
    }
}
