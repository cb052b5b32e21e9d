use crate::game::StageAdvance;
use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::GamePhase;
use std::sync::Arc;
use std::time::Duration;

/// Pause between the last question of a stage closing and the next board
/// (or the results) appearing
pub const STAGE_ADVANCE_DELAY: Duration = Duration::from_millis(500);

/// Spawn a background task that advances past `stage` after the delay
pub fn spawn_stage_advance(state: Arc<AppState>, stage: usize) {
    tokio::spawn(async move {
        tokio::time::sleep(STAGE_ADVANCE_DELAY).await;

        for msg in advance_completed_stage(&state, stage).await {
            state.broadcast_to_all(msg);
        }
    });
}

/// Advance if the game is still sitting on the completed `stage`.
///
/// Returns the messages to broadcast; empty when the game moved on in the
/// meantime (restart, or another advance already happened).
pub async fn advance_completed_stage(state: &AppState, stage: usize) -> Vec<ServerMessage> {
    let mut game = state.game.lock().await;

    if game.phase() != GamePhase::Playing
        || game.stage() != stage
        || game.current_question().is_some()
        || !game.is_stage_complete(stage)
    {
        tracing::debug!("Skipping advance past stage {}: game moved on", stage);
        return Vec::new();
    }

    match game.advance_stage() {
        Ok(StageAdvance::NextStage(next)) => {
            tracing::info!("Advanced to stage {}", next);
            vec![ServerMessage::State {
                snapshot: game.snapshot(),
            }]
        }
        Ok(StageAdvance::Finished) => vec![
            ServerMessage::State {
                snapshot: game.snapshot(),
            },
            ServerMessage::Results {
                standings: game.results(),
            },
        ],
        Err(e) => {
            tracing::warn!("Failed to advance past stage {}: {}", stage, e);
            Vec::new()
        }
    }
}
