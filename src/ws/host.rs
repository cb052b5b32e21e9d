//! Host command handlers
//!
//! The host screen is the only client that drives the game. Every handler
//! locks the game, applies one transition, and publishes the result.

use crate::broadcast::spawn_stage_advance;
use crate::game::{GameError, GameState, OpenOutcome, TurnOutcome};
use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::PlayerIndex;
use std::sync::Arc;

/// Broadcast the new snapshot and hand it back as the reply
fn publish(state: &AppState, game: &GameState) -> ServerMessage {
    let snapshot = game.snapshot();
    state.broadcast_to_all(ServerMessage::State {
        snapshot: snapshot.clone(),
    });
    ServerMessage::State { snapshot }
}

fn reject(action: &str, e: GameError) -> ServerMessage {
    tracing::warn!("Rejected {}: {}", action, e);
    e.into()
}

/// Publish a turn result; schedule the stage advance if the board is cleared
fn finish_turn_command(
    state: &Arc<AppState>,
    game: &GameState,
    action: &str,
    result: Result<TurnOutcome, GameError>,
) -> Option<ServerMessage> {
    match result {
        Ok(outcome) => {
            if let TurnOutcome::Closed {
                stage_complete: true,
            } = outcome
            {
                tracing::info!("Stage {} complete", game.stage());
                spawn_stage_advance(state.clone(), game.stage());
            }
            Some(publish(state, game))
        }
        Err(e) => Some(reject(action, e)),
    }
}

pub async fn handle_start_game(
    state: &Arc<AppState>,
    player_names: Vec<String>,
) -> Option<ServerMessage> {
    tracing::info!("Host starting game with {} name inputs", player_names.len());
    let mut game = state.game.lock().await;
    match game.start_game(player_names.as_slice()) {
        Ok(()) => Some(publish(state, &game)),
        Err(e) => Some(reject("start game", e)),
    }
}

pub async fn handle_open_question(
    state: &Arc<AppState>,
    category_index: usize,
    cell_index: usize,
) -> Option<ServerMessage> {
    tracing::info!("Host opening cell {}/{}", category_index, cell_index);
    let mut game = state.game.lock().await;

    let category = match game.stage_category(category_index) {
        Ok(category) => category,
        Err(e) => return Some(reject("open question", e)),
    };

    // Held across the load: nothing else may run while questions arrive
    let questions = state.questions.load(&category).await;

    match game.open_question(category_index, cell_index, &questions) {
        Ok(OpenOutcome::Opened) => Some(publish(state, &game)),
        // Missing data is not the host's fault; the board just stays as it was
        Ok(OpenOutcome::NoQuestions) => Some(ServerMessage::State {
            snapshot: game.snapshot(),
        }),
        Err(e) => Some(reject("open question", e)),
    }
}

pub async fn handle_select_player(
    state: &Arc<AppState>,
    player: PlayerIndex,
) -> Option<ServerMessage> {
    let mut game = state.game.lock().await;
    match game.select_player(player) {
        Ok(()) => Some(publish(state, &game)),
        Err(e) => Some(reject("select player", e)),
    }
}

pub async fn handle_mark_correct(state: &Arc<AppState>) -> Option<ServerMessage> {
    let mut game = state.game.lock().await;
    let result = game.mark_correct();
    finish_turn_command(state, &game, "mark correct", result)
}

pub async fn handle_mark_wrong(state: &Arc<AppState>) -> Option<ServerMessage> {
    let mut game = state.game.lock().await;
    let result = game.mark_wrong();
    finish_turn_command(state, &game, "mark wrong", result)
}

pub async fn handle_skip(state: &Arc<AppState>) -> Option<ServerMessage> {
    let mut game = state.game.lock().await;
    let result = game.skip();
    finish_turn_command(state, &game, "skip", result)
}

pub async fn handle_close(state: &Arc<AppState>) -> Option<ServerMessage> {
    let mut game = state.game.lock().await;
    let result = game.close();
    finish_turn_command(state, &game, "close", result)
}

pub async fn handle_toggle_host_answer(state: &Arc<AppState>) -> Option<ServerMessage> {
    let mut game = state.game.lock().await;
    match game.toggle_host_answer() {
        Ok(visible) => {
            tracing::info!("Host answer {}", if visible { "shown" } else { "hidden" });
            Some(publish(state, &game))
        }
        Err(e) => Some(reject("toggle answer", e)),
    }
}

pub async fn handle_restart(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host restarting game");
    let mut game = state.game.lock().await;
    game.restart();
    Some(publish(state, &game))
}
