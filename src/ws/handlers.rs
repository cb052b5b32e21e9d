//! Command dispatch
//!
//! Entry point for everything the host screen sends. Each command runs
//! against the single game state and answers with a fresh snapshot or an
//! error; successful changes are also broadcast to every connected screen.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use std::sync::Arc;

use super::host;

/// Handle client messages and return optional response
pub async fn handle_message(msg: ClientMessage, state: &Arc<AppState>) -> Option<ServerMessage> {
    match msg {
        ClientMessage::GetState => Some(ServerMessage::State {
            snapshot: state.snapshot().await,
        }),

        ClientMessage::StartGame { player_names } => {
            host::handle_start_game(state, player_names).await
        }

        ClientMessage::OpenQuestion { category, cell } => {
            host::handle_open_question(state, category, cell).await
        }

        ClientMessage::SelectPlayer { player } => host::handle_select_player(state, player).await,

        ClientMessage::MarkCorrect => host::handle_mark_correct(state).await,

        ClientMessage::MarkWrong => host::handle_mark_wrong(state).await,

        ClientMessage::Skip => host::handle_skip(state).await,

        ClientMessage::Close => host::handle_close(state).await,

        ClientMessage::ToggleHostAnswer => host::handle_toggle_host_answer(state).await,

        ClientMessage::Restart => host::handle_restart(state).await,
    }
}
