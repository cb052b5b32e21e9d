//! HTTP API endpoints for read-only views of the game.
//!
//! Screens that only need to look (a scoreboard on a second monitor, a
//! results page) can poll these instead of holding a WebSocket open.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::game::{GameSnapshot, Standing};
use crate::state::AppState;
use crate::types::{Category, Stage, CATEGORIES, STAGES};

/// Static catalog and stage plan
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub categories: &'static [Category],
    pub stages: &'static [Stage],
}

/// Routes under `/api`
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/categories", get(list_categories))
        .route("/api/results", get(get_results))
}

/// Current snapshot.
///
/// GET /api/state
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<GameSnapshot> {
    Json(state.snapshot().await)
}

/// Category catalog and stage multipliers.
///
/// GET /api/categories
pub async fn list_categories() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        categories: CATEGORIES,
        stages: STAGES,
    })
}

/// Standings by score. Final once the game phase is FINISHED.
///
/// GET /api/results
pub async fn get_results(State(state): State<Arc<AppState>>) -> Json<Vec<Standing>> {
    Json(state.game.lock().await.results())
}
