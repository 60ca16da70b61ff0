//! HTTP API endpoints for roster and word management.
//!
//! These endpoints are used by the admin page and by the board view of each
//! player. Everything live (roles, votes, countdown) goes over the WebSocket.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::protocol::masked;
use crate::state::AppState;
use crate::types::{GameStatus, Player, Vote1Result, Vote2Result};

#[derive(Debug, Clone, Deserialize)]
pub struct AddPlayerRequest {
    pub name: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetWordRequest {
    #[serde(default)]
    pub word: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoardQuery {
    pub player: Option<String>,
}

/// What one player's board shows on (re)load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub player: Player,
    pub status: GameStatus,
    pub result_vote1: Option<Vote1Result>,
    pub result_vote2: Option<Vote2Result>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/players", get(list_players).post(add_player))
        .route("/api/players/{name}", delete(delete_player))
        .route("/api/admin/players", get(list_all_players))
        .route("/api/word", post(set_word))
        .route("/api/board", get(board))
}

/// GET /api/players
///
/// Roster as players see it: no ghost, and the Traitor looks like a Citizen
pub async fn list_players(State(state): State<Arc<AppState>>) -> Json<Vec<Player>> {
    let engine = state.engine.read().await;
    let players = engine
        .visible_players()
        .into_iter()
        .map(|p| masked(p, None))
        .collect();
    Json(players)
}

/// GET /api/admin/players?player=<admin>
///
/// Full roster with every role, ghost included. Admins only.
pub async fn list_all_players(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BoardQuery>,
) -> Response {
    let engine = state.engine.read().await;
    let is_admin = query
        .player
        .as_deref()
        .and_then(|name| engine.get_player(name))
        .is_some_and(Player::is_admin);
    if !is_admin {
        tracing::warn!("Roster with roles denied to {:?}", query.player);
        return (StatusCode::FORBIDDEN, "Only admin can see roles").into_response();
    }

    let players = engine.players().to_vec();
    Json(players).into_response()
}

/// POST /api/players
pub async fn add_player(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddPlayerRequest>,
) -> Json<Vec<Player>> {
    let mut engine = state.engine.write().await;
    engine.add_player(&request.name, request.admin);
    state.broadcast_presence(engine.presence());
    let players = engine.players().iter().map(|p| masked(p, None)).collect();
    Json(players)
}

/// DELETE /api/players/{name}
pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Json<Vec<Player>> {
    let mut engine = state.engine.write().await;
    engine.delete_player(&name);
    state.broadcast_presence(engine.presence());
    let players = engine.players().iter().map(|p| masked(p, None)).collect();
    Json(players)
}

/// POST /api/word
///
/// An empty or missing word draws one from the word list. The response never
/// contains the word.
pub async fn set_word(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetWordRequest>,
) -> Json<&'static str> {
    let mut engine = state.engine.write().await;
    if engine.set_word(request.word.as_deref()).is_empty() {
        tracing::warn!("No word set: word list is empty");
    }
    Json("ok")
}

/// GET /api/board?player=<name>
pub async fn board(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BoardQuery>,
) -> Response {
    let engine = state.engine.read().await;
    let Some(player) = query
        .player
        .as_deref()
        .and_then(|name| engine.get_player(name))
        .filter(|p| !p.is_ghost)
    else {
        return (StatusCode::NOT_FOUND, "Unknown player").into_response();
    };

    Json(BoardView {
        player: player.clone(),
        status: engine.status(),
        result_vote1: engine.result_vote1(),
        result_vote2: engine.result_vote2().cloned(),
    })
    .into_response()
}
