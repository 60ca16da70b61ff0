//! Admin command handlers
//!
//! All handlers in this module require admin permission (the Game Master may
//! also end the discussion). Authorization is checked in the dispatch layer
//! before calling these. Results are broadcast to everyone, the sender
//! included, so the only direct response is an error. Each broadcast goes out
//! while the engine lock is still held, so events reach clients in the order
//! they were applied.

use crate::error::SessionError;
use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::VoteRound;
use std::sync::Arc;

fn rejected(e: SessionError) -> Option<ServerMessage> {
    tracing::warn!("Rejected game event: {}", e);
    Some(ServerMessage::error(e.code(), e.to_string()))
}

pub async fn handle_reset_game(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Admin resetting game");
    let mut engine = state.engine.write().await;
    let players = engine.reset_game().to_vec();
    state.broadcast_to_all(ServerMessage::NewRole { players });
    None
}

pub async fn handle_reveal_word(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Admin revealing word");
    let mut engine = state.engine.write().await;
    if let Err(e) = engine.reveal_word() {
        return rejected(e);
    }
    state.broadcast_to_all(ServerMessage::RevealWord {
        players: engine.players().to_vec(),
        word: engine.word().to_string(),
    });
    None
}

pub async fn handle_start_game(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Admin starting game");
    let ticker = state.countdown_ticker();
    let mut engine = state.engine.write().await;
    if let Err(e) = engine.start_game(ticker) {
        return rejected(e);
    }
    state.broadcast_to_all(ServerMessage::StartGame);
    None
}

pub async fn handle_word_found(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Word found");
    let mut engine = state.engine.write().await;
    if let Err(e) = engine.word_found() {
        return rejected(e);
    }
    state.broadcast_to_all(ServerMessage::WordFound);
    None
}

pub async fn handle_display_vote1(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Admin opening first vote");
    let mut engine = state.engine.write().await;
    if let Err(e) = engine.display_vote(VoteRound::First) {
        return rejected(e);
    }
    state.broadcast_to_all(ServerMessage::DisplayVote1);
    None
}

pub async fn handle_display_vote2(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Admin opening second vote");
    let mut engine = state.engine.write().await;
    if let Err(e) = engine.display_vote(VoteRound::Second) {
        return rejected(e);
    }
    let candidates = engine.accusation_targets();
    state.broadcast_to_all(ServerMessage::DisplayVote2 { candidates });
    None
}
