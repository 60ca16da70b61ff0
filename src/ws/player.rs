//! Player message handlers
//!
//! Handlers for the two ballots. A connection may only vote as itself
//! unless it belongs to an admin.

use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::{Ballot, VoteOutcome, WordVote};
use serde_json::Value;
use std::sync::Arc;

async fn may_vote_as(state: &Arc<AppState>, connection: Option<&str>, voter: &str) -> bool {
    match connection {
        None => true,
        Some(name) if name == voter => true,
        Some(name) => state
            .engine
            .read()
            .await
            .get_player(name)
            .is_some_and(|p| p.is_admin()),
    }
}

async fn submit(state: &Arc<AppState>, voter: &str, ballot: Ballot) -> Option<ServerMessage> {
    let mut engine = state.engine.write().await;
    match engine.submit_vote(voter, ballot) {
        Ok(Some(VoteOutcome::WordFound(result))) => {
            tracing::info!("First vote closed: {} up, {} down", result.up, result.down);
            state.broadcast_to_all(ServerMessage::Vote1Ended(result));
            None
        }
        Ok(Some(VoteOutcome::Accusation(result))) => {
            state.broadcast_to_all(ServerMessage::Vote2Ended(result));
            None
        }
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Vote from {} rejected: {}", voter, e);
            Some(ServerMessage::error(e.code(), e.to_string()))
        }
    }
}

pub async fn handle_vote1(
    state: &Arc<AppState>,
    connection: Option<&str>,
    voter: String,
    vote: Value,
) -> Option<ServerMessage> {
    tracing::debug!("Vote1 from {}: {}", voter, vote);
    if !may_vote_as(state, connection, &voter).await {
        return Some(ServerMessage::error(
            "UNAUTHORIZED",
            "Cannot vote for another player",
        ));
    }

    let Some(vote) = WordVote::from_value(&vote) else {
        tracing::debug!("Ignoring empty vote from {}", voter);
        return None;
    };
    submit(state, &voter, Ballot::WordFound(vote)).await
}

pub async fn handle_vote2(
    state: &Arc<AppState>,
    connection: Option<&str>,
    voter: String,
    accused: Option<String>,
) -> Option<ServerMessage> {
    tracing::debug!("Vote2 from {}: {:?}", voter, accused);
    if !may_vote_as(state, connection, &voter).await {
        return Some(ServerMessage::error(
            "UNAUTHORIZED",
            "Cannot vote for another player",
        ));
    }

    let Some(accused) = accused else {
        tracing::debug!("Ignoring empty vote from {}", voter);
        return None;
    };
    submit(state, &voter, Ballot::Accuse(accused)).await
}
