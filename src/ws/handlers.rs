//! WebSocket message dispatch
//!
//! This module provides the main entry point for handling client messages.
//! Authorization is checked here, then dispatched to the admin or player
//! handler modules.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::types::Role;
use std::sync::Arc;

use super::{admin, player};

/// Macro to check admin permission and return early if unauthorized
macro_rules! check_admin {
    ($state:expr, $player:expr, $action:expr) => {
        if !has_permission($state, $player, false).await {
            return Some(ServerMessage::error(
                "UNAUTHORIZED",
                format!("Only admin can {}", $action),
            ));
        }
    };
}

/// Whether the connection's player is an admin (or, when `allow_game_master`
/// is set, the current Game Master)
async fn has_permission(
    state: &Arc<AppState>,
    player: Option<&str>,
    allow_game_master: bool,
) -> bool {
    let Some(name) = player else {
        return false;
    };
    let engine = state.engine.read().await;
    engine.get_player(name).is_some_and(|p| {
        p.is_admin() || (allow_game_master && p.role == Role::GameMaster)
    })
}

/// Handle client messages and return optional response for the sender.
/// `acting_as` is the name the connection acts as.
pub async fn handle_message(
    msg: ClientMessage,
    acting_as: Option<&str>,
    state: &Arc<AppState>,
) -> Option<ServerMessage> {
    match msg {
        // Admin-only commands (authorization checked before dispatch)
        ClientMessage::ResetGame => {
            check_admin!(state, acting_as, "reset the game");
            admin::handle_reset_game(state).await
        }

        ClientMessage::RevealWord => {
            check_admin!(state, acting_as, "reveal the word");
            admin::handle_reveal_word(state).await
        }

        ClientMessage::StartGame => {
            check_admin!(state, acting_as, "start the game");
            admin::handle_start_game(state).await
        }

        ClientMessage::DisplayVote1 => {
            check_admin!(state, acting_as, "open the first vote");
            admin::handle_display_vote1(state).await
        }

        ClientMessage::DisplayVote2 => {
            check_admin!(state, acting_as, "open the second vote");
            admin::handle_display_vote2(state).await
        }

        ClientMessage::WordFound => {
            if !has_permission(state, acting_as, true).await {
                return Some(ServerMessage::error(
                    "UNAUTHORIZED",
                    "Only admin or Game Master can end the discussion",
                ));
            }
            admin::handle_word_found(state).await
        }

        // Player messages
        ClientMessage::Vote1 {
            player: voter,
            vote,
        } => player::handle_vote1(state, acting_as, voter, vote).await,

        ClientMessage::Vote2 {
            player: voter,
            vote,
        } => player::handle_vote2(state, acting_as, voter, vote).await,
    }
}
