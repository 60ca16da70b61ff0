use crate::types::{GameStatus, VoteRound};
use std::path::PathBuf;
use thiserror::Error;

/// Rejected game events. Roster and vote primitives never fail; only the
/// status-driving events do.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid status transition from {from:?} to {to:?}")]
    InvalidTransition { from: GameStatus, to: GameStatus },

    #[error("Votes for {round:?} round are not open (status is {status:?})")]
    VotingClosed {
        round: VoteRound,
        status: GameStatus,
    },
}

impl SessionError {
    /// Wire code reported to clients
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::InvalidTransition { .. } => "INVALID_TRANSITION",
            SessionError::VotingClosed { .. } => "VOTING_CLOSED",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read word list {}: {source}", .path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
