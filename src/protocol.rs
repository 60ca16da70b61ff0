use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    // Admin-only messages
    ResetGame,
    RevealWord,
    StartGame,
    DisplayVote1,
    DisplayVote2,
    /// Admin or Game Master
    WordFound,
    /// Round-1 ballot; `"1"`/`1` means the word was found
    Vote1 {
        player: PlayerName,
        #[serde(default)]
        vote: Value,
    },
    /// Round-2 ballot naming the accused player
    Vote2 {
        player: PlayerName,
        vote: Option<PlayerName>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        status: GameStatus,
        presence: PresenceCounts,
        /// The player this connection acts as, if known
        player: Option<Player>,
        server_now: String,
    },
    PlayerStatusUpdate {
        online: u32,
        offline: u32,
    },
    /// Roles were dealt
    NewRole {
        players: Vec<Player>,
    },
    RevealWord {
        players: Vec<Player>,
        word: String,
    },
    StartGame,
    CountdownUpdate {
        remaining: u32,
    },
    WordFound,
    DisplayVote1,
    DisplayVote2 {
        candidates: Vec<Player>,
    },
    Vote1Ended(Vote1Result),
    Vote2Ended(Vote2Result),
    Error {
        code: String,
        msg: String,
    },
}

impl From<PresenceCounts> for ServerMessage {
    fn from(counts: PresenceCounts) -> Self {
        ServerMessage::PlayerStatusUpdate {
            online: counts.online,
            offline: counts.offline,
        }
    }
}

impl ServerMessage {
    pub fn error(code: impl Into<String>, msg: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.into(),
            msg: msg.into(),
        }
    }

    /// Tailor a broadcast to one connection.
    ///
    /// Hidden roles stay hidden: only the Traitor sees the Traitor role, the
    /// Game Master never receives the word, and the ghost entry is only shown
    /// to admins (or as an accusation target). Final results go out as is.
    pub fn redacted_for(&self, viewer: Option<&Player>) -> ServerMessage {
        match self {
            ServerMessage::NewRole { players } => ServerMessage::NewRole {
                players: roster_for(players, viewer),
            },
            ServerMessage::RevealWord { players, word } => {
                // Judge by the roster the word was revealed with
                let is_game_master = viewer.is_some_and(|v| {
                    players
                        .iter()
                        .any(|p| p.name == v.name && p.role == Role::GameMaster)
                });
                ServerMessage::RevealWord {
                    players: roster_for(players, viewer),
                    word: if is_game_master {
                        String::new()
                    } else {
                        word.clone()
                    },
                }
            }
            ServerMessage::DisplayVote2 { candidates } => ServerMessage::DisplayVote2 {
                candidates: candidates.iter().map(|p| masked(p, viewer)).collect(),
            },
            other => other.clone(),
        }
    }
}

fn roster_for(players: &[Player], viewer: Option<&Player>) -> Vec<Player> {
    let is_admin = viewer.is_some_and(Player::is_admin);
    players
        .iter()
        .filter(|p| is_admin || !p.is_ghost)
        .map(|p| masked(p, viewer))
        .collect()
}

/// Copy of `player` as `viewer` may see it. Pass `None` for the public view.
pub(crate) fn masked(player: &Player, viewer: Option<&Player>) -> Player {
    let mut player = player.clone();
    let is_self = viewer.is_some_and(|v| v.name == player.name);
    if player.role == Role::Traitor && !is_self {
        player.role = Role::Citizen;
    }
    player
}
