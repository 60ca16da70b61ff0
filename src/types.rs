use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display name of the synthetic "no Traitor" roster entry
pub const GHOST_NAME: &str = "Pas de Traître";

/// Default length of the discussion phase, in seconds
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 300;

pub type PlayerName = String;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Citizen,
    Traitor,
    GameMaster,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Admin,
}

/// Lifecycle of one game round
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Idle,
    Role,
    Word,
    InProgress,
    Vote1,
    Vote2,
    End,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VoteRound {
    /// Was the word found?
    First,
    /// Who is the Traitor?
    Second,
}

impl VoteRound {
    /// Status during which ballots for this round are collected
    pub fn status(self) -> GameStatus {
        match self {
            VoteRound::First => GameStatus::Vote1,
            VoteRound::Second => GameStatus::Vote2,
        }
    }
}

/// Round-1 ballot value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WordVote {
    Up,
    Down,
}

impl WordVote {
    /// Interpret a raw client value: `"1"` and `1` are up, `null` is no
    /// vote, anything else is down.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) if s == "1" => Some(WordVote::Up),
            Value::Number(n) if n.as_f64() == Some(1.0) => Some(WordVote::Up),
            _ => Some(WordVote::Down),
        }
    }
}

/// A single vote cast by a player; the variant selects the round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ballot {
    WordFound(WordVote),
    Accuse(PlayerName),
}

impl Ballot {
    pub fn round(&self) -> VoteRound {
        match self {
            Ballot::WordFound(_) => VoteRound::First,
            Ballot::Accuse(_) => VoteRound::Second,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: PlayerName,
    pub role: Role,
    pub vote1: Option<WordVote>,
    pub vote2: Option<PlayerName>,
    pub vote_count2: u32,
    pub is_ghost: bool,
    pub permission: Option<Permission>,
}

impl Player {
    pub fn new(name: impl Into<PlayerName>, is_admin: bool) -> Self {
        Self {
            name: name.into(),
            role: Role::Citizen,
            vote1: None,
            vote2: None,
            vote_count2: 0,
            is_ghost: false,
            permission: is_admin.then_some(Permission::Admin),
        }
    }

    pub fn ghost() -> Self {
        Self {
            is_ghost: true,
            ..Self::new(GHOST_NAME, false)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.permission == Some(Permission::Admin)
    }

    /// Whether this player has a vote on record for the given round
    pub fn has_voted(&self, round: VoteRound) -> bool {
        match round {
            VoteRound::First => self.vote1.is_some(),
            VoteRound::Second => self.vote2.is_some(),
        }
    }
}

/// Connected clients vs. roster members not connected
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresenceCounts {
    pub online: u32,
    pub offline: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vote1Result {
    pub up: u32,
    pub down: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vote2Result {
    pub has_won: bool,
    /// Non-Game-Master players ranked by accusations received
    pub vote_detail: Vec<Player>,
    pub has_traitor: bool,
}

/// Tally produced when the last outstanding ballot of a round arrives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    WordFound(Vote1Result),
    Accusation(Vote2Result),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_word_vote_from_value() {
        assert_eq!(WordVote::from_value(&json!("1")), Some(WordVote::Up));
        assert_eq!(WordVote::from_value(&json!(1)), Some(WordVote::Up));
        assert_eq!(WordVote::from_value(&json!("0")), Some(WordVote::Down));
        assert_eq!(WordVote::from_value(&json!(true)), Some(WordVote::Down));
        assert_eq!(WordVote::from_value(&json!(null)), None);
    }

    #[test]
    fn test_status_order_follows_round_flow() {
        assert!(GameStatus::Idle < GameStatus::Role);
        assert!(GameStatus::InProgress < GameStatus::Vote1);
        assert!(GameStatus::Vote2 < GameStatus::End);
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new("Alice", true);
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["role"], "citizen");
        assert_eq!(json["permission"], "admin");
        assert_eq!(json["is_ghost"], false);
    }
}
