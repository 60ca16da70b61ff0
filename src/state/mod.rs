mod countdown;
mod game;
mod roles;
mod roster;
mod vote;
mod word;

pub use countdown::Countdown;

use crate::config::GameSettings;
use crate::protocol::ServerMessage;
use crate::types::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// In-memory authority for one game: roster, roles, word, votes and timer.
///
/// Methods are synchronous and run to completion; callers serialize access
/// (see [`AppState`]). One engine is one game, so several concurrent games
/// need several engines.
pub struct SessionEngine {
    players: Vec<Player>,
    word_list: Vec<String>,
    word: String,
    status: GameStatus,
    online: u32,
    result_vote1: Option<Vote1Result>,
    result_vote2: Option<Vote2Result>,
    settings: GameSettings,
    countdown: Option<Countdown>,
    rng: StdRng,
}

impl SessionEngine {
    pub fn new(word_list: Vec<String>, settings: GameSettings) -> Self {
        Self::with_rng(word_list, settings, StdRng::from_os_rng())
    }

    /// Build an engine with a caller-provided RNG (seeded in tests)
    pub fn with_rng(word_list: Vec<String>, settings: GameSettings, rng: StdRng) -> Self {
        let word_list = word_list
            .into_iter()
            .filter(|word| !word.trim().is_empty())
            .collect();

        Self {
            players: Vec::new(),
            word_list,
            word: String::new(),
            status: GameStatus::Idle,
            online: 0,
            result_vote1: None,
            result_vote2: None,
            settings,
            countdown: None,
            rng,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Current secret word, empty outside a round
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn word_list(&self) -> &[String] {
        &self.word_list
    }

    pub fn result_vote1(&self) -> Option<Vote1Result> {
        self.result_vote1
    }

    pub fn result_vote2(&self) -> Option<&Vote2Result> {
        self.result_vote2.as_ref()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<SessionEngine>>,
    /// Broadcast channel for sending messages to every connected client
    pub broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new(engine: SessionEngine) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            engine: Arc::new(RwLock::new(engine)),
            broadcast: tx,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SessionEngine::new(Vec::new(), GameSettings::default()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Deterministic engine for unit tests
    pub(crate) fn engine_with(words: &[&str], settings: GameSettings) -> SessionEngine {
        SessionEngine::with_rng(
            words.iter().map(|w| w.to_string()).collect(),
            settings,
            StdRng::seed_from_u64(7),
        )
    }

    pub(crate) fn engine() -> SessionEngine {
        engine_with(&["Pomme", "Banane"], GameSettings::default())
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = engine();

        assert_eq!(engine.status(), GameStatus::Idle);
        assert!(engine.word().is_empty());
        assert!(engine.players().is_empty());
        assert!(engine.result_vote1().is_none());
        assert!(engine.result_vote2().is_none());
    }

    #[test]
    fn test_word_list_drops_blank_entries() {
        let engine = engine_with(&["Pomme", "", "   ", "Banane"], GameSettings::default());
        assert_eq!(engine.word_list(), ["Pomme", "Banane"]);
    }

    #[tokio::test]
    async fn test_app_state_shares_engine() {
        let state = AppState::default();
        let clone = state.clone();

        state.engine.write().await.add_player("Alice", false);
        assert!(clone.engine.read().await.get_player("Alice").is_some());
    }
}
