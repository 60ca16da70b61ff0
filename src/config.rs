//! Process configuration loaded from the environment

use crate::error::ConfigError;
use crate::types::DEFAULT_COUNTDOWN_SECONDS;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_WORD_LIST_PATH: &str = "words/famille.csv";

/// Rules fixed for the lifetime of a session
#[derive(Debug, Clone)]
pub struct GameSettings {
    /// Add the "no Traitor" ghost entry to every round
    pub traitor_optional: bool,
    /// Starting value of the discussion countdown
    pub countdown_seconds: u32,
    /// Time between countdown ticks
    pub tick_interval: Duration,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            traitor_optional: true,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            tick_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub word_list_path: PathBuf,
    pub settings: GameSettings,
}

impl Config {
    /// Load config from environment variables
    /// PORT, WORD_LIST_PATH, TRAITOR_OPTIONAL and COUNTDOWN_SECONDS are all optional
    pub fn from_env() -> Self {
        let defaults = GameSettings::default();

        let port = env_or("PORT", DEFAULT_PORT);
        let word_list_path = std::env::var("WORD_LIST_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_WORD_LIST_PATH.to_string())
            .into();

        let traitor_optional = match std::env::var("TRAITOR_OPTIONAL") {
            Ok(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    "Invalid TRAITOR_OPTIONAL value {:?}, using {}",
                    raw,
                    defaults.traitor_optional
                );
                defaults.traitor_optional
            }),
            Err(_) => defaults.traitor_optional,
        };

        let countdown_seconds = env_or("COUNTDOWN_SECONDS", defaults.countdown_seconds);

        Self {
            port,
            word_list_path,
            settings: GameSettings {
                traitor_optional,
                countdown_seconds,
                ..defaults
            },
        }
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value {:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a line-delimited word list. Blank lines are dropped.
pub fn load_word_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::WordList {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
