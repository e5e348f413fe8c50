use serde::Deserialize;

use crate::error::ConfigError;

/// Tunables for a seedOS session. Every field has a default so a host may
/// pass a partial JSON object (or nothing at all).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_columns: u16,
    pub min_rows: u16,
    /// Oldest messages are evicted past this many entries.
    pub message_history_limit: usize,
    pub stability_loss: f64,
    pub max_saves_for_new: usize,
    pub save_key_prefix: String,
    pub rng_seed: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_columns: 100,
            min_rows: 35,
            message_history_limit: 1000,
            stability_loss: 0.1,
            max_saves_for_new: 5,
            save_key_prefix: "seedos.save.".into(),
            rng_seed: None,
            log_level: "info".into(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
