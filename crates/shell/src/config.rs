//! Shell configuration from the environment.
//!
//! - `STOCKLEDGER_PROMPT`: prompt printed before each command
//! - `STOCKLEDGER_LOG_FORMAT`: `json` or `text`
//!
//! The log filter itself comes from `RUST_LOG` (see `stockledger-observability`).

use thiserror::Error;

use stockledger_observability::{LogFormat, ParseLogFormatError};

pub const PROMPT_VAR: &str = "STOCKLEDGER_PROMPT";
pub const LOG_FORMAT_VAR: &str = "STOCKLEDGER_LOG_FORMAT";
pub const DEFAULT_PROMPT: &str = "Enter command: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("STOCKLEDGER_LOG_FORMAT: {0}")]
    LogFormat(#[from] ParseLogFormatError),
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(prompt) = lookup(PROMPT_VAR) {
            config.prompt = prompt;
        }
        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            config.log_format = format.parse()?;
        }
        Ok(config)
    }
}
