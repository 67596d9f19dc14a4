//! # Configuration Module
//!
//! Command words, option labels and runtime settings for the booking bot.
//! Runtime settings are read from the environment (optionally via a `.env` file).

use std::env;

// Command words, matched case-insensitively against the trimmed message text
pub const HELP_COMMAND: &str = "help";
pub const WAIT_COMMAND: &str = "wait";
pub const CONTINUE_COMMAND: &str = "continue";
pub const CANCEL_COMMAND: &str = "cancel";

/// Guests younger than this are turned away at the room-type step
pub const DEFAULT_MINIMUM_AGE: i32 = 18;

// State property names used to build storage keys
pub const DIALOG_STATE_PROPERTY: &str = "DialogState";
pub const USER_PROFILE_PROPERTY: &str = "UserProfile";

/// Errors raised while reading configuration from the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" | "" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidValue {
                key: "LOG_FORMAT".to_string(),
                message: format!("expected `pretty` or `json`, got `{other}`"),
            }),
        }
    }
}

/// Settings that shape the booking conversation itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// Minimum guest age accepted at the room-type step
    pub minimum_age: i32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            minimum_age: DEFAULT_MINIMUM_AGE,
        }
    }
}

/// Top-level bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram_bot_token: String,
    pub log_format: LogFormat,
    pub flow: FlowConfig,
}

impl BotConfig {
    /// Build the configuration from environment variables.
    ///
    /// `TELEGRAM_BOT_TOKEN` is required; `LOG_FORMAT` and `BOOKING_MINIMUM_AGE`
    /// fall back to their defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()))?;

        let log_format = match env::var("LOG_FORMAT") {
            Ok(value) => LogFormat::parse(&value)?,
            Err(_) => LogFormat::default(),
        };

        let minimum_age = match env::var("BOOKING_MINIMUM_AGE") {
            Ok(value) => parse_minimum_age(&value)?,
            Err(_) => DEFAULT_MINIMUM_AGE,
        };

        Ok(Self {
            telegram_bot_token,
            log_format,
            flow: FlowConfig { minimum_age },
        })
    }
}

fn parse_minimum_age(value: &str) -> Result<i32, ConfigError> {
    let age = value
        .trim()
        .parse::<i32>()
        .map_err(|e| ConfigError::InvalidValue {
            key: "BOOKING_MINIMUM_AGE".to_string(),
            message: e.to_string(),
        })?;

    if age < 0 {
        return Err(ConfigError::InvalidValue {
            key: "BOOKING_MINIMUM_AGE".to_string(),
            message: "must not be negative".to_string(),
        });
    }

    Ok(age)
}

/// Case-insensitive comparison of trimmed input against a command word
pub fn is_command(text: &str, command: &str) -> bool {
    text.trim().eq_ignore_ascii_case(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_config_defaults() {
        assert_eq!(FlowConfig::default().minimum_age, 18);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::parse("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON ").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty").unwrap(), LogFormat::Pretty);
        assert!(LogFormat::parse("xml").is_err());
    }

    #[test]
    fn test_minimum_age_parsing() {
        assert_eq!(parse_minimum_age("21").unwrap(), 21);
        assert!(parse_minimum_age("-1").is_err());
        assert!(parse_minimum_age("eighteen").is_err());
    }

    #[test]
    fn test_command_matching() {
        assert!(is_command("  WAIT ", WAIT_COMMAND));
        assert!(is_command("Cancel", CANCEL_COMMAND));
        assert!(!is_command("wait please", WAIT_COMMAND));
    }
}
