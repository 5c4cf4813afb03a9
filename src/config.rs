// Tue Jan 13 2026 - Alex

use crate::error::TRACE_DEPTH;
use crate::utils::logging::LoggingUtils;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_TRACE_DEPTH: &str = "COR_TRACE_DEPTH";
pub const ENV_COLOR: &str = "COR_COLOR";
pub const ENV_PRINT_TRACE: &str = "COR_PRINT_TRACE";
pub const ENV_LOG: &str = "COR_LOG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub trace_depth: usize,
    pub color: bool,
    pub print_trace: bool,
    pub print_cause_chain: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_depth: TRACE_DEPTH,
            color: true,
            print_trace: true,
            print_cause_chain: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace_depth(mut self, depth: usize) -> Self {
        self.trace_depth = depth;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_print_trace(mut self, print_trace: bool) -> Self {
        self.print_trace = print_trace;
        self
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `COR_*` keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_TRACE_DEPTH) {
            config.trace_depth = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TRACE_DEPTH.to_string(),
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_COLOR) {
            config.color = parse_flag(ENV_COLOR, &value)?;
        }
        if let Some(value) = lookup(ENV_PRINT_TRACE) {
            config.print_trace = parse_flag(ENV_PRINT_TRACE, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG) {
            config.log_level = value.trim().to_lowercase();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trace_depth == 0 {
            return Err(ConfigError::ValidationFailed("trace_depth must be greater than 0".to_string()));
        }
        if self.trace_depth > TRACE_DEPTH {
            return Err(ConfigError::ValidationFailed(format!(
                "trace_depth must not exceed {} captured frames",
                TRACE_DEPTH
            )));
        }
        if LoggingUtils::parse_level(&self.log_level).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "log_level".to_string(),
                value: self.log_level.clone(),
            });
        }
        Ok(())
    }

    pub fn log_filter(&self) -> LevelFilter {
        LoggingUtils::level_from_str(&self.log_level)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
