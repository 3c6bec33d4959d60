//! Diagnostic logging configuration
//!
//! Only affects what goes to stderr through `tracing`; the stopwatch lines on
//! stdout are fixed literals and are never configurable.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "stopwatch_helper=info";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive applied when the environment provides none
    pub default_filter: String,

    /// Emit ANSI colours on stderr
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: DEFAULT_FILTER.to_string(),
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let ansi = std::env::var("STOPWATCH_LOG_ANSI")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(true);

        Self {
            ansi,
            ..Self::default()
        }
    }

    /// Build the filter, preferring `RUST_LOG` over the configured default.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| self.fallback_filter())
    }

    fn fallback_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.default_filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
