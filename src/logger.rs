use std::sync::Once;

use tracing_subscriber::fmt;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Initialise tracing subscriber once per process.
pub fn init_logging() {
    init_logging_with(&LoggingConfig::from_env());
}

/// Like [`init_logging`] with an explicit configuration. Later calls are no-ops.
pub fn init_logging_with(config: &LoggingConfig) {
    INIT.call_once(|| {
        // Another subscriber may already be installed by the host program.
        let _ = fmt()
            .with_env_filter(config.env_filter())
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(false)
            .compact()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        let config = LoggingConfig {
            ansi: false,
            ..LoggingConfig::default()
        };
        init_logging_with(&config);
        init_logging_with(&config);
        init_logging();
        tracing::info!("logging initialised");
    }
}
