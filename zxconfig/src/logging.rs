//! Logging bootstrap
//!
//! Installs a global `tracing` subscriber whose level and console output
//! come from the `host.logger` section of the configuration.

use crate::Config;
use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

/// Parses a level name, case-insensitively
pub fn string_to_level(level: &str) -> Option<Level> {
    match level.to_uppercase().as_str() {
        "TRACE" => Some(Level::TRACE),
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARN" | "WARNING" => Some(Level::WARN),
        "ERROR" => Some(Level::ERROR),
        _ => None,
    }
}

/// Installs the global subscriber
///
/// An unknown `min_level` falls back to `INFO`. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &Config) -> Result<()> {
    let level = config
        .get_log_min_level()
        .ok()
        .and_then(|l| string_to_level(&l))
        .unwrap_or(Level::INFO);

    let console = config.get_log_enable_console().unwrap_or(true).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_ansi(true)
    });

    Registry::default()
        .with(LevelFilter::from_level(level))
        .with(console)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_level() {
        assert_eq!(string_to_level("debug"), Some(Level::DEBUG));
        assert_eq!(string_to_level("Warning"), Some(Level::WARN));
        assert_eq!(string_to_level("verbose"), None);
    }

    #[test]
    fn test_init_logging_installs_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        config.set_log_min_level("debug".to_string()).unwrap();
        config.set_log_enable_console(false).unwrap();

        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_err());
    }
}
