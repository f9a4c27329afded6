//! Logging System
//!
//! Structured logging through `tracing`. Standard output belongs to the
//! metadata document, so log lines go to stderr or to a log file.
//!
//! Settings are read from the agent's environment snapshot:
//! - `OCF_RA_LOG`: filter directives, e.g. `debug` or `ocf_ra=trace`
//! - `HA_debug`: `1`, `yes` or `true` raises the default level to debug
//! - `HA_LOGFILE`: append to this file instead of stderr

use crate::env::Environment;
use crate::error::{OcfError, Result};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const DEFAULT_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// Explicit filter directives; win over `debug`.
    pub filter: Option<String>,
    pub debug: bool,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_env(env: &Environment) -> Self {
        let debug = env
            .get("HA_debug")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "yes" | "true"))
            .unwrap_or(false);

        Self {
            filter: env
                .get("OCF_RA_LOG")
                .filter(|f| !f.trim().is_empty())
                .map(str::to_string),
            debug,
            file: env
                .get("HA_LOGFILE")
                .filter(|f| !f.is_empty())
                .map(PathBuf::from),
        }
    }

    fn directives(&self) -> &str {
        match &self.filter {
            Some(filter) => filter.as_str(),
            None if self.debug => "debug",
            None => DEFAULT_LEVEL,
        }
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(settings: &LogSettings) -> Result<()> {
    let filter = build_env_filter(settings)?;
    let base_subscriber = Registry::default().with(filter);

    let result = match &settings.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    OcfError::Generic(format!(
                        "Failed to open log file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            base_subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| OcfError::Generic(format!("Failed to initialize logging: {}", e)))
}

fn build_env_filter(settings: &LogSettings) -> Result<EnvFilter> {
    EnvFilter::try_new(settings.directives())
        .map_err(|e| OcfError::Generic(format!("Invalid log directive: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = LogSettings::from_env(&Environment::default());
        assert_eq!(settings, LogSettings::default());
        assert_eq!(settings.directives(), "warn");
    }

    #[test]
    fn test_ha_debug_raises_level() {
        let env = Environment::from_pairs([("HA_debug", "1")]);
        assert_eq!(LogSettings::from_env(&env).directives(), "debug");

        let env = Environment::from_pairs([("HA_debug", "0")]);
        assert_eq!(LogSettings::from_env(&env).directives(), "warn");
    }

    #[test]
    fn test_explicit_filter_wins() {
        let env = Environment::from_pairs([("HA_debug", "yes"), ("OCF_RA_LOG", "ocf_ra=trace")]);
        let settings = LogSettings::from_env(&env);
        assert_eq!(settings.directives(), "ocf_ra=trace");
        assert!(build_env_filter(&settings).is_ok());
    }

    #[test]
    fn test_logfile() {
        let env = Environment::from_pairs([("HA_LOGFILE", "/var/log/ha.log")]);
        assert_eq!(
            LogSettings::from_env(&env).file,
            Some(PathBuf::from("/var/log/ha.log"))
        );
    }
}
