//! Structured logging initialisation via `tracing`.
//!
//! Two output formats are supported:
//! - [`LogFormat::Human`]: human-readable lines (development).
//! - [`LogFormat::Json`]: newline-delimited JSON (log aggregation).
//!
//! `RUST_LOG` overrides the caller-supplied level when set.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Initialise the global tracing subscriber.
///
/// Returns an error instead of panicking when a global subscriber is
/// already installed, so tests may call it repeatedly.
pub fn init_logging(format: LogFormat, level: &str) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Human => registry
            .with(fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true))
            .try_init(),
    }
    .map_err(|e| e.to_string())
}

/// Initialise human-readable logging filtered by `RUST_LOG` only.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_log_format() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("human".parse::<LogFormat>(), Ok(LogFormat::Human));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn second_init_reports_error() {
        let _ = init_logging(LogFormat::Human, "info");
        assert!(init_logging(LogFormat::Json, "debug").is_err());
    }
}
