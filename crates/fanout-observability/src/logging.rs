//! Structured logging setup.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "FANOUT_LOG";

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    Json,
    /// Human-readable format (for development).
    #[default]
    Human,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Human => write!(f, "human"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "human" | "text" => Ok(Self::Human),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// Build the filter: `FANOUT_LOG` when set and valid, else `default_directive`.
pub fn log_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize the global `tracing` subscriber.
///
/// Logs go to stderr so stdout stays reserved for batch output. Only the
/// first call has an effect; a subscriber installed elsewhere is left alone.
pub fn init_logging(format: LogFormat, default_directive: &str) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let builder = tracing_fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_env_filter(log_filter(default_directive));

        let installed = match format {
            LogFormat::Json => builder.json().try_init().is_ok(),
            LogFormat::Human => builder.try_init().is_ok(),
        };

        if !installed {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::debug!(format = %format, "logging initialized");
    });
}
