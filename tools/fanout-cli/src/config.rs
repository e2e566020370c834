//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use fanout_core::FanoutConfig;
use fanout_observability::LogFormat;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Endpoints and timeouts.
    #[serde(default)]
    pub fetch: FanoutConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `FANOUT_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (`human` or `json`).
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "human".to_string()
}

impl LoggingConfig {
    /// Parsed log format, falling back to human-readable output.
    pub fn log_format(&self) -> LogFormat {
        self.format.parse().unwrap_or_default()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Generate a default fanout.toml config file.
pub fn generate_default_config() -> String {
    let endpoints = FanoutConfig::default()
        .endpoints
        .iter()
        .map(|e| format!("    \"{}\",", e))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"# Fanout configuration

[fetch]
# Fetched concurrently; results are reported in this order.
endpoints = [
{endpoints}
]
# Per-request timeout in milliseconds.
timeout_ms = {timeout_ms}
# connect_timeout_ms = 1000

[logging]
# Overridden by the FANOUT_LOG environment variable.
level = "warn"
# "human" or "json"
format = "human"
"#,
        endpoints = endpoints,
        timeout_ms = fanout_core::DEFAULT_TIMEOUT_MS,
    )
}
