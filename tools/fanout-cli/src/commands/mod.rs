//! CLI command implementations.

pub mod config;
pub mod invoke;
pub mod run;

use std::time::Duration;

use clap::{Args, Subcommand};
use fanout_core::FanoutConfig;

/// Command-line overrides for the configured batch.
#[derive(Args, Debug, Default, Clone)]
pub struct FetchOverrides {
    /// Endpoint URL to fetch (repeatable; replaces the configured list).
    #[arg(short, long = "endpoint", value_name = "URL")]
    pub endpoints: Vec<String>,

    /// Per-request timeout in milliseconds.
    #[arg(short, long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

impl FetchOverrides {
    /// Apply the overrides on top of `config`.
    pub fn apply(&self, mut config: FanoutConfig) -> FanoutConfig {
        if !self.endpoints.is_empty() {
            config = config.with_endpoints(self.endpoints.iter().cloned());
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        config
    }
}

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub fetch: FetchOverrides,

    /// Print the batch metrics summary to stderr.
    #[arg(long)]
    pub summary: bool,

    /// Print the result on a single line.
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the invoke command.
#[derive(Args)]
pub struct InvokeArgs {
    #[command(flatten)]
    pub fetch: FetchOverrides,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Output path (default: fanout.toml in the current directory).
        #[arg(short, long)]
        path: Option<String>,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}
