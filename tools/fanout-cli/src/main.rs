//! Fanout CLI - Fetch a batch of JSON endpoints concurrently.
//!
//! Commands:
//! - `fanout run` - Fetch every endpoint and print the raw results
//! - `fanout invoke` - Fetch every endpoint and print the `{statusCode, body}` envelope
//! - `fanout config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fanout_observability::{init_logging, LogFormat};

use commands::{ConfigArgs, InvokeArgs, RunArgs};

/// Fanout - Concurrent JSON fetch with per-endpoint failure isolation
#[derive(Parser)]
#[command(name = "fanout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all endpoints and print the raw batch result
    Run(RunArgs),

    /// Fetch all endpoints and print the invocation response envelope
    Invoke(InvokeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Until the config is loaded only the flag says whether stderr is JSON
    let output = output::Output::new(cli.verbose, cli.json_logs);

    // Load config
    let config_path = cli.config.as_deref();
    let mut ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let format = log_format(cli.json_logs, &ctx.config.logging);
    ctx.output = output::Output::for_log_format(cli.verbose, format);
    let level = if cli.verbose {
        "debug"
    } else {
        ctx.config.logging.level.as_str()
    };
    init_logging(format, level);

    // Execute command
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, &ctx).await,
        Commands::Invoke(args) => commands::invoke::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %format!("{:#}", e), "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Effective log format: `--json-logs` wins over the config file.
fn log_format(json_logs: bool, logging: &config::LoggingConfig) -> LogFormat {
    if json_logs {
        LogFormat::Json
    } else {
        logging.log_format()
    }
}
