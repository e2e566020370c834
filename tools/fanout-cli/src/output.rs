//! Output formatting for the CLI.
//!
//! Batch results are the only thing written to stdout; every status
//! message goes to stderr.

use console::style;
use fanout_observability::LogFormat;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler.
    ///
    /// `quiet` suppresses decorated status messages, e.g. when stderr
    /// carries JSON logs.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Output handler matching the stderr log format; JSON logs mean quiet.
    pub fn for_log_format(verbose: bool, format: LogFormat) -> Self {
        Self::new(verbose, format == LogFormat::Json)
    }

    /// Check if decorated output is suppressed.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.quiet {
            return;
        }
        eprintln!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.quiet {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.quiet {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.quiet {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.quiet {
            return;
        }
        eprintln!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.quiet {
            return;
        }
        eprintln!("  {}: {}", style(key).dim(), value);
    }

    /// Print a diagnostic report to stderr, even in quiet mode.
    pub fn report(&self, text: &str) {
        eprintln!("{}", text);
    }

    /// Print a result payload to stdout.
    pub fn result(&self, text: &str) {
        println!("{}", text);
    }

    /// Print JSON output to stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<()> {
        self.result(&serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Format a microsecond duration as a human-readable string.
pub fn format_duration_us(us: u64) -> String {
    if us < 1_000 {
        format!("{}us", us)
    } else if us < 1_000_000 {
        format!("{:.1}ms", us as f64 / 1_000.0)
    } else {
        format!("{:.2}s", us as f64 / 1_000_000.0)
    }
}
