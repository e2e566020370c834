//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(path.as_deref(), force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "built-in defaults"),
    }

    ctx.output.json(&ctx.config)
}

fn init_config(path: Option<&str>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(path.unwrap_or(CONFIG_NAMES[0]));

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if config_path.extension().is_some_and(|ext| ext == "json") {
        CliConfig::default().save(&config_path)?;
    } else {
        std::fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config.fetch);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Check a fetch configuration, returning `(errors, warnings)`.
fn check_config(config: &fanout_core::FanoutConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.timeout_ms == 0 {
        errors.push("fetch.timeout_ms must be greater than 0".to_string());
    }

    if config.endpoints.is_empty() {
        warnings.push("fetch.endpoints is empty; every run returns []".to_string());
    }

    for (i, endpoint) in config.endpoints.iter().enumerate() {
        let url = endpoint.url();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            warnings.push(format!(
                "fetch.endpoints[{}] '{}' is not an http(s) URL and will fail",
                i, url
            ));
        }
    }

    if let Some(connect) = config.connect_timeout_ms {
        if connect > config.timeout_ms {
            warnings.push(format!(
                "fetch.connect_timeout_ms ({}) exceeds timeout_ms ({}) and is capped",
                connect, config.timeout_ms
            ));
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fanout_core::FanoutConfig;

    use super::*;
    use crate::output::Output;

    fn context_in(dir: &std::path::Path) -> Context {
        Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_init_writes_toml_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        init_config(None, false, &ctx).unwrap();
        let written = CliConfig::load(&dir.path().join("fanout.toml")).unwrap();
        assert_eq!(written.fetch, FanoutConfig::default());

        let err = init_config(None, false, &ctx).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        init_config(None, true, &ctx).unwrap();
    }

    #[test]
    fn test_init_json_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        init_config(Some("fanout.json"), false, &ctx).unwrap();

        let written = CliConfig::load(&dir.path().join("fanout.json")).unwrap();
        assert_eq!(written.fetch, FanoutConfig::default());
    }

    #[test]
    fn test_check_default_config_is_clean() {
        let (errors, warnings) = check_config(&FanoutConfig::default());
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_check_zero_timeout_is_error() {
        let config = FanoutConfig::default().with_timeout(Duration::ZERO);
        let (errors, _) = check_config(&config);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_check_warnings() {
        let config = FanoutConfig::new(["ftp://files", "http://ok"], Duration::from_secs(1))
            .with_connect_timeout(Duration::from_secs(2));

        let (errors, warnings) = check_config(&config);

        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("fetch.endpoints[0]"));
    }

    #[test]
    fn test_check_empty_endpoints_warns() {
        let config = FanoutConfig::new(Vec::<&str>::new(), Duration::from_secs(1));
        let (_, warnings) = check_config(&config);
        assert_eq!(warnings.len(), 1);
    }
}
