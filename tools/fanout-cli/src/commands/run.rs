//! Local execution: fetch the batch and print the raw results.

use anyhow::Result;
use fanout_core::InvocationId;
use fanout_executor::run_batch;
use fanout_observability::BatchMetrics;

use super::RunArgs;
use crate::context::Context;
use crate::output::format_duration_us;

/// Run the run command.
pub async fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let config = args.fetch.apply(ctx.config.fetch.clone());
    let invocation_id = InvocationId::generate();

    ctx.output.debug(&format!(
        "Invocation {}: {} endpoint(s), timeout {}ms",
        invocation_id,
        config.endpoints.len(),
        config.timeout_ms
    ));

    let spinner = ctx
        .output
        .spinner(&format!("Fetching {} endpoint(s)...", config.endpoints.len()));
    let outcome = run_batch(&config, invocation_id).await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    let rendered = if args.compact {
        outcome.results.to_json()?
    } else {
        outcome.results.to_json_pretty()?
    };
    ctx.output.result(&rendered);

    if args.summary {
        ctx.output
            .report(&render_summary(&outcome.metrics, ctx.output.is_quiet()));
    }

    let metrics = &outcome.metrics;
    if metrics.failed > 0 {
        ctx.output.warn(&format!(
            "{} of {} endpoint(s) failed ({})",
            metrics.failed,
            metrics.endpoints.len(),
            format_duration_us(metrics.total_duration_us)
        ));
    } else {
        ctx.output.success(&format!(
            "{} endpoint(s) fetched ({})",
            metrics.succeeded,
            format_duration_us(metrics.total_duration_us)
        ));
    }

    Ok(())
}

/// Metrics summary for stderr: one JSON line alongside JSON logs, else text.
fn render_summary(metrics: &BatchMetrics, quiet: bool) -> String {
    if quiet {
        metrics.to_json()
    } else {
        metrics.to_summary()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fanout_observability::MetricsCollector;

    use super::*;

    fn metrics() -> BatchMetrics {
        let mut collector = MetricsCollector::new(InvocationId::from_string("inv-7"));
        collector.record_endpoint("http://a", Duration::from_millis(5), "succeeded", true, None);
        collector.finalize()
    }

    #[test]
    fn test_summary_is_json_when_quiet() {
        let rendered = render_summary(&metrics(), true);

        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["invocation_id"], "inv-7");
        assert_eq!(json["succeeded"], 1);
    }

    #[test]
    fn test_summary_is_text_otherwise() {
        let rendered = render_summary(&metrics(), false);

        assert!(rendered.starts_with("Invocation: inv-7"));
        assert!(rendered.contains("http://a"));
    }
}
