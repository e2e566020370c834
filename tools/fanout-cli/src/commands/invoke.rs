//! Invocation mode: print the `{statusCode, body}` envelope.

use anyhow::Result;
use fanout_executor::invoke;

use super::InvokeArgs;
use crate::context::Context;

/// Run the invoke command.
pub async fn run(args: InvokeArgs, ctx: &Context) -> Result<()> {
    let config = args.fetch.apply(ctx.config.fetch.clone());

    ctx.output.debug(&format!(
        "Invoking with {} endpoint(s), timeout {}ms",
        config.endpoints.len(),
        config.timeout_ms
    ));

    let response = invoke(&config).await?;
    ctx.output.json(&response)
}
