//! "Oneshot" version of the cluster manager Lambda.
//!
//! This executable runs a single invocation event, given on the command
//! line, through the same adapter the Lambda uses and prints the response
//! JSON. Pass either the event JSON text itself or `@path/to/event.json`.
//! `AWS_REGION` (or any region the AWS config chain can find) must be set.

use anyhow::Context as _;
use lambda_runtime::{Context, Error};
use serde_json::Value;
use std::{env, fs};

use cluster_manager_lambda::{app::ManagerApp, InvocationAdapter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut args = env::args();
    args.next(); // skip argv[0]

    let arg = args.next().ok_or_else(|| -> Error {
        "first argument should be the event JSON text, or @FILE to read it from".into()
    })?;

    let json_text = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading `{path}`"))?,
        None => arg,
    };

    let payload: Value =
        serde_json::from_str(&json_text).context("event is not valid JSON")?;

    let adapter = InvocationAdapter::init(ManagerApp::factory).await?;
    let result = adapter.handle(payload, Context::default()).await?;

    serde_json::to_writer(std::io::stdout().lock(), &result)?;
    Ok(())
}
