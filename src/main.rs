//! The Lambda entry point.
//!
//! Invocations arrive as raw JSON so that the adapter can inspect them
//! before `lambda_http` turns them into requests. The Lambda runtime hands
//! us one event at a time, so the adapter is only ever borrowed by a single
//! invocation.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;

use cluster_manager_lambda::{app::ManagerApp, InvocationAdapter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let adapter = InvocationAdapter::init(ManagerApp::factory).await?;
    let ref_adapter = &adapter;

    run(service_fn(|event: LambdaEvent<Value>| async move {
        let (payload, context) = event.into_parts();
        ref_adapter.handle(payload, context).await
    }))
    .await?;
    Ok(())
}
