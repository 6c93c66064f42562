//! Lambda front end for the cluster manager web application.
//!
//! This library crate turns API Gateway invocations into ordinary HTTP
//! requests for the cluster manager application and hands the results back
//! in whatever shape the invoking service expects. It is compiled into two
//! executables: `cluster-manager-lambda`, the actual Lambda entry point, and
//! `cluster-manager-lambda-oneshot`, which runs a single event from the
//! command line for local testing.
//!
//! The flow for one invocation is:
//!
//! 1. look at the `Host` header to decide whether we were reached through a
//!    platform-generated `execute-api` domain or a custom domain;
//! 2. obtain an application handler for that routing mode from an
//!    [`ApplicationFactory`];
//! 3. let `lambda_http` translate the event into a request, run it through
//!    the handler and translate the response back.
//!
//! Any failure along the way is logged and then reported to the caller as a
//! single opaque [`FatalError`].

use lambda_runtime::tracing;
use tracing_subscriber::EnvFilter;

pub mod adapter;
pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod region;
pub mod routing;

pub use adapter::InvocationAdapter;
pub use config::{Profile, Settings};
pub use dispatch::{Dispatch, ProxyDispatch};
pub use error::{FatalError, InvocationError, FATAL_MESSAGE};
pub use handler::{
    handler_fn, AppOptions, ApplicationFactory, Handler, ReusePolicy, SharedHandler,
};
pub use routing::RoutingMode;

/// Install the process-wide log subscriber.
///
/// `RUST_LOG` wins if set; otherwise the profile picks the level.
pub fn init_logging(profile: Profile) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(profile.default_log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // don't print the module name
        .without_time() // don't print time (CloudWatch has it)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?profile, "logging initialized");
}
