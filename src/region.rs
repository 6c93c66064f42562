//! Exposing the execution region as the process-wide default.
//!
//! The application gets its region through [`crate::handler::AppOptions`],
//! but libraries it pulls in may only look at `AWS_DEFAULT_REGION`. We set
//! that once per process; the execution region can't change underneath a
//! running environment.

use lambda_runtime::tracing;
use once_cell::sync::OnceCell;
use std::env;

pub const DEFAULT_REGION_VAR: &str = "AWS_DEFAULT_REGION";

static EXPORTED: OnceCell<String> = OnceCell::new();

/// Make `region` the default region for the rest of this process.
///
/// Only the first call in a process writes the variable. A later call with a
/// different region leaves the first value in place and logs a warning, so
/// `AWS_DEFAULT_REGION` matches the region of a given call only while every
/// call in the process carries the same one, as it does on Lambda.
///
/// Returns the region that is actually in effect.
pub fn export_default_region(region: &str) -> &'static str {
    let exported = EXPORTED.get_or_init(|| {
        tracing::debug!(region, "setting {DEFAULT_REGION_VAR}");
        env::set_var(DEFAULT_REGION_VAR, region);
        region.to_owned()
    });

    if exported != region {
        tracing::warn!(
            exported = exported.as_str(),
            requested = region,
            "execution region changed within one environment; keeping the first"
        );
    }

    exported
}
