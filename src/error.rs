//! Failure taxonomy for a single invocation.
//!
//! Internally we keep track of *why* an invocation failed so that the logs
//! say something useful. The caller only ever sees [`FatalError`], whose
//! message is fixed: API Gateway may relay Lambda error payloads to
//! clients, and we don't want internals showing up there.

use lambda_runtime::Error;

/// The only failure message a caller ever receives.
pub const FATAL_MESSAGE: &str =
    "Unexpected fatal exception. Please look at API logs for details on the encountered failure.";

#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// The event lacks the routing information we need.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Neither the platform nor the local configuration told us our region.
    #[error("no execution region available (is AWS_REGION set?)")]
    MissingRegion,

    /// The application factory failed.
    #[error("failed to construct the application handler")]
    ConstructionFailure(#[source] Error),

    /// The translation layer or the application itself failed.
    #[error("failed to dispatch the request")]
    DispatchFailure(#[source] Error),
}

impl InvocationError {
    /// Stable tag for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            InvocationError::InvalidRequest(_) => "invalid_request",
            InvocationError::MissingRegion => "missing_region",
            InvocationError::ConstructionFailure(_) => "construction_failure",
            InvocationError::DispatchFailure(_) => "dispatch_failure",
        }
    }

    /// Render the error together with every underlying cause.
    pub fn chain(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);

        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }

        text
    }
}

/// Opaque failure handed back to the Lambda runtime.
#[derive(Debug, thiserror::Error)]
#[error("{}", FATAL_MESSAGE)]
pub struct FatalError;
