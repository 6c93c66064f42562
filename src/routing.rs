//! Figuring out how the caller reached us.
//!
//! API Gateway hands out hostnames like
//! `abc123.execute-api.us-east-1.amazonaws.com`. When we're reached that way
//! the stage name is part of every URL the application emits; behind a custom
//! domain it isn't. The application needs to know which case it's in.

use serde_json::Value;

use crate::error::InvocationError;

const EXECUTE_API_LABEL: &str = "execute-api";
const BASE_DOMAINS: &[&str] = &[".amazonaws.com", ".amazonaws.com.cn"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoutingMode {
    /// Reached through a platform-generated `execute-api` hostname.
    DefaultDomain,

    /// Reached through a caller-configured domain.
    CustomDomain,
}

impl RoutingMode {
    pub fn from_host(host: &str) -> Self {
        if is_execute_api_host(host) {
            RoutingMode::DefaultDomain
        } else {
            RoutingMode::CustomDomain
        }
    }

    pub fn is_default_domain(self) -> bool {
        self == RoutingMode::DefaultDomain
    }
}

/// Pull the `Host` header out of a raw invocation event.
///
/// Only an exact `Host` key counts. HTTP API payloads, which lowercase header
/// names, are rejected here like any other event without it.
pub fn host_header(event: &Value) -> Result<&str, InvocationError> {
    let headers = event
        .get("headers")
        .and_then(Value::as_object)
        .ok_or_else(|| InvocationError::InvalidRequest("missing headers".to_owned()))?;

    match headers.get("Host").and_then(Value::as_str) {
        Some(h) if !h.is_empty() => Ok(h),
        _ => Err(InvocationError::InvalidRequest(
            "missing Host header".to_owned(),
        )),
    }
}

/// `<api-id>.execute-api.<region>[.<more labels>].<base domain>`, with an
/// optional port. The extra labels cover private APIs reached through a VPC
/// endpoint (`<vpce-id>.execute-api.<region>.vpce.amazonaws.com`).
fn is_execute_api_host(host: &str) -> bool {
    let host = host.split(':').next().unwrap_or_default();
    let host = host.to_ascii_lowercase();

    let Some(rest) = BASE_DOMAINS
        .iter()
        .find_map(|suffix| host.strip_suffix(suffix))
    else {
        return false;
    };

    let mut labels = rest.split('.');

    match (labels.next(), labels.next()) {
        (Some(api_id), Some(EXECUTE_API_LABEL)) if !api_id.is_empty() => {
            let mut count = 0;

            for label in labels {
                if label.is_empty() {
                    return false;
                }
                count += 1;
            }

            count > 0
        }
        _ => false,
    }
}
