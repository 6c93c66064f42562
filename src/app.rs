//! A minimal built-in application.
//!
//! Real deployments plug in their own [`ApplicationFactory`]; this one exists
//! so that the default binary does something sensible when deployed on its
//! own, and so that the routing-mode plumbing has an end-to-end consumer.
//!
//! [`ApplicationFactory`]: crate::handler::ApplicationFactory

use anyhow::Result;
use lambda_http::{
    http::Method, request::RequestContext, Body, Error, Request, RequestExt, Response,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::handler::{AppOptions, Handler, HandlerFuture, SharedHandler};

pub struct ManagerApp {
    options: AppOptions,
}

impl ManagerApp {
    pub fn new(options: AppOptions) -> Self {
        ManagerApp { options }
    }

    /// Usable directly as an [`crate::handler::ApplicationFactory`].
    pub fn factory(options: &AppOptions) -> Result<SharedHandler, Error> {
        Ok(Arc::new(ManagerApp::new(options.clone())))
    }

    /// Prefix under which clients see us.
    ///
    /// On an `execute-api` hostname every URL carries the stage; on a custom
    /// domain the base path mapping hides it.
    fn base_path(&self, stage: Option<&str>) -> String {
        match stage {
            Some(stage) if self.options.is_default_domain() => format!("/{stage}"),
            _ => String::new(),
        }
    }

    fn respond(&self, request: &Request) -> Result<Response<Body>> {
        let stage = stage_name(request);
        let path = strip_stage(request.uri().path(), stage);

        match (request.method(), path) {
            (&Method::GET, "/health") => json_response(200, json!({ "status": "ok" })),

            (&Method::GET, "/manager/get_app_config") => json_response(
                200,
                json!({
                    "base_path": self.base_path(stage),
                    "default_domain": self.options.is_default_domain(),
                    "dev": self.options.dev_mode(),
                    "region": self.options.region,
                }),
            ),

            _ => {
                let mut body = json!({ "message": "Not Found" });

                if self.options.dev_mode() {
                    body["path"] = json!(path);
                }

                json_response(404, body)
            }
        }
    }
}

impl Handler for ManagerApp {
    fn call(&self, request: Request) -> HandlerFuture {
        let response = self.respond(&request).map_err(Error::from);
        Box::pin(async move { response })
    }
}

/// The API Gateway stage this request came through, if it's a named one.
fn stage_name(request: &Request) -> Option<&str> {
    let stage = match request.request_context_ref()? {
        RequestContext::ApiGatewayV1(ctx) => ctx.stage.as_deref(),
        RequestContext::ApiGatewayV2(ctx) => ctx.stage.as_deref(),
        _ => None,
    };

    stage.filter(|s| !s.is_empty() && *s != "$default")
}

/// `lambda_http` prefixes REST API paths with the stage; undo that.
fn strip_stage<'a>(path: &'a str, stage: Option<&str>) -> &'a str {
    let Some(rest) = stage.and_then(|s| path.strip_prefix('/')?.strip_prefix(s)) else {
        return path;
    };

    if rest.is_empty() {
        "/"
    } else if rest.starts_with('/') {
        rest
    } else {
        path
    }
}

fn json_response(status: u16, body: Value) -> Result<Response<Body>> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?)
}
