//! Translating between raw invocation payloads and HTTP.
//!
//! The production implementation leans entirely on `lambda_http`, which
//! already knows how to read API Gateway (REST and HTTP API), ALB and
//! WebSocket payloads, and how to shape the response for each of them.
//! `lambda_http::run` would also own the runtime loop; we drive its
//! [`Adapter`] ourselves instead, because the adapter in this crate needs to
//! look at the raw event before it becomes a request.

use lambda_http::{request::LambdaRequest, Adapter, Request};
use lambda_runtime::{service_fn, Context, Error, LambdaEvent, Service};
use serde_json::Value;
use std::{future::Future, pin::Pin};

use crate::handler::SharedHandler;

pub type DispatchFuture = Pin<Box<dyn Future<Output = Result<Value, Error>> + Send>>;

pub trait Dispatch: Send + Sync {
    /// Run `event` through `handler` and produce the raw invocation response.
    fn dispatch(&self, handler: SharedHandler, event: Value, context: Context) -> DispatchFuture;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProxyDispatch;

impl Dispatch for ProxyDispatch {
    fn dispatch(&self, handler: SharedHandler, event: Value, context: Context) -> DispatchFuture {
        Box::pin(proxy(handler, event, context))
    }
}

async fn proxy(handler: SharedHandler, event: Value, context: Context) -> Result<Value, Error> {
    let lambda_request: LambdaRequest = serde_json::from_value(event)?;

    let mut adapter = Adapter::from(service_fn(move |request: Request| handler.call(request)));
    let response = adapter
        .call(LambdaEvent::new(lambda_request, context))
        .await?;

    Ok(serde_json::to_value(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler_fn;
    use lambda_http::{Body, Response};
    use serde_json::json;
    use std::sync::Arc;

    fn echo_path() -> SharedHandler {
        Arc::new(handler_fn(|req: Request| async move {
            let body = json!({ "path": req.uri().path(), "method": req.method().as_str() });
            Ok::<_, Error>(
                Response::builder()
                    .status(201)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))?,
            )
        }))
    }

    fn http_api_event() -> Value {
        json!({
            "version": "2.0",
            "routeKey": "$default",
            "rawPath": "/clusters",
            "rawQueryString": "",
            "headers": { "host": "abc123.execute-api.us-east-1.amazonaws.com" },
            "requestContext": {
                "accountId": "123456789012",
                "apiId": "abc123",
                "domainName": "abc123.execute-api.us-east-1.amazonaws.com",
                "domainPrefix": "abc123",
                "http": {
                    "method": "GET",
                    "path": "/clusters",
                    "protocol": "HTTP/1.1",
                    "sourceIp": "192.0.2.1",
                    "userAgent": "agent"
                },
                "requestId": "id",
                "routeKey": "$default",
                "stage": "$default",
                "time": "12/Mar/2020:19:03:58 +0000",
                "timeEpoch": 1583348638390u64
            },
            "isBase64Encoded": false
        })
    }

    #[tokio::test]
    async fn http_api_round_trip() {
        let response = ProxyDispatch
            .dispatch(echo_path(), http_api_event(), Context::default())
            .await
            .unwrap();

        assert_eq!(response["statusCode"], 201);
        let body: Value = serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
        assert_eq!(body, json!({ "path": "/clusters", "method": "GET" }));
    }

    #[tokio::test]
    async fn unrecognized_payload_fails() {
        let result = ProxyDispatch
            .dispatch(echo_path(), json!({ "hello": "world" }), Context::default())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn handler_errors_propagate() {
        let failing: SharedHandler = Arc::new(handler_fn(|_req: Request| async {
            Err::<Response<Body>, Error>("database unavailable".into())
        }));

        let err = ProxyDispatch
            .dispatch(failing, http_api_event(), Context::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "database unavailable");
    }
}
