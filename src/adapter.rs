//! Turning one Lambda invocation into one call of the web application.

use lambda_runtime::{tracing, Context, Error};
use serde_json::Value;

use crate::{
    config::Settings,
    dispatch::{Dispatch, ProxyDispatch},
    error::{FatalError, InvocationError},
    handler::{AppOptions, ApplicationFactory, HandlerCache, ReusePolicy},
    region,
    routing::{host_header, RoutingMode},
};

pub struct InvocationAdapter<F, D = ProxyDispatch> {
    settings: Settings,
    factory: F,
    dispatcher: D,
    handlers: HandlerCache,
}

impl<F: ApplicationFactory> InvocationAdapter<F> {
    /// Set up logging and settings for a Lambda process.
    pub async fn init(factory: F) -> Result<Self, Error> {
        let settings = Settings::load().await;
        crate::init_logging(settings.profile);

        tracing::info!(
            profile = ?settings.profile,
            region = ?settings.region,
            "invocation adapter ready"
        );

        Ok(Self::new(settings, factory))
    }

    pub fn new(settings: Settings, factory: F) -> Self {
        InvocationAdapter {
            settings,
            factory,
            dispatcher: ProxyDispatch,
            handlers: HandlerCache::default(),
        }
    }
}

impl<F: ApplicationFactory, D: Dispatch> InvocationAdapter<F, D> {
    pub fn with_dispatcher<D2: Dispatch>(self, dispatcher: D2) -> InvocationAdapter<F, D2> {
        InvocationAdapter {
            settings: self.settings,
            factory: self.factory,
            dispatcher,
            handlers: self.handlers,
        }
    }

    pub fn with_reuse(mut self, policy: ReusePolicy) -> Self {
        self.handlers = HandlerCache::new(policy);
        self
    }

    /// Handle one invocation.
    ///
    /// On success this is exactly what the dispatcher produced. Every failure
    /// is logged in full here and then replaced by [`FatalError`], so nothing
    /// about our internals reaches the caller.
    pub async fn handle(&self, event: Value, context: Context) -> Result<Value, Error> {
        let request_id = context.request_id.clone();

        match self.try_handle(event, context).await {
            Ok(response) => Ok(response),

            Err(err) => {
                tracing::error!(
                    request_id = %request_id,
                    kind = err.kind(),
                    "Unexpected exception: {}",
                    err.chain()
                );
                Err(FatalError.into())
            }
        }
    }

    async fn try_handle(&self, event: Value, context: Context) -> Result<Value, InvocationError> {
        tracing::debug!(request_id = %context.request_id, %event, "processing invocation");

        let host = host_header(&event)?;
        let routing = RoutingMode::from_host(host);

        tracing::info!(
            request_id = %context.request_id,
            host,
            default_domain = routing.is_default_domain(),
            "resolved routing mode"
        );

        let region = self
            .settings
            .region
            .clone()
            .ok_or(InvocationError::MissingRegion)?;

        let options = AppOptions {
            routing,
            profile: self.settings.profile,
            region,
        };

        let handler = self
            .handlers
            .acquire(&self.factory, &options)
            .map_err(InvocationError::ConstructionFailure)?;

        region::export_default_region(&options.region);

        self.dispatcher
            .dispatch(handler, event, context)
            .await
            .map_err(InvocationError::DispatchFailure)
    }
}
