//! The seam between the adapter and the web application.
//!
//! The application is whatever can turn a [`Request`] into a
//! `Response<Body>`. It gets built by an [`ApplicationFactory`], which is
//! told the routing mode, the profile and the region explicitly rather than
//! having to dig them out of process-global state.

use lambda_http::{Body, Error, Request, Response};
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, PoisonError},
};

use crate::{config::Profile, routing::RoutingMode};

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Response<Body>, Error>> + Send>>;

/// A constructed web application.
///
/// Handlers may be reused across sequential invocations (see
/// [`ReusePolicy::PerRoutingMode`]), so they must not keep per-request state
/// around after a call completes.
pub trait Handler: Send + Sync {
    fn call(&self, request: Request) -> HandlerFuture;
}

pub type SharedHandler = Arc<dyn Handler>;

/// Wraps an async closure as a [`Handler`].
pub struct HandlerFn<F> {
    f: F,
}

pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response<Body>, Error>> + Send + 'static,
{
    HandlerFn { f }
}

impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response<Body>, Error>> + Send + 'static,
{
    fn call(&self, request: Request) -> HandlerFuture {
        Box::pin((self.f)(request))
    }
}

/// Everything the application gets to know about its surroundings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub routing: RoutingMode,
    pub profile: Profile,
    pub region: String,
}

impl AppOptions {
    pub fn is_default_domain(&self) -> bool {
        self.routing.is_default_domain()
    }

    pub fn dev_mode(&self) -> bool {
        self.profile.is_dev()
    }
}

pub trait ApplicationFactory: Send + Sync {
    fn construct(&self, options: &AppOptions) -> Result<SharedHandler, Error>;
}

impl<T> ApplicationFactory for T
where
    T: Fn(&AppOptions) -> Result<SharedHandler, Error> + Send + Sync,
{
    fn construct(&self, options: &AppOptions) -> Result<SharedHandler, Error> {
        self(options)
    }
}

/// Whether constructed handlers outlive the invocation that built them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReusePolicy {
    /// Build a fresh handler for every invocation.
    #[default]
    Rebuild,

    /// Build at most one handler per routing mode and keep it for the
    /// lifetime of the execution environment.
    PerRoutingMode,
}

#[derive(Default)]
pub struct HandlerCache {
    policy: ReusePolicy,
    slots: Mutex<HashMap<RoutingMode, SharedHandler>>,
}

impl HandlerCache {
    pub fn new(policy: ReusePolicy) -> Self {
        HandlerCache {
            policy,
            slots: Mutex::default(),
        }
    }

    /// Get a handler for these options, building one if needed.
    ///
    /// The lock is held across construction. The runtime never overlaps
    /// invocations within one environment, so this never contends in
    /// practice, and it guarantees a single instance per mode.
    pub fn acquire<F>(&self, factory: &F, options: &AppOptions) -> Result<SharedHandler, Error>
    where
        F: ApplicationFactory + ?Sized,
    {
        if self.policy == ReusePolicy::Rebuild {
            return factory.construct(options);
        }

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handler) = slots.get(&options.routing) {
            return Ok(handler.clone());
        }

        let handler = factory.construct(options)?;
        slots.insert(options.routing, handler.clone());
        Ok(handler)
    }
}
