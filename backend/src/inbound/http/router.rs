//! Explicit, ordered route table.
//!
//! The table is built once at startup and shared read-only by every worker.
//! Dispatch walks the routes in registration order and the first route whose
//! method and pattern both match wins. A path that matches only under a
//! different method falls through to the same empty 404 as an unknown path.
//!
//! Nothing escapes [`Router::dispatch`]: handler errors become status-mapped
//! replies and a panicking handler becomes a redacted 500.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use actix_web::web::Bytes;
use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::{debug, error, warn};

use super::path::{PathParams, PathPattern, PatternError};
use super::reply::Reply;
use crate::domain::{ApiResult, Error, ErrorCode};

/// Errors raised while building the route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("route {method} {pattern} is already registered")]
    Duplicate { method: Method, pattern: String },
}

/// Request as seen by the router.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    method: Method,
    path: String,
    body: Bytes,
}

impl IncomingRequest {
    pub fn new(method: Method, path: impl Into<String>, body: Bytes) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    /// Bodiless request, as used by `GET` and `DELETE`.
    pub fn without_body(method: Method, path: impl Into<String>) -> Self {
        Self::new(method, path, Bytes::new())
    }
}

/// Request handed to a matched handler.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    params: PathParams,
    body: Bytes,
}

impl HandlerRequest {
    pub fn new(params: PathParams, body: Bytes) -> Self {
        Self { params, body }
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// Path variable bound by the route pattern.
    ///
    /// # Errors
    /// An internal error when the pattern does not bind `name`; that is a
    /// wiring mistake, not a client error.
    pub fn param(&self, name: &str) -> ApiResult<&str> {
        self.params
            .get(name)
            .ok_or_else(|| Error::internal(format!("route does not bind path variable `{name}`")))
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Request handler.
///
/// Implemented for any `Fn(HandlerRequest) -> impl Future<Output = ApiResult<Reply>>`,
/// so plain closures and `async fn`s register directly. Use [`with_state`]
/// to bind injected state.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, request: HandlerRequest) -> ApiResult<Reply>;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(HandlerRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<Reply>> + Send + 'static,
{
    async fn call(&self, request: HandlerRequest) -> ApiResult<Reply> {
        (self)(request).await
    }
}

/// Bind shared `state` to a handler function taking it as first argument.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::http::Method;
/// use user_service::domain::ApiResult;
/// use user_service::inbound::http::reply::Reply;
/// use user_service::inbound::http::router::{HandlerRequest, Router, with_state};
///
/// async fn greet(name: Arc<String>, _request: HandlerRequest) -> ApiResult<Reply> {
///     Ok(Reply::text(format!("Hello {name}")))
/// }
///
/// let mut router = Router::new();
/// router
///     .register(Method::GET, "/greet", with_state(Arc::new("Ala".to_owned()), greet))
///     .expect("route registers");
/// ```
pub fn with_state<S, F, Fut>(state: Arc<S>, handler: F) -> impl Handler
where
    S: Send + Sync + 'static + ?Sized,
    F: Fn(Arc<S>, HandlerRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<Reply>> + Send + 'static,
{
    move |request| handler(Arc::clone(&state), request)
}

struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Arc<dyn Handler>,
}

/// Ordered `(method, pattern) -> handler` table.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route.
    ///
    /// # Errors
    /// [`RouteError::Pattern`] for an unparsable pattern and
    /// [`RouteError::Duplicate`] when a route with the same method already
    /// matches exactly the same paths.
    pub fn register<H>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        let pattern = PathPattern::parse(pattern)?;
        let duplicate = self
            .routes
            .iter()
            .any(|route| route.method == method && route.pattern.same_shape(&pattern));
        if duplicate {
            return Err(RouteError::Duplicate {
                method,
                pattern: pattern.as_str().to_owned(),
            });
        }

        self.routes.push(Route {
            method,
            pattern,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn find(&self, method: &Method, path: &str) -> Option<(&Route, PathParams)> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| route.pattern.matches(path).map(|params| (route, params)))
    }

    /// Route `request` to the first matching handler and await its reply.
    pub async fn dispatch(&self, request: IncomingRequest) -> Reply {
        let IncomingRequest { method, path, body } = request;
        let Some((route, params)) = self.find(&method, &path) else {
            debug!(%method, %path, "no route matched");
            return Reply::empty(StatusCode::NOT_FOUND);
        };

        let call = route.handler.call(HandlerRequest::new(params, body));
        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                log_handler_error(&method, route.pattern.as_str(), &err);
                Reply::from_error(&err)
            }
            Err(_) => {
                error!(%method, pattern = %route.pattern, "handler panicked");
                Reply::from_error(&Error::internal("handler panicked"))
            }
        }
    }
}

fn log_handler_error(method: &Method, pattern: &str, err: &Error) {
    match err.code() {
        ErrorCode::InvalidRequest | ErrorCode::NotFound => {
            debug!(%method, pattern, error = %err, "request rejected");
        }
        ErrorCode::ServiceUnavailable => {
            warn!(%method, pattern, error = %err, "backing store unavailable");
        }
        _ => error!(%method, pattern, error = %err, "handler failed"),
    }
}
