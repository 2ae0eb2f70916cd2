//! The route table.
//!
//! ```text
//! GET    /
//! GET    /hello
//! GET    /hello-event
//! GET    /date
//! GET    /api/user
//! POST   /api/user
//! GET    /api/user/{id}
//! PUT    /api/user/{id}
//! DELETE /api/user/{id}
//! GET    /health/ready
//! GET    /health/live
//! ```

use actix_web::http::Method;

use crate::inbound::http::router::{RouteError, Router, with_state};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{health, pages, users};

/// Build the router for `state`, registering routes in table order.
///
/// # Errors
/// [`RouteError`] when a pattern is malformed or registered twice.
pub fn build_router(state: &HttpState) -> Result<Router, RouteError> {
    let mut router = Router::new();
    let repo = &state.users;

    router.register(Method::GET, "/", with_state(state.templates.clone(), pages::index))?;
    router.register(Method::GET, "/hello", pages::hello)?;
    router.register(Method::GET, "/hello-event", pages::hello_event)?;
    router.register(Method::GET, "/date", with_state(state.dates.clone(), pages::date))?;

    router.register(Method::GET, "/api/user", with_state(repo.clone(), users::list_users))?;
    router.register(Method::POST, "/api/user", with_state(repo.clone(), users::create_user))?;
    router.register(Method::GET, "/api/user/{id}", with_state(repo.clone(), users::get_user))?;
    router.register(
        Method::PUT,
        "/api/user/{id}",
        with_state(repo.clone(), users::update_user),
    )?;
    router.register(
        Method::DELETE,
        "/api/user/{id}",
        with_state(repo.clone(), users::delete_user),
    )?;

    router.register(
        Method::GET,
        "/health/ready",
        with_state(state.health.clone(), health::ready),
    )?;
    router.register(
        Method::GET,
        "/health/live",
        with_state(state.health.clone(), health::live),
    )?;

    Ok(router)
}
