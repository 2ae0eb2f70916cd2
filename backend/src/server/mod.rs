//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_service::Trace;
use user_service::domain::UserRepository;
use user_service::inbound::http::router::Router;
use user_service::inbound::http::routes::build_router;
use user_service::inbound::http::service::dispatch;

use state_builders::{build_http_state, build_user_store, seed_users};

fn build_app(
    router: web::Data<Router>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(router)
        .wrap(Trace)
        .default_service(web::to(dispatch))
}

/// Construct an Actix HTTP server for `config`.
///
/// Builds the configured store, optionally seeds it, builds the route table,
/// and binds the listener. Readiness is reported once the listener is bound;
/// liveness fails once Ctrl-C starts the graceful drain.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the route table is invalid or binding
/// the socket fails. An unreachable store is not an error.
pub async fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        store,
        seed_on_startup,
        pool_max_size,
        pool_timeout,
    } = config;

    let users = UserRepository::new(build_user_store(&store, pool_max_size, pool_timeout).await);
    if seed_on_startup {
        seed_users(&users).await;
    }

    let http_state = build_http_state(users);
    let router = build_router(&http_state).map_err(|err| std::io::Error::other(err.to_string()))?;
    let router = web::Data::new(router);

    let server = HttpServer::new(move || build_app(router.clone()))
        .bind(bind_addr)?
        .run();

    http_state.health.mark_ready();
    let health = Arc::clone(&http_state.health);
    actix_web::rt::spawn(async move {
        if actix_web::rt::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested; failing liveness while draining");
            health.mark_unhealthy();
        }
    });
    Ok(server)
}
