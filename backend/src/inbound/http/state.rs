//! Shared HTTP adapter state.
//!
//! Handlers receive the pieces they need through
//! [`with_state`](crate::inbound::http::router::with_state) so they only depend
//! on domain services and ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::TemplateRenderer;
use crate::domain::{DateStream, UserRepository};
use crate::inbound::http::health::HealthState;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<UserRepository>,
    pub templates: Arc<dyn TemplateRenderer>,
    pub dates: Arc<DateStream>,
    pub health: Arc<HealthState>,
}

impl HttpState {
    /// Bundle the services; health starts live but not ready.
    pub fn new(
        users: UserRepository,
        templates: Arc<dyn TemplateRenderer>,
        dates: DateStream,
    ) -> Self {
        Self {
            users: Arc::new(users),
            templates,
            dates: Arc::new(dates),
            health: Arc::new(HealthState::new()),
        }
    }
}
