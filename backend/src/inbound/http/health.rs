//! Health endpoints: liveness and readiness probes for orchestration and load balancers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::http::StatusCode;

use crate::domain::ApiResult;
use crate::inbound::http::reply::Reply;
use crate::inbound::http::router::HandlerRequest;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_reply(probe_ok: bool) -> Reply {
        let status = if probe_ok {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        Reply::empty(status).no_store()
    }
}

/// Readiness probe: 200 once startup has finished, 503 before.
pub async fn ready(state: Arc<HealthState>, _request: HandlerRequest) -> ApiResult<Reply> {
    Ok(HealthState::probe_reply(state.is_ready()))
}

/// Liveness probe: 200 while the process is marked alive and 503 once draining.
pub async fn live(state: Arc<HealthState>, _request: HandlerRequest) -> ApiResult<Reply> {
    Ok(HealthState::probe_reply(state.is_alive()))
}
