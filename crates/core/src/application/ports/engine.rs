//! The routing engine port (spec §6) and the handle that conveys
//! cancellation, timeout, and progress/point-check reporting into it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use navdispatch_domain::{Checkpoints, Direction, ResultCode};

/// An engine exception (the routing engine's "root exception family"): any
/// such failure is caught at exactly one point — the worker — and converted
/// to `ResultCode::InternalError`.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What a successful `calculate_route` call produces: the code plus,
/// when meaningful, a distance. The dispatcher tags the `Route` itself
/// (engine name + route id); the engine only reports distance and outcome.
#[derive(Debug, Clone)]
pub struct RouteOutcome {
    pub code: ResultCode,
    pub distance_m: Option<f64>,
}

impl RouteOutcome {
    pub fn new(code: ResultCode, distance_m: Option<f64>) -> Self {
        Self { code, distance_m }
    }

    pub fn ok(distance_m: f64) -> Self {
        Self::new(ResultCode::NoError, Some(distance_m))
    }

    pub fn failed(code: ResultCode) -> Self {
        debug_assert_ne!(code, ResultCode::NoError);
        Self::new(code, None)
    }
}

/// Conveys cancellation, timeout, and progress/point-check reporting from
/// the dispatcher into the engine for the lifetime of a single
/// `calculate_route` call. Built by `DelegateProxy::engine_delegate`.
#[derive(Clone)]
pub struct EngineDelegateHandle {
    cancel_token: CancellationToken,
    timeout: Duration,
    on_progress: Arc<dyn Fn(f32) + Send + Sync>,
    #[cfg(feature = "debug_point_check")]
    on_point_check: Arc<dyn Fn(navdispatch_domain::GeoPoint) + Send + Sync>,
}

impl EngineDelegateHandle {
    pub(crate) fn new(
        cancel_token: CancellationToken,
        timeout: Duration,
        on_progress: Arc<dyn Fn(f32) + Send + Sync>,
        #[cfg(feature = "debug_point_check")] on_point_check: Arc<
            dyn Fn(navdispatch_domain::GeoPoint) + Send + Sync,
        >,
    ) -> Self {
        Self {
            cancel_token,
            timeout,
            on_progress,
            #[cfg(feature = "debug_point_check")]
            on_point_check,
        }
    }

    /// The engine should poll this cooperatively and return
    /// `ResultCode::Cancelled` promptly once it flips true.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Reports progress in `[0.0, 1.0]`. Dropped silently if the proxy has
    /// been cancelled or has no progress callback installed.
    pub fn report_progress(&self, progress01: f32) {
        (self.on_progress)(progress01);
    }

    #[cfg(feature = "debug_point_check")]
    pub fn check_point(&self, point: navdispatch_domain::GeoPoint) {
        (self.on_point_check)(point);
    }
}

/// The routing engine (spec §6): `calculate_route`, `clear_state`, `name`.
#[async_trait]
pub trait EngineAdapterPort: Send + Sync {
    async fn calculate_route(
        &self,
        checkpoints: &Checkpoints,
        direction: Direction,
        adjust_to_previous: bool,
        delegate: EngineDelegateHandle,
    ) -> Result<RouteOutcome, EngineError>;

    async fn clear_state(&self);

    fn name(&self) -> &str;
}
