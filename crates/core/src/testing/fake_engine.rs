//! A configurable routing engine fake: fixed result code, optional
//! artificial delay (to exercise preemption/cancellation), and an optional
//! failure mode to exercise the worker's exception path.

use std::time::Duration;

use async_trait::async_trait;

use navdispatch_domain::{Checkpoints, Direction, ResultCode};

use crate::application::ports::{EngineAdapterPort, EngineDelegateHandle, EngineError, RouteOutcome};

pub struct FakeEngine {
    name: String,
    code: ResultCode,
    distance_m: Option<f64>,
    delay: Duration,
    fail_with: Option<String>,
}

impl FakeEngine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: ResultCode::NoError,
            distance_m: None,
            delay: Duration::ZERO,
            fail_with: None,
        }
    }

    pub fn with_code(mut self, code: ResultCode) -> Self {
        self.code = code;
        self
    }

    pub fn with_distance(mut self, distance_m: f64) -> Self {
        self.distance_m = Some(distance_m);
        self
    }

    /// The call to `calculate_route` polls cancellation every tenth of
    /// `delay`, so tests can cancel mid-computation and observe a prompt
    /// `Cancelled` result.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }
}

#[async_trait]
impl EngineAdapterPort for FakeEngine {
    async fn calculate_route(
        &self,
        checkpoints: &Checkpoints,
        _direction: Direction,
        _adjust_to_previous: bool,
        delegate: EngineDelegateHandle,
    ) -> Result<RouteOutcome, EngineError> {
        if let Some(message) = &self.fail_with {
            return Err(EngineError::new(message.clone()));
        }

        if !self.delay.is_zero() {
            const TICKS: u32 = 10;
            let step = self.delay / TICKS;
            for _ in 0..TICKS {
                if delegate.is_cancelled() {
                    return Ok(RouteOutcome::new(ResultCode::Cancelled, None));
                }
                tokio::time::sleep(step).await;
            }
        }
        if delegate.is_cancelled() {
            return Ok(RouteOutcome::new(ResultCode::Cancelled, None));
        }

        delegate.report_progress(1.0);

        if self.code == ResultCode::NoError {
            let distance = self
                .distance_m
                .unwrap_or_else(|| checkpoints.straight_line_distance());
            Ok(RouteOutcome::ok(distance))
        } else {
            Ok(RouteOutcome::failed(self.code))
        }
    }

    async fn clear_state(&self) {}

    fn name(&self) -> &str {
        &self.name
    }
}
