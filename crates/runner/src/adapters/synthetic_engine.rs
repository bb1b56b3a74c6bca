//! A routing engine that is real enough to run: it sums straight-line
//! segment distances between checkpoints instead of routing over road
//! geometry. Paired with a fetcher that always reports nothing missing.

use async_trait::async_trait;

use navdispatch_core::{AbsentRegionFetcherPort, EngineAdapterPort, EngineDelegateHandle, EngineError, RouteOutcome};
use navdispatch_domain::{Checkpoints, Direction, ResultCode};

pub struct SyntheticEngine {
    name: String,
}

impl SyntheticEngine {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl EngineAdapterPort for SyntheticEngine {
    async fn calculate_route(
        &self,
        checkpoints: &Checkpoints,
        _direction: Direction,
        _adjust_to_previous: bool,
        delegate: EngineDelegateHandle,
    ) -> Result<RouteOutcome, EngineError> {
        if delegate.is_cancelled() {
            return Ok(RouteOutcome::new(ResultCode::Cancelled, None));
        }
        delegate.report_progress(1.0);
        Ok(RouteOutcome::ok(checkpoints.straight_line_distance()))
    }

    async fn clear_state(&self) {}

    fn name(&self) -> &str {
        &self.name
    }
}

pub struct EmptyFetcher;

#[async_trait]
impl AbsentRegionFetcherPort for EmptyFetcher {
    fn generate_request(&self, _checkpoints: &Checkpoints) {}

    async fn get_absent_countries(&self) -> Vec<String> {
        Vec::new()
    }
}
