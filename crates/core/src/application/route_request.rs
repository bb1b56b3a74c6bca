//! The pending-slot payload a `CalculateRoute` call parks in the dispatcher.

use std::time::Duration;

use navdispatch_domain::{Checkpoints, Direction};

/// Everything the worker needs to run one computation. Exactly one of these
/// occupies the dispatcher's pending slot at a time (spec §3: "Non-goals …
/// prioritization or queueing of multiple pending requests").
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub checkpoints: Checkpoints,
    pub direction: Direction,
    pub adjust_to_previous: bool,
    pub timeout: Duration,
}

impl RouteRequest {
    pub fn new(
        checkpoints: Checkpoints,
        direction: Direction,
        adjust_to_previous: bool,
        timeout: Duration,
    ) -> Self {
        Self {
            checkpoints,
            direction,
            adjust_to_previous,
            timeout,
        }
    }
}
