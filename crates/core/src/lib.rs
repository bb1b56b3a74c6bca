//! The asynchronous routing dispatcher core.
//!
//! A single background worker drains one route request at a time,
//! coalescing anything submitted while it is busy, delivers progress and
//! terminal callbacks through a cancellation-aware delegate proxy, and
//! emits statistics — all on the UI-affine task queue the caller injects.
//!
//! See `SPEC_FULL.md` at the workspace root for the full design.

pub mod application;

#[cfg(feature = "testing")]
pub mod testing;

pub use application::delegate_proxy::{Callbacks, DelegateProxy};
pub use application::dispatcher::Dispatcher;
pub use application::ports::{
    AbsentRegionFetcherPort, EngineAdapterPort, EngineDelegateHandle, EngineError, RouteOutcome,
    StatisticsSinkPort, UiTask, UiTaskQueuePort,
};
pub use application::route_request::RouteRequest;
