//! Outbound ports — the narrow interfaces the dispatcher consumes from its
//! external collaborators (spec §6). Each is an `async_trait`, the same way
//! the teacher's `application::ports::outbound` module defines them.

mod engine;
mod fetcher;
mod stats_sink;
mod ui_task_queue;

pub use engine::{EngineAdapterPort, EngineDelegateHandle, EngineError, RouteOutcome};
pub use fetcher::AbsentRegionFetcherPort;
pub use stats_sink::StatisticsSinkPort;
pub use ui_task_queue::{UiTask, UiTaskQueuePort};
