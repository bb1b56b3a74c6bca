//! Concrete stand-ins for the dispatcher's outbound ports: real enough to
//! run and observe, never a real routing engine or network fetcher (those
//! stay out of scope per the crate's non-goals).

mod synthetic_engine;
mod tokio_ui_queue;
mod tracing_stats_sink;

pub use synthetic_engine::{EmptyFetcher, SyntheticEngine};
pub use tokio_ui_queue::TokioUiTaskQueue;
pub use tracing_stats_sink::TracingStatsSink;
