//! Test doubles for each outbound port, used by this crate's own
//! integration tests and available to downstream crates under the
//! `testing` feature.

mod fake_engine;
mod fake_fetcher;
mod recording_stats_sink;
mod recording_ui_queue;

pub use fake_engine::FakeEngine;
pub use fake_fetcher::FakeFetcher;
pub use recording_stats_sink::RecordingStatsSink;
pub use recording_ui_queue::RecordingUiQueue;
