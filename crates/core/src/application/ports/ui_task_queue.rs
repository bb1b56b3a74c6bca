//! The UI thread's task queue (spec §6: `RunOnGui`).

use std::future::Future;
use std::pin::Pin;

/// A fire-and-forget task posted to the UI thread.
pub type UiTask = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Schedules work onto the thread (or task) user-facing callbacks must run
/// on. The dispatcher never awaits this — it posts and moves on.
pub trait UiTaskQueuePort: Send + Sync {
    fn run_on_gui(&self, task: UiTask);
}
