//! A `UiTaskQueuePort` backed by a dedicated task draining an `mpsc`
//! channel, so posted callbacks genuinely run off the submitting task —
//! proving the thread/task affinity the real port exists to guarantee.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use navdispatch_core::{UiTask, UiTaskQueuePort};

pub struct TokioUiTaskQueue {
    sender: mpsc::UnboundedSender<UiTask>,
    pending: Arc<AtomicUsize>,
    _worker: JoinHandle<()>,
}

impl TokioUiTaskQueue {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<UiTask>();
        let pending = Arc::new(AtomicUsize::new(0));
        let worker_pending = Arc::clone(&pending);
        let worker = tokio::spawn(async move {
            while let Some(task) = receiver.recv().await {
                task.await;
                worker_pending.fetch_sub(1, Ordering::SeqCst);
            }
        });
        Self {
            sender,
            pending,
            _worker: worker,
        }
    }

    /// Waits until every task posted so far has run. Best-effort — a task
    /// posted concurrently with the call may or may not be waited for.
    pub async fn wait_idle(&self) {
        while self.pending.load(Ordering::SeqCst) > 0 {
            tokio::task::yield_now().await;
        }
    }
}

impl Default for TokioUiTaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl UiTaskQueuePort for TokioUiTaskQueue {
    fn run_on_gui(&self, task: UiTask) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(task).is_err() {
            tracing::warn!("UI task queue is shut down, dropping task");
            self.pending.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
