//! A UI task queue fake that records posted tasks and runs them in FIFO
//! order only when `drain`'d, so tests can assert both "did this callback
//! fire" and "in what order".

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::application::ports::{UiTaskQueuePort, UiTask};

#[derive(Default)]
pub struct RecordingUiQueue {
    tasks: Mutex<VecDeque<UiTask>>,
}

impl RecordingUiQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every currently-queued task in posting order, returning how
    /// many ran. Tasks posted by a task run during drain are also drained.
    pub async fn drain(&self) -> usize {
        let mut count = 0;
        loop {
            let next = self.tasks.lock().expect("mutex poisoned").pop_front();
            match next {
                Some(task) => {
                    task.await;
                    count += 1;
                }
                None => break,
            }
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.tasks.lock().expect("mutex poisoned").len()
    }
}

impl UiTaskQueuePort for RecordingUiQueue {
    fn run_on_gui(&self, task: UiTask) {
        self.tasks.lock().expect("mutex poisoned").push_back(task);
    }
}
