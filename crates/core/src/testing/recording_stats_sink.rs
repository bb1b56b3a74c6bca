//! Records every statistics record emitted, for scenario assertions.

use std::sync::Mutex;

use navdispatch_domain::StatsRecord;

use crate::application::ports::StatisticsSinkPort;

#[derive(Default)]
pub struct RecordingStatsSink {
    records: Mutex<Vec<StatsRecord>>,
}

impl RecordingStatsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<StatsRecord> {
        self.records.lock().expect("mutex poisoned").clone()
    }
}

impl StatisticsSinkPort for RecordingStatsSink {
    fn emit(&self, record: StatsRecord) {
        self.records.lock().expect("mutex poisoned").push(record);
    }
}
