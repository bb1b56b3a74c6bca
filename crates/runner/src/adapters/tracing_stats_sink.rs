//! Logs every statistics record via `tracing`, standing in for a real
//! metrics exporter an operator could plug in behind this same port.

use navdispatch_core::StatisticsSinkPort;
use navdispatch_domain::StatsRecord;

pub struct TracingStatsSink;

impl StatisticsSinkPort for TracingStatsSink {
    fn emit(&self, record: StatsRecord) {
        let fields: Vec<String> = record
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        tracing::info!(fields = %fields.join(" "), "route statistics");
    }
}
