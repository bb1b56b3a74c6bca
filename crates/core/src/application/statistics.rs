//! Builds the statistics record for a request and dispatches it to the
//! sink (spec §4.3). Also backs the structured log lines the worker emits,
//! so both read the same derived fields instead of recomputing them.

use std::sync::Arc;
use std::time::Duration;

use navdispatch_domain::{Checkpoints, Direction, ResultCode, StatsRecord};

use crate::application::ports::{StatisticsSinkPort, UiTaskQueuePort};

/// Emits `record` on the UI task queue (spec: "dispatched on the UI thread
/// so that the sink may touch UI-affine state"), skipping silently if no
/// sink is installed.
pub fn emit(
    sink: Option<Arc<dyn StatisticsSinkPort>>,
    ui_queue: &Arc<dyn UiTaskQueuePort>,
    record: StatsRecord,
) {
    let Some(sink) = sink else { return };
    ui_queue.run_on_gui(Box::pin(async move {
        sink.emit(record);
    }));
}

pub fn completed_record(
    router_name: &str,
    checkpoints: &Checkpoints,
    direction: Direction,
    code: ResultCode,
    elapsed: Duration,
    distance_m: Option<f64>,
) -> StatsRecord {
    StatsRecord::completed(
        router_name,
        checkpoints.start(),
        checkpoints.finish(),
        direction,
        code,
        elapsed.as_secs_f64(),
        distance_m,
    )
}

pub fn exception_record(
    router_name: &str,
    checkpoints: &Checkpoints,
    direction: Direction,
    message: &str,
) -> StatsRecord {
    StatsRecord::exception(
        router_name,
        checkpoints.start(),
        checkpoints.finish(),
        direction,
        message,
    )
}

/// Logs the result code at its mapped level with the fields an operator
/// would want for debugging a single request.
pub fn log_result(route_id: navdispatch_domain::RouteId, code: ResultCode, elapsed: Duration) {
    match code.log_level() {
        tracing::Level::INFO => {
            tracing::info!(route_id = %route_id, code = %code, elapsed_ms = elapsed.as_millis() as u64, "route computation finished");
        }
        _ => {
            tracing::warn!(route_id = %route_id, code = %code, elapsed_ms = elapsed.as_millis() as u64, "route computation finished");
        }
    }
}
