//! The statistics sink port (spec §4.3, §6). Optional — the dispatcher
//! skips emission silently when none is installed.

use navdispatch_domain::StatsRecord;

pub trait StatisticsSinkPort: Send + Sync {
    fn emit(&self, record: StatsRecord);
}
