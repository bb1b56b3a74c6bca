//! The online absent-regions fetcher port (spec §4.2, §6).

use async_trait::async_trait;

use navdispatch_domain::Checkpoints;

/// Runs concurrently with the local engine computation: kicked before the
/// engine starts so network latency overlaps compute (spec §9), consulted
/// afterwards regardless of outcome except when the request was cancelled.
#[async_trait]
pub trait AbsentRegionFetcherPort: Send + Sync {
    /// Non-blocking kick — starts the request without waiting on it.
    fn generate_request(&self, checkpoints: &Checkpoints);

    /// Blocks until absent regions for the most recently kicked request are
    /// known. Fetcher failures are treated as an empty list (spec §7c).
    async fn get_absent_countries(&self) -> Vec<String>;
}
