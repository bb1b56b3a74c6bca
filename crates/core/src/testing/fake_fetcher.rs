//! A fetcher fake that returns a configured absent-region list, optionally
//! after a delay (to exercise the overlap between compute and fetch).

use std::time::Duration;

use async_trait::async_trait;

use navdispatch_domain::Checkpoints;

use crate::application::ports::AbsentRegionFetcherPort;

#[derive(Default)]
pub struct FakeFetcher {
    absent: Vec<String>,
    delay: Duration,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_absent(mut self, regions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.absent = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl AbsentRegionFetcherPort for FakeFetcher {
    fn generate_request(&self, _checkpoints: &Checkpoints) {}

    async fn get_absent_countries(&self) -> Vec<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.absent.clone()
    }
}
