//! The dispatcher (spec §4.4): owns the worker, the current engine, the
//! pending request slot, and the active delegate; exposes the public API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use navdispatch_domain::RouteId;

use crate::application::delegate_proxy::{Callbacks, DelegateProxy};
use crate::application::ports::{AbsentRegionFetcherPort, EngineAdapterPort, StatisticsSinkPort, UiTaskQueuePort};
use crate::application::route_request::RouteRequest;

/// Dispatcher-owned state, guarded by a single mutex (spec §5: "one
/// dispatcher mutex guards all shared dispatcher state").
#[derive(Default)]
pub(crate) struct State {
    pub(crate) engine: Option<Arc<dyn EngineAdapterPort>>,
    pub(crate) fetcher: Option<Arc<dyn AbsentRegionFetcherPort>>,
    pub(crate) pending: Option<RouteRequest>,
    pub(crate) delegate: Option<Arc<DelegateProxy>>,
    pub(crate) next_route_seq: u64,
    pub(crate) has_request: bool,
    pub(crate) clear_state: bool,
    pub(crate) exit: bool,
}

/// Shared between the `Dispatcher` handle and the background worker task.
pub(crate) struct Inner {
    pub(crate) state: Mutex<State>,
    pub(crate) notify: Notify,
    pub(crate) ui_queue: Arc<dyn UiTaskQueuePort>,
    pub(crate) stats_sink: Option<Arc<dyn StatisticsSinkPort>>,
    pub(crate) recovery_poll_interval: Duration,
}

/// Owns the worker task and exposes `set_engine`/`calculate_route`/
/// `clear_state`/`shutdown` (spec §4.4's table).
pub struct Dispatcher {
    inner: Arc<Inner>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Dispatcher {
    pub fn new(
        ui_queue: Arc<dyn UiTaskQueuePort>,
        stats_sink: Option<Arc<dyn StatisticsSinkPort>>,
        recovery_poll_interval: Duration,
    ) -> Self {
        let inner = Arc::new(Inner {
            state: Mutex::new(State::default()),
            notify: Notify::new(),
            ui_queue,
            stats_sink,
            recovery_poll_interval,
        });
        let worker_inner = Arc::clone(&inner);
        let handle = tokio::spawn(async move { worker_inner.run_worker().await });
        Self {
            inner,
            worker: Mutex::new(Some(handle)),
        }
    }

    /// Installs a new engine and fetcher, cancelling any in-flight request.
    /// Safe to call repeatedly; a `None` engine parks the dispatcher until
    /// one is installed.
    pub fn set_engine(
        &self,
        engine: Option<Arc<dyn EngineAdapterPort>>,
        fetcher: Option<Arc<dyn AbsentRegionFetcherPort>>,
    ) {
        let mut state = self.inner.state.lock().expect("mutex poisoned");
        if let Some(delegate) = state.delegate.take() {
            delegate.cancel();
        }
        state.engine = engine;
        state.fetcher = fetcher;
        tracing::info!("engine and fetcher updated");
    }

    /// Submits a request, preempting anything in flight or still pending.
    /// Only the most recently submitted request survives a worker
    /// iteration (spec §4.4 "Request preemption").
    pub fn calculate_route(&self, request: RouteRequest, callbacks: Callbacks) {
        let delegate = Arc::new(DelegateProxy::new(
            callbacks,
            request.timeout,
            Arc::clone(&self.inner.ui_queue),
        ));
        {
            let mut state = self.inner.state.lock().expect("mutex poisoned");
            if let Some(old) = state.delegate.take() {
                old.cancel();
            }
            state.pending = Some(request);
            state.delegate = Some(delegate);
            state.has_request = true;
        }
        self.inner.notify.notify_one();
    }

    /// Asks the engine to clear any cached routing state and cancels any
    /// active delegate. A no-op when no engine is installed.
    pub fn clear_state(&self) {
        {
            let mut state = self.inner.state.lock().expect("mutex poisoned");
            state.clear_state = true;
            if let Some(delegate) = state.delegate.take() {
                delegate.cancel();
            }
        }
        self.inner.notify.notify_one();
    }

    /// Cancels any active delegate, signals the worker to exit, and joins
    /// it. Mandatory before the dispatcher's storage is released; idempotent.
    pub async fn shutdown(&self) {
        {
            let mut state = self.inner.state.lock().expect("mutex poisoned");
            if let Some(delegate) = state.delegate.take() {
                delegate.cancel();
            }
            state.exit = true;
        }
        self.inner.notify.notify_one();

        let handle = self.worker.lock().expect("mutex poisoned").take();
        if let Some(handle) = handle {
            tracing::info!("shutting down dispatcher, joining worker");
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "worker task panicked during shutdown");
            }
        }
    }

    /// Diagnostic accessor — the last route id that will be issued is one
    /// less than this (tests use it to assert monotonic, unique ids).
    pub fn next_route_id_preview(&self) -> RouteId {
        RouteId::new(self.inner.state.lock().expect("mutex poisoned").next_route_seq + 1)
    }
}
