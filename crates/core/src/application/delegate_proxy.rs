//! The per-request delegate proxy (spec §4.1): holds the user's callbacks
//! and a cancellation flag, and is the sole mechanism that keeps a stale UI
//! task from reaching the user after cancellation.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use navdispatch_domain::{ResultCode, Route, RouteId};

use crate::application::ports::{EngineDelegateHandle, UiTaskQueuePort};

type OnReady = Box<dyn FnOnce(Route, ResultCode) + Send>;
type OnNeedMoreMaps = Box<dyn FnOnce(RouteId, Vec<String>) + Send>;
type OnRemoveRoute = Box<dyn FnOnce(ResultCode) + Send>;
type OnProgress = Arc<dyn Fn(f32) + Send + Sync>;
#[cfg(feature = "debug_point_check")]
type OnPointCheck = Arc<dyn Fn(navdispatch_domain::GeoPoint) + Send + Sync>;

/// The user-supplied callbacks for a single submitted request. Each of
/// `on_ready`/`on_need_more_maps`/`on_remove_route` fires at most once; the
/// worker guarantees that at most one of the three ever fires for a given
/// request (spec §4.5 "Delivery rules").
#[derive(Default)]
pub struct Callbacks {
    pub on_ready: Option<OnReady>,
    pub on_need_more_maps: Option<OnNeedMoreMaps>,
    pub on_remove_route: Option<OnRemoveRoute>,
    pub on_progress: Option<OnProgress>,
    #[cfg(feature = "debug_point_check")]
    pub on_point_check: Option<OnPointCheck>,
}

impl Callbacks {
    pub fn builder() -> CallbacksBuilder {
        CallbacksBuilder::default()
    }
}

/// Builds a `Callbacks` value one callback at a time; all callbacks are
/// optional, matching the spec ("if no on-ready callback was supplied, do
/// nothing").
#[derive(Default)]
pub struct CallbacksBuilder {
    callbacks: Callbacks,
}

impl CallbacksBuilder {
    pub fn on_ready(mut self, f: impl FnOnce(Route, ResultCode) + Send + 'static) -> Self {
        self.callbacks.on_ready = Some(Box::new(f));
        self
    }

    pub fn on_need_more_maps(
        mut self,
        f: impl FnOnce(RouteId, Vec<String>) + Send + 'static,
    ) -> Self {
        self.callbacks.on_need_more_maps = Some(Box::new(f));
        self
    }

    pub fn on_remove_route(mut self, f: impl FnOnce(ResultCode) + Send + 'static) -> Self {
        self.callbacks.on_remove_route = Some(Box::new(f));
        self
    }

    pub fn on_progress(mut self, f: impl Fn(f32) + Send + Sync + 'static) -> Self {
        self.callbacks.on_progress = Some(Arc::new(f));
        self
    }

    #[cfg(feature = "debug_point_check")]
    pub fn on_point_check(
        mut self,
        f: impl Fn(navdispatch_domain::GeoPoint) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_point_check = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Callbacks {
        self.callbacks
    }
}

struct ProxyState {
    callbacks: Callbacks,
    cancelled: bool,
}

/// Per-request object guarding the caller's callbacks against a
/// cancellation flag, and forwarding progress/point-check events onto the
/// injected UI task queue.
pub struct DelegateProxy {
    state: Mutex<ProxyState>,
    cancel_token: CancellationToken,
    timeout: Duration,
    ui_queue: Arc<dyn UiTaskQueuePort>,
}

impl DelegateProxy {
    pub fn new(callbacks: Callbacks, timeout: Duration, ui_queue: Arc<dyn UiTaskQueuePort>) -> Self {
        Self {
            state: Mutex::new(ProxyState {
                callbacks,
                cancelled: false,
            }),
            cancel_token: CancellationToken::new(),
            timeout,
            ui_queue,
        }
    }

    /// Transfers ownership of `route` to the UI callback, unless the proxy
    /// has no `on_ready` callback or has been cancelled.
    pub fn on_ready(&self, route: Route, code: ResultCode) {
        let Some(cb) = self.take_if_live(|c| c.on_ready.take()) else {
            return;
        };
        self.ui_queue.run_on_gui(Box::pin(async move {
            cb(route, code);
        }));
    }

    pub fn on_need_more_maps(&self, route_id: RouteId, absent_regions: Vec<String>) {
        let Some(cb) = self.take_if_live(|c| c.on_need_more_maps.take()) else {
            return;
        };
        self.ui_queue.run_on_gui(Box::pin(async move {
            cb(route_id, absent_regions);
        }));
    }

    pub fn on_remove_route(&self, code: ResultCode) {
        let Some(cb) = self.take_if_live(|c| c.on_remove_route.take()) else {
            return;
        };
        self.ui_queue.run_on_gui(Box::pin(async move {
            cb(code);
        }));
    }

    pub fn on_progress(&self, progress01: f32) {
        let Some(cb) = self.clone_if_live(|c| c.on_progress.clone()) else {
            return;
        };
        self.ui_queue.run_on_gui(Box::pin(async move {
            cb(progress01);
        }));
    }

    #[cfg(feature = "debug_point_check")]
    pub fn on_point_check(&self, point: navdispatch_domain::GeoPoint) {
        let Some(cb) = self.clone_if_live(|c| c.on_point_check.clone()) else {
            return;
        };
        self.ui_queue.run_on_gui(Box::pin(async move {
            cb(point);
        }));
    }

    /// Idempotent. Once this returns, no further callback will be scheduled
    /// by this proxy — tasks already posted before the call may still run.
    pub fn cancel(&self) {
        let mut state = self.state.lock().expect("mutex poisoned");
        state.cancelled = true;
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Builds the handle passed into the engine for this request, wired
    /// back to this proxy's `on_progress`/`on_point_check`.
    pub fn engine_delegate(self: &Arc<Self>) -> EngineDelegateHandle {
        let progress_proxy = Arc::clone(self);
        let on_progress: Arc<dyn Fn(f32) + Send + Sync> =
            Arc::new(move |p| progress_proxy.on_progress(p));

        #[cfg(feature = "debug_point_check")]
        let on_point_check: Arc<dyn Fn(navdispatch_domain::GeoPoint) + Send + Sync> = {
            let point_proxy = Arc::clone(self);
            Arc::new(move |pt| point_proxy.on_point_check(pt))
        };

        EngineDelegateHandle::new(
            self.cancel_token.clone(),
            self.timeout,
            on_progress,
            #[cfg(feature = "debug_point_check")]
            on_point_check,
        )
    }

    /// Snapshot-then-schedule for one-shot callbacks: takes ownership of the
    /// callback under the lock (so a racing `cancel()` cannot observe it
    /// half-consumed), then releases the lock before the caller schedules
    /// anything — the snapshot, not the lock hold, is what guarantees
    /// correctness (spec §9, Open Question 1).
    fn take_if_live<T>(&self, take: impl FnOnce(&mut Callbacks) -> Option<T>) -> Option<T> {
        let mut state = self.state.lock().expect("mutex poisoned");
        if state.cancelled {
            return None;
        }
        take(&mut state.callbacks)
    }

    fn clone_if_live<T>(&self, clone: impl FnOnce(&Callbacks) -> Option<T>) -> Option<T> {
        let state = self.state.lock().expect("mutex poisoned");
        if state.cancelled {
            return None;
        }
        clone(&state.callbacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingUiQueue;
    use navdispatch_domain::RouteId;

    fn proxy(callbacks: Callbacks, queue: Arc<RecordingUiQueue>) -> Arc<DelegateProxy> {
        Arc::new(DelegateProxy::new(callbacks, Duration::from_secs(5), queue))
    }

    #[tokio::test]
    async fn cancel_is_idempotent_and_suppresses_later_callbacks() {
        let queue = Arc::new(RecordingUiQueue::new());
        let fired = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let fired2 = Arc::clone(&fired);
        let cb = Callbacks::builder()
            .on_ready(move |_route, _code| {
                fired2.store(true, std::sync::atomic::Ordering::SeqCst);
            })
            .build();
        let p = proxy(cb, Arc::clone(&queue));

        p.cancel();
        p.cancel(); // idempotent

        p.on_ready(Route::empty(RouteId::new(1), "demo"), ResultCode::NoError);
        queue.drain().await;

        assert!(!fired.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn on_ready_fires_when_not_cancelled() {
        let queue = Arc::new(RecordingUiQueue::new());
        let fired = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let fired2 = Arc::clone(&fired);
        let cb = Callbacks::builder()
            .on_ready(move |_route, code| {
                assert_eq!(code, ResultCode::NoError);
                fired2.store(true, std::sync::atomic::Ordering::SeqCst);
            })
            .build();
        let p = proxy(cb, Arc::clone(&queue));

        p.on_ready(Route::empty(RouteId::new(1), "demo"), ResultCode::NoError);
        queue.drain().await;

        assert!(fired.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn missing_callback_is_a_silent_no_op() {
        let queue = Arc::new(RecordingUiQueue::new());
        let p = proxy(Callbacks::default(), Arc::clone(&queue));
        p.on_ready(Route::empty(RouteId::new(1), "demo"), ResultCode::NoError);
        assert_eq!(queue.drain().await, 0);
    }
}
