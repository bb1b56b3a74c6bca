//! End-to-end scenarios driving `Dispatcher` through the testing doubles.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use navdispatch_core::application::dispatcher::Dispatcher;
use navdispatch_core::application::route_request::RouteRequest;
use navdispatch_core::Callbacks;
use navdispatch_core::testing::{FakeEngine, FakeFetcher, RecordingStatsSink, RecordingUiQueue};
use navdispatch_domain::stats::keys;
use navdispatch_domain::{Checkpoints, Direction, GeoPoint, ResultCode};

fn checkpoints() -> Checkpoints {
    Checkpoints::direct(GeoPoint::new(0.0, 0.0), GeoPoint::new(3.0, 4.0))
}

async fn wait_until(deadline: Duration, mut poll: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    loop {
        if poll() {
            return true;
        }
        if start.elapsed() > deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn happy_path_delivers_on_ready() {
    let ui_queue = Arc::new(RecordingUiQueue::new());
    let stats = Arc::new(RecordingStatsSink::new());
    let dispatcher = Dispatcher::new(Arc::clone(&ui_queue) as _, Some(Arc::clone(&stats) as _), Duration::from_secs(60));
    dispatcher.set_engine(
        Some(Arc::new(FakeEngine::new("demo").with_distance(5.0)) as _),
        Some(Arc::new(FakeFetcher::new()) as _),
    );

    let got_route = Arc::new(AtomicBool::new(false));
    let got_route2 = Arc::clone(&got_route);
    let callbacks = Callbacks::builder()
        .on_ready(move |route, code| {
            assert_eq!(code, ResultCode::NoError);
            assert_eq!(route.distance_m, 5.0);
            got_route2.store(true, Ordering::SeqCst);
        })
        .build();

    dispatcher.calculate_route(
        RouteRequest::new(checkpoints(), Direction::default(), false, Duration::from_secs(5)),
        callbacks,
    );

    wait_until(Duration::from_secs(1), || ui_queue.pending() > 0).await;
    ui_queue.drain().await;

    assert!(got_route.load(Ordering::SeqCst));
    assert_eq!(stats.records().len(), 1);

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn need_more_maps_reports_absent_regions_alongside_the_computed_route() {
    let ui_queue = Arc::new(RecordingUiQueue::new());
    let dispatcher = Dispatcher::new(Arc::clone(&ui_queue) as _, None, Duration::from_secs(60));
    dispatcher.set_engine(
        Some(Arc::new(FakeEngine::new("demo").with_distance(5.0)) as _),
        Some(Arc::new(FakeFetcher::new().with_absent(["FR", "DE"])) as _),
    );

    let got_ready = Arc::new(AtomicBool::new(false));
    let got_ready2 = Arc::clone(&got_ready);
    let regions = Arc::new(std::sync::Mutex::new(Vec::new()));
    let regions2 = Arc::clone(&regions);
    let callbacks = Callbacks::builder()
        .on_ready(move |_route, _code| {
            got_ready2.store(true, Ordering::SeqCst);
        })
        .on_need_more_maps(move |_route_id, absent| {
            *regions2.lock().expect("mutex poisoned") = absent;
        })
        .build();

    dispatcher.calculate_route(
        RouteRequest::new(checkpoints(), Direction::default(), false, Duration::from_secs(5)),
        callbacks,
    );

    wait_until(Duration::from_secs(1), || ui_queue.pending() >= 2).await;
    ui_queue.drain().await;

    assert!(got_ready.load(Ordering::SeqCst));
    assert_eq!(*regions.lock().expect("mutex poisoned"), vec!["FR".to_string(), "DE".to_string()]);

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn route_not_found_fires_on_remove_route() {
    let ui_queue = Arc::new(RecordingUiQueue::new());
    let dispatcher = Dispatcher::new(Arc::clone(&ui_queue) as _, None, Duration::from_secs(60));
    dispatcher.set_engine(
        Some(Arc::new(FakeEngine::new("demo").with_code(ResultCode::RouteNotFound)) as _),
        None,
    );

    let seen = Arc::new(std::sync::Mutex::new(None));
    let seen2 = Arc::clone(&seen);
    let callbacks = Callbacks::builder()
        .on_remove_route(move |code| {
            *seen2.lock().expect("mutex poisoned") = Some(code);
        })
        .build();

    dispatcher.calculate_route(
        RouteRequest::new(checkpoints(), Direction::default(), false, Duration::from_secs(5)),
        callbacks,
    );

    wait_until(Duration::from_secs(1), || ui_queue.pending() > 0).await;
    ui_queue.drain().await;

    assert_eq!(*seen.lock().expect("mutex poisoned"), Some(ResultCode::RouteNotFound));

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn cancellation_via_set_engine_suppresses_stale_callback() {
    let ui_queue = Arc::new(RecordingUiQueue::new());
    let dispatcher = Dispatcher::new(Arc::clone(&ui_queue) as _, None, Duration::from_secs(60));
    dispatcher.set_engine(
        Some(Arc::new(FakeEngine::new("slow").with_delay(Duration::from_millis(200))) as _),
        None,
    );

    let fired = Arc::new(AtomicBool::new(false));
    let fired2 = Arc::clone(&fired);
    let callbacks = Callbacks::builder()
        .on_ready(move |_route, _code| {
            fired2.store(true, Ordering::SeqCst);
        })
        .build();

    dispatcher.calculate_route(
        RouteRequest::new(checkpoints(), Direction::default(), false, Duration::from_secs(5)),
        callbacks,
    );

    tokio::time::sleep(Duration::from_millis(20)).await;
    dispatcher.set_engine(
        Some(Arc::new(FakeEngine::new("slow").with_delay(Duration::from_millis(200))) as _),
        None,
    );

    tokio::time::sleep(Duration::from_millis(400)).await;
    ui_queue.drain().await;

    assert!(!fired.load(Ordering::SeqCst));

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn preemption_only_delivers_the_latest_request() {
    let ui_queue = Arc::new(RecordingUiQueue::new());
    let dispatcher = Dispatcher::new(Arc::clone(&ui_queue) as _, None, Duration::from_secs(60));
    dispatcher.set_engine(
        Some(Arc::new(FakeEngine::new("slow").with_delay(Duration::from_millis(150))) as _),
        None,
    );

    let first_fired = Arc::new(AtomicBool::new(false));
    let first_fired2 = Arc::clone(&first_fired);
    dispatcher.calculate_route(
        RouteRequest::new(checkpoints(), Direction::default(), false, Duration::from_secs(5)),
        Callbacks::builder()
            .on_ready(move |_route, _code| {
                first_fired2.store(true, Ordering::SeqCst);
            })
            .build(),
    );

    tokio::time::sleep(Duration::from_millis(20)).await;

    let second_fired = Arc::new(AtomicBool::new(false));
    let second_fired2 = Arc::clone(&second_fired);
    dispatcher.calculate_route(
        RouteRequest::new(checkpoints(), Direction::default(), false, Duration::from_secs(5)),
        Callbacks::builder()
            .on_ready(move |_route, _code| {
                second_fired2.store(true, Ordering::SeqCst);
            })
            .build(),
    );

    wait_until(Duration::from_secs(1), || ui_queue.pending() > 0).await;
    ui_queue.drain().await;

    assert!(!first_fired.load(Ordering::SeqCst));
    assert!(second_fired.load(Ordering::SeqCst));

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn engine_exception_reports_internal_error_and_exception_stats() {
    let ui_queue = Arc::new(RecordingUiQueue::new());
    let stats = Arc::new(RecordingStatsSink::new());
    let dispatcher = Dispatcher::new(Arc::clone(&ui_queue) as _, Some(Arc::clone(&stats) as _), Duration::from_secs(60));
    dispatcher.set_engine(Some(Arc::new(FakeEngine::new("broken").failing("boom")) as _), None);

    let seen = Arc::new(std::sync::Mutex::new(None));
    let seen2 = Arc::clone(&seen);
    let calls = Arc::new(AtomicU32::new(0));
    let calls2 = Arc::clone(&calls);
    let callbacks = Callbacks::builder()
        .on_ready(move |_route, code| {
            *seen2.lock().expect("mutex poisoned") = Some(code);
            calls2.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    dispatcher.calculate_route(
        RouteRequest::new(checkpoints(), Direction::default(), false, Duration::from_secs(5)),
        callbacks,
    );

    wait_until(Duration::from_secs(1), || ui_queue.pending() > 0).await;
    ui_queue.drain().await;

    assert_eq!(*seen.lock().expect("mutex poisoned"), Some(ResultCode::InternalError));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let records = stats.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get(keys::EXCEPTION), Some("boom"));

    dispatcher.shutdown().await;
}
