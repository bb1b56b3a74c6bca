//! Composition root: wires a synthetic engine, an empty fetcher, a
//! dedicated-task UI queue, and a tracing statistics sink to the dispatcher,
//! then drives a couple of demo requests.

mod adapters;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use navdispatch_core::application::dispatcher::Dispatcher;
use navdispatch_core::application::route_request::RouteRequest;
use navdispatch_core::Callbacks;
use navdispatch_domain::{Checkpoints, Direction, GeoPoint};
use navdispatch_shared::config::DispatcherConfig;

use adapters::{EmptyFetcher, SyntheticEngine, TokioUiTaskQueue, TracingStatsSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "navdispatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting navdispatch-runner");

    let config = DispatcherConfig::load()?;
    tracing::info!(
        recovery_poll_interval_secs = config.recovery_poll_interval_secs,
        default_timeout_secs = config.default_timeout_secs,
        "configuration loaded"
    );

    let ui_queue = Arc::new(TokioUiTaskQueue::new());
    let stats_sink = Arc::new(TracingStatsSink);

    let dispatcher = Dispatcher::new(
        Arc::clone(&ui_queue) as _,
        Some(Arc::clone(&stats_sink) as _),
        config.recovery_poll_interval(),
    );
    dispatcher.set_engine(
        Some(Arc::new(SyntheticEngine::new("synthetic")) as _),
        Some(Arc::new(EmptyFetcher) as _),
    );

    let routes = [
        (GeoPoint::new(0.0, 0.0), GeoPoint::new(30.0, 40.0)),
        (GeoPoint::new(10.0, 10.0), GeoPoint::new(13.0, 14.0)),
    ];

    for (start, finish) in routes {
        let checkpoints = Checkpoints::direct(start, finish);
        let callbacks = Callbacks::builder()
            .on_ready(|route, code| {
                tracing::info!(route_id = %route.id, distance_m = route.distance_m, code = %code, "route ready");
            })
            .on_remove_route(|code| {
                tracing::warn!(code = %code, "route removed");
            })
            .on_need_more_maps(|route_id, regions| {
                tracing::info!(route_id = %route_id, ?regions, "need more maps");
            })
            .build();

        dispatcher.calculate_route(
            RouteRequest::new(checkpoints, Direction::default(), false, config.default_timeout()),
            callbacks,
        );

        // Give the worker a chance to drain this request before the next
        // one preempts it — this demo wants to show both computations, not
        // preemption (that's exercised directly in the integration tests).
        tokio::time::sleep(Duration::from_millis(50)).await;
        ui_queue.wait_idle().await;
    }

    dispatcher.shutdown().await;
    tracing::info!("navdispatch-runner exiting");

    Ok(())
}
