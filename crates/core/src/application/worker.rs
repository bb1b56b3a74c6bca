//! The single background worker (spec §4.5): waits on the dispatcher's
//! notifier, drains one request at a time, orchestrates compute + fetch +
//! result delivery.

use std::sync::Arc;
use std::time::Instant;

use navdispatch_domain::{Route, RouteId};

use crate::application::dispatcher::Inner;
use crate::application::statistics;

impl Inner {
    pub(crate) async fn run_worker(self: Arc<Self>) {
        'outer: loop {
            self.wait_for_work().await;

            self.handle_clear_state().await;

            if self.state.lock().expect("mutex poisoned").exit {
                tracing::info!("worker exiting");
                break 'outer;
            }

            let Some((request, delegate, engine, fetcher, route_id)) = self.take_pending_request()
            else {
                continue 'outer;
            };

            let router_name = engine.name().to_string();

            if let Some(fetcher) = &fetcher {
                fetcher.generate_request(&request.checkpoints);
            }

            let started = Instant::now();
            let engine_delegate = delegate.engine_delegate();
            let outcome = engine
                .calculate_route(
                    &request.checkpoints,
                    request.direction,
                    request.adjust_to_previous,
                    engine_delegate,
                )
                .await;

            let (mut code, distance_m) = match outcome {
                Ok(outcome) => (outcome.code, outcome.distance_m),
                Err(err) => {
                    tracing::warn!(route_id = %route_id, error = %err, "engine raised an exception");
                    let record = statistics::exception_record(
                        &router_name,
                        &request.checkpoints,
                        request.direction,
                        &err.message,
                    );
                    statistics::emit(self.stats_sink.clone(), &self.ui_queue, record);
                    let empty = Route::empty(route_id, router_name);
                    delegate.on_ready(empty, navdispatch_domain::ResultCode::InternalError);
                    continue 'outer;
                }
            };

            let elapsed = started.elapsed();
            statistics::log_result(route_id, code, elapsed);
            let primary_record = statistics::completed_record(
                &router_name,
                &request.checkpoints,
                request.direction,
                code,
                elapsed,
                distance_m,
            );
            statistics::emit(self.stats_sink.clone(), &self.ui_queue, primary_record);

            if code == navdispatch_domain::ResultCode::NoError {
                delegate.on_ready(
                    Route::new(route_id, router_name.clone(), distance_m.unwrap_or(0.0)),
                    code,
                );
            }

            let absent = if code == navdispatch_domain::ResultCode::Cancelled {
                Vec::new()
            } else if let Some(fetcher) = &fetcher {
                fetcher.get_absent_countries().await
            } else {
                Vec::new()
            };

            if !absent.is_empty() && code == navdispatch_domain::ResultCode::NoError {
                code = navdispatch_domain::ResultCode::NeedMoreMaps;
            }

            let elapsed = started.elapsed();
            statistics::log_result(route_id, code, elapsed);

            if code != navdispatch_domain::ResultCode::NoError {
                if code == navdispatch_domain::ResultCode::NeedMoreMaps {
                    delegate.on_need_more_maps(route_id, absent);
                } else {
                    delegate.on_remove_route(code);
                }
            }
        }
    }

    async fn wait_for_work(&self) {
        loop {
            {
                let state = self.state.lock().expect("mutex poisoned");
                if state.exit || state.has_request || state.clear_state {
                    return;
                }
            }
            tokio::select! {
                _ = self.notify.notified() => {}
                _ = tokio::time::sleep(self.recovery_poll_interval) => {}
            }
        }
    }

    async fn handle_clear_state(&self) {
        let (should_clear, engine) = {
            let mut state = self.state.lock().expect("mutex poisoned");
            let should_clear = state.clear_state;
            state.clear_state = false;
            (should_clear, state.engine.clone())
        };
        if should_clear {
            if let Some(engine) = engine {
                engine.clear_state().await;
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn take_pending_request(
        &self,
    ) -> Option<(
        crate::application::route_request::RouteRequest,
        Arc<crate::application::delegate_proxy::DelegateProxy>,
        Arc<dyn crate::application::ports::EngineAdapterPort>,
        Option<Arc<dyn crate::application::ports::AbsentRegionFetcherPort>>,
        RouteId,
    )> {
        let mut state = self.state.lock().expect("mutex poisoned");
        if !state.has_request {
            return None;
        }
        state.has_request = false;

        let request = state.pending.take()?;
        let delegate = state.delegate.clone()?;
        let engine = state.engine.clone()?;
        let fetcher = state.fetcher.clone();

        state.next_route_seq += 1;
        let route_id = RouteId::new(state.next_route_seq);

        Some((request, delegate, engine, fetcher, route_id))
    }
}
