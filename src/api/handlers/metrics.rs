use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use metrics::gauge;

use crate::AppState;

/// GET /metrics — Prometheus scrape. The limiter gauge is refreshed first so
/// it is current even between sweeps.
pub async fn render(State(state): State<AppState>) -> impl IntoResponse {
    gauge!("rate_limit_tracked_clients").set(state.rate_limiter.tracked_clients() as f64);
    let body = state.metrics_handle.render();
    ([(CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
