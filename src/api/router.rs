use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::throttle::throttle;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes, never throttled
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Screening routes: every call costs provider quota, so throttle per client.
    // `/api/screen` is the path the browser form posts to.
    let screening = Router::new()
        .route("/screen", post(handlers::screen::screen))
        .route("/api/screen", post(handlers::screen::screen))
        .layer(middleware::from_fn_with_state(state.clone(), throttle));

    // CORS: the screening form may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(screening)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
