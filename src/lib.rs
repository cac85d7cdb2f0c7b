pub mod api;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod ofac;
pub mod rate_limit;
pub mod screening;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::rate_limit::RateLimiter;
use crate::screening::Screener;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub screener: Screener,
    pub rate_limiter: Arc<RateLimiter>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
