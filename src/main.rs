use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use metrics::gauge;

use sanctions_screen::api::router::create_router;
use sanctions_screen::config::{AppConfig, LogFormat};
use sanctions_screen::ofac::OfacClient;
use sanctions_screen::rate_limit::RateLimiter;
use sanctions_screen::screening::Screener;
use sanctions_screen::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);
    tracing::debug!(?config, "Configuration loaded");

    let addr = format!("{}:{}", config.host, config.port);
    let metrics_handle = sanctions_screen::metrics::init_metrics()?;

    // --- Sanctions provider + orchestrator ---
    let client = OfacClient::with_base_url(
        config.ofac_api_url.clone(),
        config.ofac_api_key.clone(),
        config.upstream_timeout,
    )?;
    let screener = Screener::new(Arc::new(client), config.upstream_timeout);

    // --- Throttling ---
    let rate_limiter = Arc::new(RateLimiter::new(
        config.rate_limit_capacity,
        config.rate_limit_window,
        config.rate_limit_max_clients,
    )?);
    tracing::info!(
        capacity = config.rate_limit_capacity,
        window_secs = config.rate_limit_window.as_secs(),
        max_clients = config.rate_limit_max_clients,
        "Rate limiter configured"
    );

    let sweeper = Arc::clone(&rate_limiter);
    let sweep_interval = config.rate_limit_sweep_interval;
    tokio::spawn(async move {
        run_sweeper(sweeper, sweep_interval).await;
    });

    let state = AppState {
        config,
        screener,
        rate_limiter,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Periodically drop clients whose window has emptied so the map stays small.
async fn run_sweeper(limiter: Arc<RateLimiter>, every: std::time::Duration) {
    // `interval` panics on a zero period.
    let mut ticker = tokio::time::interval(every.max(std::time::Duration::from_secs(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let evicted = limiter.sweep(Instant::now());
        let tracked = limiter.tracked_clients();
        gauge!("rate_limit_tracked_clients").set(tracked as f64);
        if evicted > 0 {
            tracing::debug!(evicted, tracked, "Rate limiter sweep");
        }
    }
}

fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}
