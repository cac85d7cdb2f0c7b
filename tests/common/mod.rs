use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use sanctions_screen::api::router::create_router;
use sanctions_screen::config::AppConfig;
use sanctions_screen::errors::AppError;
use sanctions_screen::models::{Candidate, SanctionRecord};
use sanctions_screen::rate_limit::RateLimiter;
use sanctions_screen::screening::{SanctionsSource, Screener};
use sanctions_screen::AppState;

/// In-process sanctions source returning canned records and counting calls.
#[allow(dead_code)]
pub struct StaticSource {
    records: Vec<SanctionRecord>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl StaticSource {
    pub fn new(records: Vec<SanctionRecord>) -> Arc<Self> {
        Arc::new(Self {
            records,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SanctionsSource for StaticSource {
    async fn search(&self, _candidate: &Candidate) -> Result<Vec<SanctionRecord>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        ofac_api_key: "test-key".into(),
        upstream_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

/// Router wired to `source` with the given throttle settings.
#[allow(dead_code)]
pub fn build_test_app(source: Arc<dyn SanctionsSource>, config: AppConfig) -> Router {
    let rate_limiter = Arc::new(
        RateLimiter::new(
            config.rate_limit_capacity,
            config.rate_limit_window,
            config.rate_limit_max_clients,
        )
        .expect("valid rate limit config"),
    );

    let state = AppState {
        screener: Screener::new(source, config.upstream_timeout),
        config,
        rate_limiter,
        metrics_handle: sanctions_screen::metrics::detached_handle(),
    };

    create_router(state)
}

/// Build a `POST /screen` request with a JSON body.
#[allow(dead_code)]
pub fn screen_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/screen")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub async fn read_json(resp: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// A stand-in sanctions provider listening on an ephemeral local port.
/// Replies to `POST /v4/search` with `status` and `body`, and records every
/// request body it receives.
#[allow(dead_code)]
pub struct FakeProvider {
    pub base_url: String,
    pub received: Arc<std::sync::Mutex<Vec<Value>>>,
}

#[allow(dead_code)]
impl FakeProvider {
    pub async fn start(status: StatusCode, body: Value) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: StatusCode, body: Value, delay: Duration) -> Self {
        let received = Arc::new(std::sync::Mutex::new(Vec::new()));
        let log = Arc::clone(&received);

        let app = Router::new().route(
            "/v4/search",
            post(move |Json(req): Json<Value>| {
                let body = body.clone();
                let log = Arc::clone(&log);
                async move {
                    log.lock().unwrap().push(req);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    (status, Json(body))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            received,
        }
    }

    /// Like `start`, but the body is sent verbatim instead of as JSON.
    pub async fn start_raw(status: StatusCode, body: &'static str) -> Self {
        let app = Router::new().route("/v4/search", post(move || async move { (status, body) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            received: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn request_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}
