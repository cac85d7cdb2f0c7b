use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use metrics::counter;

use crate::errors::AppError;
use crate::rate_limit::Admission;
use crate::AppState;

const UNKNOWN_CLIENT: &str = "unknown";

/// Per-client throttling for the screening routes.
///
/// Runs before the body is read, so a denied request never reaches the
/// sanctions provider.
pub async fn throttle(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let client = client_id(&req, state.config.trust_forwarded_for);

    match state.rate_limiter.admit(&client, Instant::now()) {
        Admission::Allowed { remaining } => {
            tracing::debug!(client = %client, remaining, "Screening request admitted");
            next.run(req).await
        }
        Admission::Denied { retry_after } => {
            counter!("rate_limited_total").increment(1);
            tracing::warn!(
                client = %client,
                retry_after_secs = retry_after.as_secs(),
                "Screening request rate limited"
            );
            AppError::RateLimited { retry_after }.into_response()
        }
    }
}

/// Peer IP, or the first `X-Forwarded-For` hop when running behind a trusted proxy.
fn client_id(req: &Request, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        if let Some(ip) = forwarded_for(req.headers()) {
            return ip;
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.into())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(forwarded: Option<&str>, peer: Option<SocketAddr>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/screen");
        if let Some(f) = forwarded {
            builder = builder.header("x-forwarded-for", f);
        }
        let mut req = builder.body(Body::empty()).unwrap();
        if let Some(addr) = peer {
            req.extensions_mut().insert(ConnectInfo(addr));
        }
        req
    }

    #[test]
    fn test_uses_peer_ip() {
        let req = request(Some("9.9.9.9"), Some("10.0.0.7:5123".parse().unwrap()));
        assert_eq!(client_id(&req, false), "10.0.0.7");
    }

    #[test]
    fn test_uses_first_forwarded_hop_when_trusted() {
        let req = request(
            Some(" 203.0.113.5 , 10.0.0.1"),
            Some("10.0.0.7:5123".parse().unwrap()),
        );
        assert_eq!(client_id(&req, true), "203.0.113.5");
    }

    #[test]
    fn test_falls_back_to_unknown() {
        let req = request(None, None);
        assert_eq!(client_id(&req, true), UNKNOWN_CLIENT);
    }
}
