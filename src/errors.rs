use std::time::Duration;

use axum::http::header::RETRY_AFTER;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::{ScreeningDecision, SCREENING_FAILED_MESSAGE};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rate limit exceeded")]
    RateLimited { retry_after: Duration },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short label used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::RateLimited { .. } => "rate_limited",
            AppError::Upstream(_) => "upstream",
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, Json(ScreeningDecision::failure(msg))).into_response()
            }
            AppError::RateLimited { retry_after } => {
                // Round up so clients never retry a moment too early.
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(RETRY_AFTER, secs.to_string())],
                    "Too Many Requests",
                )
                    .into_response()
            }
            // The screener folds these into a fail-safe decision, so they only
            // land here if a handler propagates a source error directly.
            err @ (AppError::Upstream(_) | AppError::Internal(_)) => {
                let status = match err {
                    AppError::Upstream(_) => StatusCode::OK,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                tracing::error!(kind = err.kind(), "Screening error reached response boundary: {err:?}");
                (
                    status,
                    Json(ScreeningDecision::failure(SCREENING_FAILED_MESSAGE)),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_rounds_retry_after_up() {
        let resp = AppError::RateLimited {
            retry_after: Duration::from_millis(4_200),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(resp.headers()[RETRY_AFTER], "5");
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let resp = AppError::InvalidInput("country is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_is_ok_with_error_flag() {
        let resp = AppError::Upstream("503".into()).into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_internal_is_server_error() {
        let resp = AppError::Internal(anyhow::anyhow!("bad payload")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
