use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{Candidate, ScreenRequest, ScreeningDecision};
use crate::AppState;

/// POST /screen — Screen a person against the sanctions list.
///
/// Bad input is rejected with 400 before the provider is called. Provider
/// failures come back as 200 with `error: true` and a `Clear` result.
pub async fn screen(
    State(state): State<AppState>,
    payload: Result<Json<ScreenRequest>, JsonRejection>,
) -> Result<Json<ScreeningDecision>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let candidate = Candidate::try_from(body)?;

    Ok(Json(state.screener.screen(&candidate).await))
}
