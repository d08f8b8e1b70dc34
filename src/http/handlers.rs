//! HTTP handlers. Each one parses its input and delegates to the engine.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use super::dto::HealthResponse;
use super::error::AppError;
use super::state::AppState;
use crate::core::{ComputationResult, WorkingTimeEngine};
use crate::domain::model::RawParameters;
use crate::utils::validation::parse_request;

pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /
pub async fn root() -> &'static str {
    "Working Days API is running"
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.holidays.current();
    Json(HealthResponse {
        status: "ok".to_string(),
        holidays_loaded: snapshot.len(),
        degraded: snapshot.is_degraded(),
        timezone: state.timezone.name().to_string(),
    })
}

/// GET /calcular?date=&days=&hours=
///
/// Parameters are taken as raw pairs so repeated keys can be rejected.
pub async fn calculate(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> HandlerResult<ComputationResult> {
    let raw = RawParameters::from_pairs(pairs);
    let request = parse_request(&raw, Utc::now())?;
    tracing::debug!("Calculation request: {:?}", request);

    let engine = WorkingTimeEngine::new(state.timezone, state.holidays.current());
    let result = engine.compute_formatted(&request)?;

    Ok(Json(result))
}
