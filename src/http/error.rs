//! Maps engine and validation failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorResponse;
use crate::utils::error::WorkingDaysError;

#[derive(Debug)]
pub struct AppError(pub WorkingDaysError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let err = self.0;

        let (status, body) = match &err {
            e if e.is_validation() => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: e.code().to_string(),
                    message: e.to_string(),
                },
            ),
            WorkingDaysError::NonexistentLocalTime { .. } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: err.code().to_string(),
                    message: format!("Calculation failed: {}", err),
                },
            ),
            _ => {
                tracing::error!("❌ Calculation failed: {}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "InternalServerError".to_string(),
                        message: "Internal server error".to_string(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<WorkingDaysError> for AppError {
    fn from(err: WorkingDaysError) -> Self {
        AppError(err)
    }
}
