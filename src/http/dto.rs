use serde::{Deserialize, Serialize};

/// Body of every non-200 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub holidays_loaded: usize,
    pub degraded: bool,
    pub timezone: String,
}
