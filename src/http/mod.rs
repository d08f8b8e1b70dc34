//! HTTP adapter over the working-time engine.
//!
//! - `GET /` liveness banner
//! - `GET /health` holiday snapshot status
//! - `GET /calcular?date=&days=&hours=` the calculation itself

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::AppError;
pub use router::create_router;
pub use state::AppState;
