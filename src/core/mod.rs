pub mod advance;
pub mod calendar;
pub mod engine;
pub mod normalizer;

pub use crate::domain::model::{ComputationRequest, ComputationResult, WorkWindow};
pub use crate::domain::ports::{HolidayOracle, HolidaySource};
pub use crate::utils::error::Result;
pub use engine::{format_utc, WorkingTimeEngine, DEFAULT_TIMEZONE};
