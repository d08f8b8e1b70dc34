pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "http-server")]
pub mod http;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::ServiceConfig;

pub use crate::adapters::{FileHolidaySource, HolidayCalendar, HolidaySet, HttpHolidaySource};
pub use crate::core::{engine::WorkingTimeEngine, ComputationRequest, ComputationResult};
pub use crate::utils::error::{Result, WorkingDaysError};
