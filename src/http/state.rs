use crate::adapters::HolidayCalendar;
use chrono_tz::Tz;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub holidays: Arc<HolidayCalendar>,
    pub timezone: Tz,
}

impl AppState {
    pub fn new(holidays: Arc<HolidayCalendar>, timezone: Tz) -> Self {
        Self { holidays, timezone }
    }
}
