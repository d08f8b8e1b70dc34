//! Business calendar constants and the working-day / working-instant predicates.
//!
//! All times here are local civil times in the business timezone. Window
//! membership is decided at minute resolution: seconds and milliseconds never
//! move an instant out of a window.

use crate::domain::model::WorkWindow;
use crate::domain::ports::HolidayOracle;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};

pub const WORKDAY_START_HOUR: u32 = 8;
pub const LUNCH_START_HOUR: u32 = 12;
pub const LUNCH_END_HOUR: u32 = 13;
pub const WORKDAY_END_HOUR: u32 = 17;

pub const MORNING_WINDOW: WorkWindow = WorkWindow::from_hours(WORKDAY_START_HOUR, LUNCH_START_HOUR);
pub const AFTERNOON_WINDOW: WorkWindow = WorkWindow::from_hours(LUNCH_END_HOUR, WORKDAY_END_HOUR);
pub const WORK_WINDOWS: [WorkWindow; 2] = [MORNING_WINDOW, AFTERNOON_WINDOW];

/// Monday to Friday and not a holiday.
pub fn is_working_day<O: HolidayOracle + ?Sized>(oracle: &O, date: NaiveDate) -> bool {
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }
    !oracle.is_holiday(date)
}

/// Time-of-day inside `[08:00, 12:00] ∪ [13:00, 17:00]`, ignoring the date.
pub fn is_working_time(instant: NaiveDateTime) -> bool {
    let minute = minute_of_day(instant);
    WORK_WINDOWS.iter().any(|w| w.contains_minute(minute))
}

pub fn is_working_instant<O: HolidayOracle + ?Sized>(oracle: &O, instant: NaiveDateTime) -> bool {
    is_working_day(oracle, instant.date()) && is_working_time(instant)
}

pub(crate) fn minute_of_day(instant: NaiveDateTime) -> u32 {
    instant.hour() * 60 + instant.minute()
}

/// Minutes, seconds and sub-second part of `instant` as a duration.
pub(crate) fn sub_hour(instant: NaiveDateTime) -> TimeDelta {
    instant - truncate_to_hour(instant)
}

pub(crate) fn truncate_to_hour(instant: NaiveDateTime) -> NaiveDateTime {
    at_hour(instant.date(), instant.hour(), TimeDelta::zero())
}

/// `date` at `hour:00`, shifted by `offset`.
pub(crate) fn at_hour(date: NaiveDate, hour: u32, offset: TimeDelta) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(hour)) + offset
}
