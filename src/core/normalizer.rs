use crate::core::calendar::{
    at_hour, is_working_day, minute_of_day, sub_hour, LUNCH_END_HOUR, LUNCH_START_HOUR,
    WORKDAY_END_HOUR, WORKDAY_START_HOUR,
};
use crate::domain::ports::HolidayOracle;
use chrono::{NaiveDateTime, TimeDelta};

/// Moves `instant` back to the latest working instant at or before it.
///
/// Rolling back across days or out of the evening keeps the minutes and
/// seconds of the input instant (`Sat 10:25` becomes `Fri 17:25`). Snapping
/// out of the lunch gap does not: anything in `(12:00, 13:00)` becomes exactly
/// `12:00:00.000`.
pub fn snap_to_working_instant<O: HolidayOracle + ?Sized>(
    oracle: &O,
    instant: NaiveDateTime,
) -> NaiveDateTime {
    let remainder = sub_hour(instant);
    let mut current = instant;

    loop {
        while !is_working_day(oracle, current.date()) {
            current = end_of_previous_day(current, remainder);
        }

        let minute = minute_of_day(current);

        if minute < WORKDAY_START_HOUR * 60 {
            current = end_of_previous_day(current, remainder);
            continue;
        }

        if minute > WORKDAY_END_HOUR * 60 {
            return at_hour(current.date(), WORKDAY_END_HOUR, remainder);
        }

        if minute > LUNCH_START_HOUR * 60 && minute < LUNCH_END_HOUR * 60 {
            return at_hour(current.date(), LUNCH_START_HOUR, TimeDelta::zero());
        }

        return current;
    }
}

fn end_of_previous_day(current: NaiveDateTime, remainder: TimeDelta) -> NaiveDateTime {
    let previous = (current - TimeDelta::days(1)).date();
    at_hour(previous, WORKDAY_END_HOUR, remainder)
}
