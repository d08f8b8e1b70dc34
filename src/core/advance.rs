use crate::core::calendar::{
    at_hour, is_working_day, is_working_time, truncate_to_hour, LUNCH_END_HOUR,
    LUNCH_START_HOUR, WORKDAY_END_HOUR, WORKDAY_START_HOUR,
};
use crate::domain::ports::HolidayOracle;
use chrono::{NaiveDateTime, TimeDelta, Timelike};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Steps forward one calendar day at a time until `days` working days have
/// been counted. The time of day is not touched.
pub fn add_working_days<O: HolidayOracle + ?Sized>(
    oracle: &O,
    instant: NaiveDateTime,
    days: u32,
) -> NaiveDateTime {
    let mut current = instant;
    let mut counted = 0;

    while counted < days {
        current += TimeDelta::days(1);
        if is_working_day(oracle, current.date()) {
            counted += 1;
        }
    }

    current
}

/// Re-asserts validity after a day advance: skips forward over non-working
/// days, then pins a non-working time of day to 08:00:00.000.
pub fn settle_after_days<O: HolidayOracle + ?Sized>(
    oracle: &O,
    instant: NaiveDateTime,
) -> NaiveDateTime {
    let mut current = instant;

    while !is_working_day(oracle, current.date()) {
        current += TimeDelta::days(1);
    }

    if !is_working_time(current) {
        current = at_hour(current.date(), WORKDAY_START_HOUR, TimeDelta::zero());
    }

    current
}

/// Adds `hours` of working time, carrying whatever does not fit in the
/// current window into the following windows.
///
/// The budget is tracked in milliseconds, so fractional hours split across
/// lunch, evenings, weekends and holidays.
pub fn add_working_hours<O: HolidayOracle + ?Sized>(
    oracle: &O,
    instant: NaiveDateTime,
    hours: f64,
) -> NaiveDateTime {
    if hours.is_nan() || hours <= 0.0 {
        return instant;
    }

    let mut remaining = TimeDelta::milliseconds((hours * MILLIS_PER_HOUR).round() as i64);
    let mut current = instant;

    while remaining > TimeDelta::zero() {
        if !in_working_period(oracle, current) {
            current = next_period_start(oracle, current);
        }

        let available = period_end(current) - current;
        if available <= TimeDelta::zero() {
            current = next_period_start(oracle, current);
            continue;
        }

        let step = remaining.min(available);
        current += step;
        remaining -= step;
    }

    current
}

/// A working day with the hour inside `[8, 12)` or `[13, 17)`. Unlike
/// `is_working_time`, the closing edges do not count here: there is no time
/// left to consume at 12:00 or 17:00.
fn in_working_period<O: HolidayOracle + ?Sized>(oracle: &O, instant: NaiveDateTime) -> bool {
    let hour = instant.hour();
    let in_hours = (WORKDAY_START_HOUR..LUNCH_START_HOUR).contains(&hour)
        || (LUNCH_END_HOUR..WORKDAY_END_HOUR).contains(&hour);
    in_hours && is_working_day(oracle, instant.date())
}

fn period_end(instant: NaiveDateTime) -> NaiveDateTime {
    let end_hour = if instant.hour() < LUNCH_START_HOUR {
        LUNCH_START_HOUR
    } else {
        WORKDAY_END_HOUR
    };
    at_hour(instant.date(), end_hour, TimeDelta::zero())
}

fn next_period_start<O: HolidayOracle + ?Sized>(
    oracle: &O,
    instant: NaiveDateTime,
) -> NaiveDateTime {
    let mut candidate = instant;

    loop {
        if in_working_period(oracle, candidate) {
            return candidate;
        }

        candidate = truncate_to_hour(candidate) + TimeDelta::hours(1);

        if candidate.hour() == LUNCH_START_HOUR {
            candidate = at_hour(candidate.date(), LUNCH_END_HOUR, TimeDelta::zero());
        }

        if candidate.hour() > WORKDAY_END_HOUR || candidate.hour() < WORKDAY_START_HOUR {
            let next_day = (candidate + TimeDelta::days(1)).date();
            candidate = at_hour(next_day, WORKDAY_START_HOUR, TimeDelta::zero());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::holidays::HolidaySet;
    use chrono::NaiveDate;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn colombia_april() -> HolidaySet {
        // Holy Thursday and Good Friday
        HolidaySet::new([
            NaiveDate::from_ymd_opt(2025, 4, 17).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 18).unwrap(),
        ])
    }

    #[test]
    fn zero_days_is_a_no_op() {
        let oracle = colombia_april();
        let t = local(2025, 4, 14, 10, 30, 0);
        assert_eq!(add_working_days(&oracle, t, 0), t);
    }

    #[test]
    fn days_skip_weekends_and_keep_time() {
        let oracle = colombia_april();
        let friday = local(2025, 4, 11, 17, 0, 0);
        assert_eq!(add_working_days(&oracle, friday, 1), local(2025, 4, 14, 17, 0, 0));
    }

    #[test]
    fn days_skip_holidays() {
        let oracle = colombia_april();
        let wednesday = local(2025, 4, 16, 9, 0, 0);
        assert_eq!(add_working_days(&oracle, wednesday, 1), local(2025, 4, 21, 9, 0, 0));
    }

    #[test]
    fn days_are_additive() {
        let oracle = colombia_april();
        let t = local(2025, 4, 9, 15, 20, 0);
        for a in 0..6 {
            for b in 0..6 {
                let chained = add_working_days(&oracle, add_working_days(&oracle, t, a), b);
                assert_eq!(chained, add_working_days(&oracle, t, a + b));
            }
        }
    }

    #[test]
    fn settle_pins_to_start_of_day() {
        let oracle = colombia_april();
        assert_eq!(
            settle_after_days(&oracle, local(2025, 4, 14, 17, 30, 0)),
            local(2025, 4, 14, 8, 0, 0)
        );
        assert_eq!(
            settle_after_days(&oracle, local(2025, 4, 17, 10, 0, 0)),
            local(2025, 4, 21, 10, 0, 0)
        );
        let valid = local(2025, 4, 14, 12, 0, 0);
        assert_eq!(settle_after_days(&oracle, valid), valid);
    }

    #[test]
    fn zero_hours_is_a_no_op() {
        let oracle = colombia_april();
        let t = local(2025, 4, 14, 12, 30, 0);
        assert_eq!(add_working_hours(&oracle, t, 0.0), t);
        assert_eq!(add_working_hours(&oracle, t, -2.0), t);
    }

    #[test]
    fn hours_inside_one_window() {
        let oracle = colombia_april();
        assert_eq!(
            add_working_hours(&oracle, local(2025, 4, 14, 8, 0, 0), 3.0),
            local(2025, 4, 14, 11, 0, 0)
        );
    }

    #[test]
    fn hours_carry_across_lunch() {
        let oracle = colombia_april();
        assert_eq!(
            add_working_hours(&oracle, local(2025, 4, 14, 11, 30, 0), 1.0),
            local(2025, 4, 14, 13, 30, 0)
        );
    }

    #[test]
    fn noon_starts_counting_at_one() {
        let oracle = colombia_april();
        assert_eq!(
            add_working_hours(&oracle, local(2025, 4, 14, 12, 0, 0), 1.0),
            local(2025, 4, 14, 14, 0, 0)
        );
    }

    #[test]
    fn hours_carry_across_evening_and_weekend() {
        let oracle = colombia_april();
        // Friday 16:00 + 3h: one hour on Friday, two on Monday morning
        assert_eq!(
            add_working_hours(&oracle, local(2025, 4, 11, 16, 0, 0), 3.0),
            local(2025, 4, 14, 10, 0, 0)
        );
    }

    #[test]
    fn end_of_day_starts_next_working_morning() {
        let oracle = colombia_april();
        // Wednesday 17:00 before the Easter holidays resumes on Monday
        assert_eq!(
            add_working_hours(&oracle, local(2025, 4, 16, 17, 0, 0), 1.0),
            local(2025, 4, 21, 9, 0, 0)
        );
    }

    #[test]
    fn full_day_of_hours_spans_both_windows() {
        let oracle = colombia_april();
        assert_eq!(
            add_working_hours(&oracle, local(2025, 4, 14, 8, 0, 0), 8.0),
            local(2025, 4, 14, 17, 0, 0)
        );
        assert_eq!(
            add_working_hours(&oracle, local(2025, 4, 14, 8, 0, 0), 9.0),
            local(2025, 4, 15, 9, 0, 0)
        );
    }

    #[test]
    fn fractional_hours_split_at_lunch() {
        let oracle = colombia_april();
        assert_eq!(
            add_working_hours(&oracle, local(2025, 4, 14, 11, 15, 0), 1.5),
            local(2025, 4, 14, 13, 45, 0)
        );
    }

    #[test]
    fn after_hours_minutes_are_dropped_by_next_window() {
        let oracle = colombia_april();
        // 17:25 is past the afternoon window, so counting starts at 08:00
        assert_eq!(
            add_working_hours(&oracle, local(2025, 4, 14, 17, 25, 0), 2.0),
            local(2025, 4, 15, 10, 0, 0)
        );
    }

    #[test]
    fn non_working_start_moves_to_next_window() {
        let oracle = colombia_april();
        // Saturday morning counts from Monday 08:00
        assert_eq!(
            add_working_hours(&oracle, local(2025, 4, 12, 10, 0, 0), 1.0),
            local(2025, 4, 14, 9, 0, 0)
        );
    }
}
