use crate::core::advance::{add_working_days, add_working_hours, settle_after_days};
use crate::core::calendar::{is_working_day, is_working_instant};
use crate::core::normalizer::snap_to_working_instant;
use crate::domain::model::{ComputationRequest, ComputationResult};
use crate::domain::ports::HolidayOracle;
use crate::utils::error::{Result, WorkingDaysError};
use crate::utils::validation::{MAX_DAYS, MAX_HOURS};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Bogota;

/// Wire format of every instant the service returns.
pub const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Business-time arithmetic in one timezone against one holiday oracle.
pub struct WorkingTimeEngine<O: HolidayOracle> {
    timezone: Tz,
    oracle: O,
}

impl<O: HolidayOracle> WorkingTimeEngine<O> {
    pub fn new(timezone: Tz, oracle: O) -> Self {
        Self { timezone, oracle }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        is_working_day(&self.oracle, date)
    }

    pub fn is_working_instant(&self, local: NaiveDateTime) -> bool {
        is_working_instant(&self.oracle, local)
    }

    pub fn snap_to_working_instant(&self, local: NaiveDateTime) -> NaiveDateTime {
        snap_to_working_instant(&self.oracle, local)
    }

    pub fn add_working_days(&self, local: NaiveDateTime, days: u32) -> NaiveDateTime {
        add_working_days(&self.oracle, local, days)
    }

    pub fn add_working_hours(&self, local: NaiveDateTime, hours: f64) -> NaiveDateTime {
        add_working_hours(&self.oracle, local, hours)
    }

    /// Wall-clock time of `utc` in the business timezone.
    pub fn to_local(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        utc.with_timezone(&self.timezone).naive_local()
    }

    /// The UTC instant of a business-timezone wall-clock time. Ambiguous
    /// times resolve to the earlier instant.
    pub fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| WorkingDaysError::NonexistentLocalTime {
                local: local.to_string(),
                timezone: self.timezone.name().to_string(),
            })
    }

    pub fn compute_resulting_instant(&self, request: &ComputationRequest) -> Result<DateTime<Utc>> {
        self.compute_at(request, Utc::now())
    }

    /// Same as [`compute_resulting_instant`](Self::compute_resulting_instant)
    /// with `now` standing in for the current time.
    pub fn compute_at(
        &self,
        request: &ComputationRequest,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        let (days, hours) = checked_counts(request)?;

        let base = self.to_local(request.base_instant.unwrap_or(now));
        let mut current = self.snap_to_working_instant(base);
        tracing::debug!("Base {} snapped to {}", base, current);

        if days > 0 {
            current = self.add_working_days(current, days);
            current = settle_after_days(&self.oracle, current);
            tracing::debug!("After {} working days: {}", days, current);
        }

        if hours > 0 {
            current = self.add_working_hours(current, f64::from(hours));
            tracing::debug!("After {} working hours: {}", hours, current);
        }

        self.to_utc(current)
    }

    pub fn compute_formatted(&self, request: &ComputationRequest) -> Result<ComputationResult> {
        let instant = self.compute_resulting_instant(request)?;
        Ok(ComputationResult {
            date: format_utc(instant),
        })
    }
}

pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format(UTC_FORMAT).to_string()
}

fn checked_counts(request: &ComputationRequest) -> Result<(u32, u32)> {
    if request.days.is_none() && request.hours.is_none() {
        return Err(WorkingDaysError::MissingInput);
    }

    let days = bounded_count("days", request.days.unwrap_or(0), MAX_DAYS)?;
    let hours = bounded_count("hours", request.hours.unwrap_or(0), MAX_HOURS)?;
    Ok((days, hours))
}

/// Counts outside `[0, max]` are rejected before any arithmetic runs.
fn bounded_count(parameter: &str, value: i64, max: i64) -> Result<u32> {
    if value < 0 {
        return Err(WorkingDaysError::InvalidRange {
            parameter: parameter.to_string(),
            value,
        });
    }
    if value > max {
        return Err(WorkingDaysError::InvalidParameterValue {
            parameter: parameter.to_string(),
            reason: format!("cannot be greater than {}", max),
        });
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::holidays::{HolidayCalendar, HolidaySet};

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn engine() -> WorkingTimeEngine<HolidaySet> {
        let holidays = HolidaySet::new([
            NaiveDate::from_ymd_opt(2025, 4, 17).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 18).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        ]);
        WorkingTimeEngine::new(DEFAULT_TIMEZONE, holidays)
    }

    fn compute(base: &str, days: Option<i64>, hours: Option<i64>) -> String {
        let request = ComputationRequest::new(Some(utc(base)), days, hours);
        format_utc(engine().compute_resulting_instant(&request).unwrap())
    }

    #[test]
    fn requires_days_or_hours() {
        let request = ComputationRequest::new(Some(utc("2025-04-14T15:00:00Z")), None, None);
        let err = engine().compute_resulting_instant(&request).unwrap_err();
        assert!(matches!(err, WorkingDaysError::MissingInput));
    }

    #[test]
    fn rejects_negative_counts() {
        let request = ComputationRequest::new(Some(utc("2025-04-14T15:00:00Z")), Some(-1), None);
        let err = engine().compute_resulting_instant(&request).unwrap_err();
        assert!(matches!(err, WorkingDaysError::InvalidRange { .. }));

        let request = ComputationRequest::new(None, None, Some(-3));
        assert!(engine().compute_resulting_instant(&request).is_err());
    }

    #[test]
    fn rejects_counts_above_the_caps() {
        let base = Some(utc("2025-04-14T15:00:00Z"));

        let request = ComputationRequest::new(base, Some(i64::from(u32::MAX)), None);
        let err = engine().compute_resulting_instant(&request).unwrap_err();
        match err {
            WorkingDaysError::InvalidParameterValue { parameter, .. } => {
                assert_eq!(parameter, "days")
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let request = ComputationRequest::new(base, None, Some(MAX_HOURS + 1));
        let err = engine().compute_resulting_instant(&request).unwrap_err();
        match err {
            WorkingDaysError::InvalidParameterValue { parameter, .. } => {
                assert_eq!(parameter, "hours")
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let request = ComputationRequest::new(base, Some(MAX_DAYS), Some(MAX_HOURS));
        assert!(engine().compute_resulting_instant(&request).is_ok());
    }

    #[test]
    fn friday_end_of_day_plus_one_day() {
        // 17:00 in Bogota is 22:00Z
        assert_eq!(compute("2025-01-10T22:00:00Z", Some(1), None), "2025-01-13T22:00:00Z");
    }

    #[test]
    fn one_hour_across_lunch() {
        // 11:30 local + 1h -> 13:30 local
        assert_eq!(compute("2025-04-14T16:30:00Z", None, Some(1)), "2025-04-14T18:30:00Z");
    }

    #[test]
    fn holiday_base_snaps_to_previous_working_day() {
        // Holy Thursday 10:00 local -> Wednesday 17:00 local
        assert_eq!(compute("2025-04-17T15:00:00Z", None, Some(0)), "2025-04-16T22:00:00Z");
        // then one hour lands on Monday 09:00 local
        assert_eq!(compute("2025-04-17T15:00:00Z", None, Some(1)), "2025-04-21T14:00:00Z");
    }

    #[test]
    fn days_then_hours_from_mid_window() {
        // Monday 10:00 local + 5 days skips the Easter holidays and lands on
        // Wednesday 23rd 10:00, then 4h -> 15:00 local
        assert_eq!(compute("2025-04-14T15:00:00Z", Some(5), Some(4)), "2025-04-23T20:00:00Z");
    }

    #[test]
    fn days_from_evening_pin_to_morning() {
        // Monday 18:40 local snaps to 17:40, one day later is outside the
        // window and pins to 08:00
        assert_eq!(compute("2025-04-14T23:40:00Z", Some(1), None), "2025-04-15T13:00:00Z");
        assert_eq!(compute("2025-04-14T23:40:00Z", Some(1), Some(3)), "2025-04-15T16:00:00Z");
    }

    #[test]
    fn weekend_base_with_hours() {
        // Saturday -> Friday 17:00 local, +1h -> Monday 09:00 local
        assert_eq!(compute("2025-04-12T19:00:00Z", None, Some(1)), "2025-04-14T14:00:00Z");
    }

    #[test]
    fn local_round_trip_is_lossless() {
        let engine = engine();
        let base = utc("2025-04-14T15:27:41Z");
        assert_eq!(engine.to_utc(engine.to_local(base)).unwrap(), base);
    }

    #[test]
    fn missing_base_uses_now() {
        let engine = engine();
        let now = utc("2025-04-14T15:00:00Z");
        let request = ComputationRequest::new(None, Some(1), None);
        assert_eq!(
            format_utc(engine.compute_at(&request, now).unwrap()),
            "2025-04-15T15:00:00Z"
        );
    }

    #[test]
    fn unloaded_calendar_treats_holidays_as_working_days() {
        let calendar = HolidayCalendar::new();
        let engine = WorkingTimeEngine::new(DEFAULT_TIMEZONE, calendar.current());
        let request = ComputationRequest::new(Some(utc("2025-04-17T15:00:00Z")), None, Some(1));
        assert_eq!(
            format_utc(engine.compute_resulting_instant(&request).unwrap()),
            "2025-04-17T16:00:00Z"
        );
    }
}
