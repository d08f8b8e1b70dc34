use crate::domain::ports::{HolidayOracle, HolidaySource};
use crate::utils::error::{Result, WorkingDaysError};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// An immutable set of holiday dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Parses a JSON array of ISO dates. Only the `YYYY-MM-DD` prefix of each
    /// entry is used, so full timestamps are accepted too.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(content)?;
        let mut dates = BTreeSet::new();

        for entry in entries {
            let text = entry.as_str().ok_or_else(|| WorkingDaysError::HolidayParseError {
                message: format!("expected a date string, found {}", entry),
            })?;
            dates.insert(parse_iso_date(text)?);
        }

        Ok(Self { dates })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}

impl HolidayOracle for HolidaySet {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains(date)
    }
}

fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| {
        WorkingDaysError::HolidayParseError {
            message: format!("'{}' is not an ISO date: {}", text, e),
        }
    })
}

/// The process-wide holiday oracle.
///
/// Holds at most one snapshot. `replace` swaps the whole snapshot, so a
/// computation that took a [`HolidaySnapshot`] keeps seeing the dates it
/// started with.
#[derive(Debug, Default)]
pub struct HolidayCalendar {
    snapshot: RwLock<Option<Arc<HolidaySet>>>,
    degraded_reported: AtomicBool,
}

impl HolidayCalendar {
    /// A calendar with no holidays loaded yet (degraded mode).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holidays(set: HolidaySet) -> Self {
        let calendar = Self::new();
        calendar.replace(set);
        calendar
    }

    pub fn replace(&self, set: HolidaySet) {
        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Arc::new(set));
    }

    /// Fetches a complete set from `source` and installs it.
    pub async fn load_from(&self, source: &dyn HolidaySource) -> Result<usize> {
        tracing::info!("📥 Loading holidays from {}", source.describe());
        match source.fetch().await {
            Ok(set) => {
                let count = set.len();
                self.replace(set);
                tracing::info!("✅ {} holidays loaded", count);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("❌ Failed to load holidays from {}: {}", source.describe(), e);
                Err(e)
            }
        }
    }

    pub fn current(&self) -> HolidaySnapshot {
        let set = self
            .snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        if set.is_none() && !self.degraded_reported.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                "⚠️ Holidays not loaded yet - treating every weekday as a working day"
            );
        }

        HolidaySnapshot { set }
    }

    pub fn is_degraded(&self) -> bool {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }

    /// Loaded dates as `YYYY-MM-DD` strings.
    pub fn holidays(&self) -> Vec<String> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|set| set.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect())
            .unwrap_or_default()
    }
}

/// A point-in-time view of a [`HolidayCalendar`].
#[derive(Debug, Clone, Default)]
pub struct HolidaySnapshot {
    set: Option<Arc<HolidaySet>>,
}

impl HolidaySnapshot {
    pub fn is_degraded(&self) -> bool {
        self.set.is_none()
    }

    pub fn len(&self) -> usize {
        self.set.as_ref().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HolidayOracle for HolidaySnapshot {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.set.as_ref().map(|s| s.contains(date)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_dates_and_timestamps() {
        let set =
            HolidaySet::from_json_str(r#"["2025-01-01", "2025-01-06T00:00:00.000Z"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.is_holiday(date(2025, 1, 1)));
        assert!(set.is_holiday(date(2025, 1, 6)));
        assert!(!set.is_holiday(date(2025, 1, 2)));
    }

    #[test]
    fn rejects_non_string_entries() {
        let err = HolidaySet::from_json_str("[20250101]").unwrap_err();
        assert!(matches!(err, WorkingDaysError::HolidayParseError { .. }));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(HolidaySet::from_json_str(r#"["2025-02-30"]"#).is_err());
        assert!(HolidaySet::from_json_str(r#"{"dates": []}"#).is_err());
    }

    #[test]
    fn unloaded_calendar_degrades_to_no_holidays() {
        let calendar = HolidayCalendar::new();
        assert!(calendar.is_degraded());

        let snapshot = calendar.current();
        assert!(snapshot.is_degraded());
        assert!(!snapshot.is_holiday(date(2025, 1, 1)));
        assert!(calendar.holidays().is_empty());
    }

    #[test]
    fn snapshot_survives_replace() {
        let calendar = HolidayCalendar::with_holidays(HolidaySet::new([date(2025, 1, 1)]));
        let before = calendar.current();

        calendar.replace(HolidaySet::new([date(2025, 12, 25)]));
        let after = calendar.current();

        assert!(before.is_holiday(date(2025, 1, 1)));
        assert!(!before.is_holiday(date(2025, 12, 25)));
        assert!(after.is_holiday(date(2025, 12, 25)));
        assert!(!after.is_holiday(date(2025, 1, 1)));
        assert_eq!(calendar.holidays(), vec!["2025-12-25".to_string()]);
    }

    #[test]
    fn empty_set_is_loaded_not_degraded() {
        let calendar = HolidayCalendar::with_holidays(HolidaySet::default());
        assert!(!calendar.is_degraded());
        assert!(calendar.current().is_empty());
    }
}
