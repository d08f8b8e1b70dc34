use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One working session of the business day, in minutes since local midnight.
/// Both edges are working instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    pub start: u32,
    pub end: u32,
}

impl WorkWindow {
    pub const fn from_hours(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start: start_hour * 60,
            end: end_hour * 60,
        }
    }

    pub fn contains_minute(&self, minute_of_day: u32) -> bool {
        (self.start..=self.end).contains(&minute_of_day)
    }
}

/// Already-validated input for one computation.
///
/// `base_instant` of `None` means "now" in the business timezone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationRequest {
    pub base_instant: Option<DateTime<Utc>>,
    pub days: Option<i64>,
    pub hours: Option<i64>,
}

impl ComputationRequest {
    pub fn new(base_instant: Option<DateTime<Utc>>, days: Option<i64>, hours: Option<i64>) -> Self {
        Self {
            base_instant,
            days,
            hours,
        }
    }
}

/// Raw, untyped parameters as they arrive from a query string or command line.
///
/// Each field keeps every occurrence so repeated keys can be rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParameters {
    pub date: Vec<String>,
    pub days: Vec<String>,
    pub hours: Vec<String>,
}

impl RawParameters {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "date" => params.date.push(value.into()),
                "days" => params.days.push(value.into()),
                "hours" => params.hours.push(value.into()),
                _ => {}
            }
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub date: String,
}
