use crate::domain::model::{ComputationRequest, RawParameters};
use crate::utils::error::{Result, WorkingDaysError};
use chrono::{DateTime, Months, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub const MAX_DAYS: i64 = 365;
pub const MAX_HOURS: i64 = 24 * 30;
pub const MAX_MONTHS_AHEAD: u32 = 24;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(WorkingDaysError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_timezone(field_name: &str, name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Not an IANA timezone name".to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Turns raw query parameters into a [`ComputationRequest`].
///
/// Checks run in a fixed order and the first failure is returned: shape and
/// numeric type of `days`/`hours`/`date`, presence of `days` or `hours`, then
/// the ranges of `days`, `hours` and `date`.
pub fn parse_request(raw: &RawParameters, now: DateTime<Utc>) -> Result<ComputationRequest> {
    let days = single_value("days", &raw.days)?
        .map(|v| parse_count("days", v))
        .transpose()?;
    let hours = single_value("hours", &raw.hours)?
        .map(|v| parse_count("hours", v))
        .transpose()?;
    let date = single_value("date", &raw.date)?;

    if days.is_none() && hours.is_none() {
        return Err(WorkingDaysError::MissingInput);
    }

    let days = days.map(|c| c.check("days", MAX_DAYS)).transpose()?;
    let hours = hours.map(|c| c.check("hours", MAX_HOURS)).transpose()?;
    let base_instant = date.map(|d| parse_utc_instant(d, now)).transpose()?;

    Ok(ComputationRequest::new(base_instant, days, hours))
}

/// Empty strings count as absent; more than one value is an array.
fn single_value<'a>(parameter: &str, values: &'a [String]) -> Result<Option<&'a str>> {
    let present: Vec<&str> = values
        .iter()
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect();

    match present.as_slice() {
        [] => Ok(None),
        [value] => Ok(Some(*value)),
        _ => Err(WorkingDaysError::InvalidParameterType {
            parameter: parameter.to_string(),
            reason: "cannot be an array".to_string(),
        }),
    }
}

/// A numeric value whose integrality and range are checked later.
enum Count {
    Integer(i64),
    Fractional(String),
}

impl Count {
    fn check(self, parameter: &str, max: i64) -> Result<i64> {
        let value = match self {
            Count::Integer(v) => v,
            Count::Fractional(raw) => {
                return Err(WorkingDaysError::InvalidParameterValue {
                    parameter: parameter.to_string(),
                    reason: format!("must be an integer, got {}", raw),
                })
            }
        };

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

        Ok(value)
    }
}

fn parse_count(parameter: &str, raw: &str) -> Result<Count> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(Count::Integer(value));
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 => {
            Ok(Count::Integer(value as i64))
        }
        Ok(value) if value.is_finite() => Ok(Count::Fractional(trimmed.to_string())),
        _ => Err(WorkingDaysError::InvalidParameterType {
            parameter: parameter.to_string(),
            reason: format!("must be a valid number, got '{}'", raw),
        }),
    }
}

fn utc_instant_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{3})?Z$")
            .expect("static date pattern")
    })
}

/// Parses `YYYY-MM-DDTHH:mm:ss[.sss]Z`, at most two years after `now`.
pub fn parse_utc_instant(value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    if !utc_instant_pattern().is_match(value) {
        return Err(WorkingDaysError::InvalidDateFormat {
            value: value.to_string(),
        });
    }

    let instant = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| WorkingDaysError::InvalidDate {
            value: value.to_string(),
        })?;

    match now.checked_add_months(Months::new(MAX_MONTHS_AHEAD)) {
        Some(limit) if instant > limit => Err(WorkingDaysError::InvalidDateRange {
            value: value.to_string(),
        }),
        _ => Ok(instant),
    }
}
