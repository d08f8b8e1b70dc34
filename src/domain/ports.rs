use crate::adapters::holidays::HolidaySet;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Answers whether a calendar date is a holiday.
pub trait HolidayOracle: Send + Sync {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

impl<T: HolidayOracle + ?Sized> HolidayOracle for &T {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        (**self).is_holiday(date)
    }
}

impl<T: HolidayOracle + ?Sized> HolidayOracle for std::sync::Arc<T> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        (**self).is_holiday(date)
    }
}

/// Produces a complete holiday snapshot from some external location.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch(&self) -> Result<HolidaySet>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}
