// Adapters layer: holiday snapshot plus the sources that fill it.

pub mod holidays;
pub mod http;
pub mod storage;

pub use holidays::{HolidayCalendar, HolidaySet, HolidaySnapshot};
pub use http::{HttpHolidaySource, DEFAULT_HOLIDAYS_URL};
pub use storage::FileHolidaySource;
