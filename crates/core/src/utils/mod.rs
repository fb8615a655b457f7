pub mod currency_format;
pub mod time_utils;

pub use currency_format::format_inr;
pub use time_utils::{month_bounds, parse_timestamp, to_iso_string, today_utc};
