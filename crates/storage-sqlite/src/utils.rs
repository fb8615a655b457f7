//! Helpers for decoding values SQLite stores as `TEXT`.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::errors::StorageError;

/// Date format of `transactions.transaction_date`.
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a decimal column, accepting values written as floats by other tools.
pub fn parse_stored_decimal(value: &str, field_name: &str) -> Result<Decimal, StorageError> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| {
            f64::from_str(trimmed)
                .ok()
                .filter(|f| f.is_finite())
                .and_then(Decimal::from_f64)
        })
        .ok_or_else(|| {
            StorageError::InvalidStoredValue(format!("{} is not a number: '{}'", field_name, value))
        })
}

/// Parses a date column. Accepts a full timestamp by keeping its date part.
pub fn parse_stored_date(value: &str, field_name: &str) -> Result<NaiveDate, StorageError> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, STORED_DATE_FORMAT).map_err(|_| {
        StorageError::InvalidStoredValue(format!("{} is not a date: '{}'", field_name, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_stored_decimal() {
        assert_eq!(parse_stored_decimal("2000", "limit").unwrap(), dec!(2000));
        assert_eq!(parse_stored_decimal(" 12.50 ", "limit").unwrap(), dec!(12.50));
        assert_eq!(parse_stored_decimal("1e3", "limit").unwrap(), dec!(1000));
        assert!(parse_stored_decimal("abc", "limit").is_err());
        assert!(parse_stored_decimal("NaN", "limit").is_err());
    }

    #[test]
    fn test_parse_stored_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_stored_date("2025-03-14", "date").unwrap(), expected);
        assert_eq!(
            parse_stored_date("2025-03-14T09:30:00Z", "date").unwrap(),
            expected
        );
        assert!(parse_stored_date("14/03/2025", "date").is_err());
        assert!(parse_stored_date("", "date").is_err());
    }
}
