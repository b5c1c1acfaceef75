//! Shared test helpers for unit tests inside this crate
//!
//! Integration tests in `tests/` keep their own copy in `tests/common/mod.rs`
//! because `#[cfg(test)]` items are not visible to them.

use crate::types::{BookingDate, BookingRecord};

/// Build a record from a date string, panicking on bad test input
pub fn booking(date: &str, total_amount: f64, adult: u64, room_count: u64) -> BookingRecord {
    let effective_date =
        BookingDate::parse_str(date).unwrap_or_else(|| panic!("bad test date: {date}"));
    BookingRecord::new(effective_date, total_amount, adult, room_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MonthKey;

    #[test]
    fn test_booking_helper() {
        let record = booking("2024-03-02", 12.5, 2, 1);
        assert_eq!(
            record.effective_date.month_key(&chrono_tz::Tz::UTC),
            MonthKey::new(2024, 3).unwrap()
        );
        assert_eq!(record.total_amount, 12.5);
    }
}
