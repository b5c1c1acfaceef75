//! Month range filtering
//!
//! # Example
//!
//! ```
//! use staystat_core::filters::MonthFilter;
//! use staystat_core::types::MonthKey;
//!
//! // Filter for Q1 2024
//! let filter = MonthFilter::new()
//!     .with_since(MonthKey::new(2024, 1).unwrap())
//!     .with_until(MonthKey::new(2024, 3).unwrap());
//!
//! assert!(filter.matches(&MonthKey::new(2024, 2).unwrap()));
//! assert!(!filter.matches(&MonthKey::new(2024, 4).unwrap()));
//! ```

use crate::types::MonthKey;

/// Inclusive month range; either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthFilter {
    /// Start month (inclusive)
    pub since: Option<MonthKey>,
    /// End month (inclusive)
    pub until: Option<MonthKey>,
}

impl MonthFilter {
    /// Create a new month filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start month
    pub fn with_since(mut self, month: MonthKey) -> Self {
        self.since = Some(month);
        self
    }

    /// Set the end month
    pub fn with_until(mut self, month: MonthKey) -> Self {
        self.until = Some(month);
        self
    }

    /// Whether any bound is set
    pub fn is_active(&self) -> bool {
        self.since.is_some() || self.until.is_some()
    }

    /// Check if a month falls within the filter
    pub fn matches(&self, month: &MonthKey) -> bool {
        if self.since.is_some_and(|since| *month < since) {
            return false;
        }
        if self.until.is_some_and(|until| *month > until) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn month(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    #[test]
    fn test_month_filter() {
        let filter = MonthFilter::new()
            .with_since(month(2024, 1))
            .with_until(month(2024, 3));

        let day = |y, m, d| MonthKey::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert!(!filter.matches(&day(2023, 12, 31)));
        assert!(filter.matches(&day(2024, 1, 1)));
        assert!(filter.matches(&day(2024, 2, 15)));
        assert!(filter.matches(&day(2024, 3, 31)));
        assert!(!filter.matches(&day(2024, 4, 1)));
    }

    #[test]
    fn test_open_bounds() {
        let filter = MonthFilter::new();
        assert!(!filter.is_active());
        assert!(filter.matches(&month(1999, 1)));

        let since_only = MonthFilter::new().with_since(month(2024, 6));
        assert!(since_only.is_active());
        assert!(since_only.matches(&month(2030, 1)));
        assert!(!since_only.matches(&month(2024, 5)));

        let until_only = MonthFilter::new().with_until(month(2024, 6));
        assert!(until_only.matches(&month(2000, 1)));
        assert!(!until_only.matches(&month(2024, 7)));
    }
}
