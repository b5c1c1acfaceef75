//! Core types, traits, and utilities for staystat
//!
//! This crate provides the booking domain types, error handling,
//! timezone configuration, month filters, and the booking source trait
//! used by all other staystat crates.

pub mod aggregation_types;
pub mod error;
pub mod filters;
pub mod provider;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, StaystatError};
pub use types::{BookingDate, BookingRecord, MonthKey, RawBooking, TourRecord};
