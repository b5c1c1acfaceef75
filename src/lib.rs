//! staystat - monthly revenue, guest and room statistics from a hotel-booking API
//!
//! This library provides functionality to:
//! - Fetch tours and bookings from the booking API
//! - Aggregate bookings into monthly revenue, guest and room series
//! - Render the series as tables, JSON, chart datasets or terminal charts
//! - Refresh the dashboard periodically
//!
//! # Examples
//!
//! ```no_run
//! use staystat::{
//!     aggregation::MonthlyAggregator,
//!     dashboard::{Dashboard, DashboardState},
//!     timezone::TimezoneConfig,
//! };
//! use staystat_api::{ApiClient, ApiConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> staystat::Result<()> {
//!     let client = ApiClient::new(ApiConfig::default())?;
//!     let dashboard = Dashboard::new(Arc::new(client), MonthlyAggregator::new(TimezoneConfig::default()));
//!
//!     if let DashboardState::Loaded(snapshot) = dashboard.refresh().await {
//!         println!("{:?}", snapshot.series.label_strings());
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod dashboard;
pub mod output;

pub use staystat_core::{error, filters, provider, timezone, types};

// Re-export commonly used types
pub use error::{Result, StaystatError};
pub use types::{BookingDate, BookingRecord, MonthKey, RawBooking, TourRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
