//! Monthly aggregation of bookings
//!
//! Groups validated bookings by the calendar month of their effective date and
//! sums revenue, adult guests and booked rooms per month. The result is a set
//! of position-aligned series ordered from the oldest month to the newest.
//!
//! Records reach this module already validated (see
//! [`BookingRecord::from_raw`](crate::types::BookingRecord::from_raw)), so the
//! aggregator itself cannot fail.
//!
//! # Examples
//!
//! ```
//! use staystat::aggregation::MonthlyAggregator;
//! use staystat::timezone::TimezoneConfig;
//! use staystat::types::{BookingDate, BookingRecord};
//!
//! let records = vec![
//!     BookingRecord::new(BookingDate::parse_str("2024-01-10").unwrap(), 100.0, 2, 1),
//!     BookingRecord::new(BookingDate::parse_str("2023-12-05").unwrap(), 200.0, 4, 2),
//!     BookingRecord::new(BookingDate::parse_str("2024-01-20").unwrap(), 50.0, 1, 0),
//! ];
//!
//! let aggregator = MonthlyAggregator::new(TimezoneConfig::utc());
//! let series = aggregator.aggregate(&records);
//!
//! assert_eq!(series.label_strings(), vec!["Dec-2023", "Jan-2024"]);
//! assert_eq!(series.revenue, vec![200.0, 150.0]);
//! assert_eq!(series.guests, vec![4, 3]);
//! assert_eq!(series.rooms_booked, vec![2, 1]);
//! ```

use crate::error::Result;
use crate::timezone::TimezoneConfig;
use crate::types::{BookingRecord, MonthKey};
use futures::stream::{Stream, StreamExt};
use std::collections::BTreeMap;
use tracing::debug;

pub use staystat_core::aggregation_types::{AggregatedSeries, MonthBucket, SeriesRow, Totals};

/// Groups bookings into calendar months
#[derive(Debug, Clone, Copy)]
pub struct MonthlyAggregator {
    timezone_config: TimezoneConfig,
}

impl Default for MonthlyAggregator {
    fn default() -> Self {
        Self::new(TimezoneConfig::default())
    }
}

impl MonthlyAggregator {
    /// Create an aggregator that places instants in months of `timezone_config`
    pub fn new(timezone_config: TimezoneConfig) -> Self {
        Self { timezone_config }
    }

    /// Sum every record into its month's bucket
    ///
    /// The map iterates in chronological order; buckets exist only for months
    /// that received at least one record.
    pub fn aggregate_buckets(&self, records: &[BookingRecord]) -> BTreeMap<MonthKey, MonthBucket> {
        let mut buckets: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
        for record in records {
            self.add(&mut buckets, record);
        }
        buckets
    }

    /// Aggregate records into aligned monthly series
    pub fn aggregate(&self, records: &[BookingRecord]) -> AggregatedSeries {
        let buckets = self.aggregate_buckets(records);
        debug!(
            "Aggregated {} bookings into {} months ({})",
            records.len(),
            buckets.len(),
            self.timezone_config.display_name()
        );
        AggregatedSeries::from_ordered_buckets(buckets)
    }

    /// Aggregate a stream of records, stopping at the first error
    pub async fn aggregate_stream(
        &self,
        records: impl Stream<Item = Result<BookingRecord>>,
    ) -> Result<AggregatedSeries> {
        let mut buckets: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
        let mut count = 0u64;

        futures::pin_mut!(records);
        while let Some(result) = records.next().await {
            let record = result?;
            self.add(&mut buckets, &record);

            count += 1;
        }
        debug!("Aggregated {} streamed bookings into {} months", count, buckets.len());

        Ok(AggregatedSeries::from_ordered_buckets(buckets))
    }

    fn add(&self, buckets: &mut BTreeMap<MonthKey, MonthBucket>, record: &BookingRecord) {
        let month = self.timezone_config.month_of(&record.effective_date);
        buckets.entry(month).or_default().add_record(record);
    }
}
