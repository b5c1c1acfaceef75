//! Aggregation data types for staystat
//!
//! Pure data structures used for monthly booking summaries.
//! These types have no dependencies on the API client or the aggregator.

use crate::filters::MonthFilter;
use crate::types::{BookingRecord, MonthKey};
use serde::{Deserialize, Serialize};

/// Running sums for one calendar month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Sum of `totalAmount`
    pub revenue: f64,
    /// Sum of adult guests
    pub guests: u64,
    /// Sum of booked room counts
    pub rooms_booked: u64,
    /// Number of bookings that landed in this month
    pub bookings: u64,
}

impl MonthBucket {
    /// Add one booking to the bucket
    ///
    /// Counts saturate at `u64::MAX` instead of wrapping.
    pub fn add_record(&mut self, record: &BookingRecord) {
        self.revenue += record.total_amount;
        self.guests = self.guests.saturating_add(record.adult);
        self.rooms_booked = self.rooms_booked.saturating_add(record.room_count);
        self.bookings = self.bookings.saturating_add(1);
    }
}

/// One month of an [`AggregatedSeries`], for row-oriented consumers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRow {
    pub month: MonthKey,
    pub revenue: f64,
    pub guests: u64,
    pub rooms_booked: u64,
    pub bookings: u64,
}

/// Monthly series, aligned by position
///
/// `labels[i]` names the month that `revenue[i]`, `guests[i]`,
/// `rooms_booked[i]` and `bookings[i]` belong to. Labels are strictly
/// increasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSeries {
    /// Months in chronological order
    pub labels: Vec<MonthKey>,
    /// Revenue per month
    pub revenue: Vec<f64>,
    /// Adult guests per month
    pub guests: Vec<u64>,
    /// Rooms booked per month
    pub rooms_booked: Vec<u64>,
    /// Bookings per month
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bookings: Vec<u64>,
}

impl AggregatedSeries {
    /// Build a series from buckets already in chronological order
    pub fn from_ordered_buckets(buckets: impl IntoIterator<Item = (MonthKey, MonthBucket)>) -> Self {
        let mut series = Self::default();
        for (month, bucket) in buckets {
            series.labels.push(month);
            series.revenue.push(bucket.revenue);
            series.guests.push(bucket.guests);
            series.rooms_booked.push(bucket.rooms_booked);
            series.bookings.push(bucket.bookings);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate month by month
    pub fn iter(&self) -> impl Iterator<Item = SeriesRow> + '_ {
        self.labels.iter().enumerate().map(|(i, month)| SeriesRow {
            month: *month,
            revenue: self.revenue[i],
            guests: self.guests[i],
            rooms_booked: self.rooms_booked[i],
            bookings: self.bookings.get(i).copied().unwrap_or_default(),
        })
    }

    /// Label strings in chart order
    pub fn label_strings(&self) -> Vec<String> {
        self.labels.iter().map(ToString::to_string).collect()
    }

    /// Keep only the months accepted by `filter`
    pub fn filter_months(&mut self, filter: &MonthFilter) {
        let kept: Vec<SeriesRow> = self.iter().filter(|row| filter.matches(&row.month)).collect();
        *self = Self::from_ordered_buckets(kept.into_iter().map(|row| {
            (
                row.month,
                MonthBucket {
                    revenue: row.revenue,
                    guests: row.guests,
                    rooms_booked: row.rooms_booked,
                    bookings: row.bookings,
                },
            )
        }));
    }
}

/// Calculate totals from aggregated data
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub revenue: f64,
    pub guests: u64,
    pub rooms_booked: u64,
    pub bookings: u64,
    pub months: usize,
}

impl Totals {
    pub fn from_series(series: &AggregatedSeries) -> Self {
        let mut totals = Self::default();
        for row in series.iter() {
            totals.revenue += row.revenue;
            totals.guests = totals.guests.saturating_add(row.guests);
            totals.rooms_booked = totals.rooms_booked.saturating_add(row.rooms_booked);
            totals.bookings = totals.bookings.saturating_add(row.bookings);
            totals.months += 1;
        }
        totals
    }
}
