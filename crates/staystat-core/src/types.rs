//! Core domain types for staystat
//!
//! This module contains the fundamental types used throughout the staystat library:
//! the wire shape of booking and tour records as the API sends them, the validated
//! [`BookingRecord`] the aggregator works on, and the [`MonthKey`] used to group
//! bookings by calendar month.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StaystatError};

/// Short month names used for labels, indexed by `month - 1`
///
/// Labels are produced and parsed through this one table so that a label
/// always resolves back to the month it was built from.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar month used as the grouping key
///
/// Ordering is chronological: year first, then month. The display form is
/// `<Mon>-<YYYY>`, e.g. `Jan-2024`.
///
/// # Examples
/// ```
/// use staystat_core::types::MonthKey;
///
/// let key: MonthKey = "Dec-2023".parse().unwrap();
/// assert_eq!(key.year(), 2023);
/// assert_eq!(key.month(), 12);
/// assert!(key < "Jan-2024".parse().unwrap());
/// assert_eq!(key.to_string(), "Dec-2023");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a key, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(StaystatError::InvalidMonth(format!(
                "month must be between 1-12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Key for the month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Short month name from [`MONTH_ABBREVIATIONS`]
    pub fn month_name(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month - 1) as usize]
    }

    /// Format as `YYYY-MM`
    pub fn to_iso_month(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    fn month_from_name(name: &str) -> Option<u32> {
        MONTH_ABBREVIATIONS
            .iter()
            .position(|abbr| abbr.eq_ignore_ascii_case(name))
            .map(|idx| idx as u32 + 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}", self.month_name(), self.year)
    }
}

impl FromStr for MonthKey {
    type Err = StaystatError;

    /// Parse `Mon-YYYY` (the label form) or `YYYY-MM`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (left, right) = s
            .split_once('-')
            .ok_or_else(|| StaystatError::InvalidMonth(format!("'{s}', expected Mon-YYYY or YYYY-MM")))?;

        if let Some(month) = Self::month_from_name(left) {
            let year = right
                .parse::<i32>()
                .map_err(|_| StaystatError::InvalidMonth(format!("invalid year in '{s}'")))?;
            return Self::new(year, month);
        }

        let year = left
            .parse::<i32>()
            .map_err(|_| StaystatError::InvalidMonth(format!("'{s}', expected Mon-YYYY or YYYY-MM")))?;
        let month = right
            .parse::<u32>()
            .map_err(|_| StaystatError::InvalidMonth(format!("invalid month in '{s}'")))?;
        Self::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Effective date of a booking
///
/// Timestamps that carry an offset (or epoch milliseconds) are instants and
/// get mapped to a calendar month in the configured timezone. Timestamps
/// without an offset and plain dates are wall-clock values and keep their
/// own calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingDate {
    /// An absolute point in time
    Instant(DateTime<Utc>),
    /// A wall-clock date/time with no offset
    Naive(NaiveDateTime),
}

impl BookingDate {
    /// Parse a date from its string form
    ///
    /// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DD HH:MM:SS[.fff]`
    /// and `YYYY-MM-DD`. Returns `None` for anything else, including blank strings.
    pub fn parse_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::Instant(dt.with_timezone(&Utc)));
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Self::Naive(naive));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::Naive)
    }

    /// Parse a date from a JSON value
    ///
    /// Strings go through [`BookingDate::parse_str`]; numbers are epoch
    /// milliseconds. Everything else (null, bool, objects) is not a date.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Self::parse_str(s),
            serde_json::Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .and_then(DateTime::from_timestamp_millis)
                .map(Self::Instant),
            _ => None,
        }
    }

    /// Calendar date in the given timezone
    pub fn date_in(&self, tz: &Tz) -> NaiveDate {
        match self {
            Self::Instant(dt) => dt.with_timezone(tz).date_naive(),
            Self::Naive(naive) => naive.date(),
        }
    }

    /// Month bucket this date falls into
    pub fn month_key(&self, tz: &Tz) -> MonthKey {
        MonthKey::from_date(self.date_in(tz))
    }
}

/// Booking record as returned by the booking API
///
/// Every field is optional here; [`BookingRecord::from_raw`] decides what
/// is acceptable. Unknown fields are ignored, including a virtual `id` sent
/// next to `_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBooking {
    /// Record identifier
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Date the booking is for
    #[serde(rename = "bookAt", default)]
    pub book_at: Option<serde_json::Value>,
    /// Record creation timestamp
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<serde_json::Value>,
    /// Amount charged for the booking
    #[serde(rename = "totalAmount", default)]
    pub total_amount: Option<f64>,
    /// Number of adult guests
    #[serde(default)]
    pub adult: Option<u64>,
    /// Booked rooms; anything other than an array counts as zero rooms
    #[serde(rename = "roomIds", default)]
    pub room_ids: Option<serde_json::Value>,
}

/// A validated booking, ready for aggregation
///
/// # Examples
/// ```
/// use staystat_core::types::{BookingRecord, RawBooking};
/// use serde_json::json;
///
/// let raw: RawBooking = serde_json::from_value(json!({
///     "_id": "b-1",
///     "bookAt": "2024-01-15",
///     "totalAmount": 100,
///     "adult": 2,
///     "roomIds": ["r-1"]
/// })).unwrap();
///
/// let record = BookingRecord::from_raw(raw).unwrap();
/// assert_eq!(record.room_count, 1);
/// assert_eq!(record.total_amount, 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    /// Record identifier, if the API sent one
    pub id: Option<String>,
    /// `bookAt` when usable, otherwise `createdAt`
    pub effective_date: BookingDate,
    /// Amount charged
    pub total_amount: f64,
    /// Adult guest count
    pub adult: u64,
    /// Number of rooms booked
    pub room_count: u64,
}

impl BookingRecord {
    /// Create a record directly
    pub fn new(effective_date: BookingDate, total_amount: f64, adult: u64, room_count: u64) -> Self {
        Self {
            id: None,
            effective_date,
            total_amount,
            adult,
            room_count,
        }
    }

    /// Validate a raw API record
    ///
    /// `bookAt` wins when it parses; a missing, blank or unparseable `bookAt`
    /// falls back to `createdAt`. A record with neither is rejected, and so is
    /// a negative or non-finite `totalAmount`. Missing amounts and guest
    /// counts count as zero.
    pub fn from_raw(raw: RawBooking) -> Result<Self> {
        let book_at = raw.book_at.as_ref().and_then(BookingDate::from_value);
        if book_at.is_none() && raw.book_at.as_ref().is_some_and(|v| !v.is_null()) {
            tracing::debug!(
                "Unusable bookAt {:?} on booking {:?}, falling back to createdAt",
                raw.book_at,
                raw.id
            );
        }

        let effective_date = book_at
            .or_else(|| raw.created_at.as_ref().and_then(BookingDate::from_value))
            .ok_or_else(|| {
                StaystatError::invalid_record(raw.id.as_deref(), "neither bookAt nor createdAt is a valid date")
            })?;

        let total_amount = raw.total_amount.unwrap_or(0.0);
        if !total_amount.is_finite() || total_amount < 0.0 {
            return Err(StaystatError::invalid_record(
                raw.id.as_deref(),
                format!("negative or non-finite totalAmount {total_amount}"),
            ));
        }

        let room_count = match &raw.room_ids {
            Some(serde_json::Value::Array(ids)) => ids.len() as u64,
            _ => 0,
        };

        Ok(Self {
            id: raw.id,
            effective_date,
            total_amount,
            adult: raw.adult.unwrap_or(0),
            room_count,
        })
    }

    /// Decode and validate one element of the API's `data` array
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let id = value
            .get("_id")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let raw: RawBooking = serde_json::from_value(value)
            .map_err(|e| StaystatError::invalid_record(id.as_deref(), e.to_string()))?;
        Self::from_raw(raw)
    }
}

/// Tour (hotel) record as returned by the API
///
/// Tours are only counted, so decoding never fails: fields of the wrong type
/// and non-object entries simply leave the fields empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct TourRecord {
    /// Record identifier
    #[serde(rename = "_id")]
    pub id: Option<String>,
    /// Display title
    pub title: Option<String>,
}

impl From<serde_json::Value> for TourRecord {
    fn from(value: serde_json::Value) -> Self {
        let text = |key: &str| value.get(key).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            id: text("_id"),
            title: text("title"),
        }
    }
}

/// JSON wrapper every API response uses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Success flag, when the API sets one
    #[serde(default)]
    pub success: Option<bool>,
    /// Optional message from the server
    #[serde(default)]
    pub message: Option<String>,
    /// Payload; a missing `data` field is a format error
    #[serde(default)]
    pub data: Option<Vec<T>>,
}

/// Validated bookings plus the number of records rejected at the boundary
#[derive(Debug, Clone, Default)]
pub struct LoadedBookings {
    /// Records that passed validation, in API order
    pub records: Vec<BookingRecord>,
    /// Records dropped during validation
    pub rejected: usize,
}

impl LoadedBookings {
    /// Validate every element of a `data` array, counting rejections
    pub fn from_values(values: Vec<serde_json::Value>) -> Self {
        let mut loaded = Self::default();
        for value in values {
            match BookingRecord::from_value(value) {
                Ok(record) => loaded.records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping booking: {}", e);
                    loaded.rejected += 1;
                }
            }
        }
        loaded
    }
}
