//! Common test utilities and helpers for staystat tests
//!
//! Builders for booking records and the JSON the booking API returns.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde_json::{Value, json};
use staystat::types::{BookingDate, BookingRecord};

/// The three bookings of the worked example, exactly as the API sends them
pub static WORKED_EXAMPLE: Lazy<Vec<Value>> = Lazy::new(|| {
    vec![
        json!({ "bookAt": "2024-01-15", "totalAmount": 100, "adult": 2, "roomIds": [1] }),
        json!({ "bookAt": "2024-01-20", "totalAmount": 50, "adult": 1, "roomIds": [] }),
        json!({ "bookAt": "2023-12-05", "totalAmount": 200, "adult": 4, "roomIds": [1, 2] }),
    ]
});

/// The worked example rebuilt through [`BookingBuilder`], with ids and timestamps
pub static WORKED_EXAMPLE_BUILT: Lazy<Vec<Value>> = Lazy::new(|| {
    vec![
        BookingBuilder::new("b-1")
            .book_at("2024-01-10")
            .amount(100.0)
            .adults(2)
            .rooms(1)
            .to_json(),
        BookingBuilder::new("b-2")
            .book_at("2023-12-05")
            .amount(200.0)
            .adults(4)
            .rooms(2)
            .to_json(),
        BookingBuilder::new("b-3")
            .book_at("2024-01-20")
            .amount(50.0)
            .adults(1)
            .rooms(0)
            .to_json(),
    ]
});

/// Builder for booking API records
pub struct BookingBuilder {
    id: String,
    book_at: Option<Value>,
    created_at: Option<Value>,
    total_amount: f64,
    adult: u64,
    rooms: Option<usize>,
}

impl BookingBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            book_at: None,
            created_at: Some(json!("2024-01-01T00:00:00.000Z")),
            total_amount: 100.0,
            adult: 1,
            rooms: Some(1),
        }
    }

    pub fn book_at(mut self, date: &str) -> Self {
        self.book_at = Some(json!(date));
        self
    }

    pub fn book_at_value(mut self, value: Value) -> Self {
        self.book_at = Some(value);
        self
    }

    pub fn created_at(mut self, date: &str) -> Self {
        self.created_at = Some(json!(date));
        self
    }

    pub fn without_created_at(mut self) -> Self {
        self.created_at = None;
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.total_amount = amount;
        self
    }

    pub fn adults(mut self, adult: u64) -> Self {
        self.adult = adult;
        self
    }

    pub fn rooms(mut self, rooms: usize) -> Self {
        self.rooms = Some(rooms);
        self
    }

    /// Send `roomIds: null`
    pub fn null_rooms(mut self) -> Self {
        self.rooms = None;
        self
    }

    /// The record as the API would send it
    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "_id": self.id,
            "totalAmount": self.total_amount,
            "adult": self.adult,
            "roomIds": self.rooms.map(|n| (0..n).map(|i| format!("room-{i}")).collect::<Vec<_>>()),
        });
        if let Some(book_at) = &self.book_at {
            value["bookAt"] = book_at.clone();
        }
        if let Some(created_at) = &self.created_at {
            value["createdAt"] = created_at.clone();
        }
        value
    }

    /// The record after validation
    pub fn build(&self) -> BookingRecord {
        BookingRecord::from_value(self.to_json()).expect("builder produced an invalid booking")
    }
}

/// Wrap records in the API's response envelope
pub fn envelope(data: Vec<Value>) -> Value {
    json!({ "success": true, "data": data })
}

/// Tour records for the tours endpoint
pub fn tours(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({ "_id": format!("t-{i}"), "title": format!("Hotel {i}") }))
        .collect()
}

/// A record dated at an exact UTC instant
pub fn booking_at(instant: DateTime<Utc>, amount: f64, adult: u64, rooms: u64) -> BookingRecord {
    BookingRecord::new(BookingDate::Instant(instant), amount, adult, rooms)
}

/// First instant of a month, UTC
pub fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("valid month")
}
