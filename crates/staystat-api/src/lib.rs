//! Booking API client for staystat
//!
//! This crate talks to the hotel-booking REST API: it fetches the tour and
//! booking collections, checks the response envelope, and validates each
//! booking before it reaches the aggregator.

pub mod client;
pub mod config;

pub use client::ApiClient;
pub use config::ApiConfig;
