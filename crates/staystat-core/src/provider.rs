//! Booking source trait
//!
//! This module defines the `BookingSource` trait the dashboard loads its data
//! through. The HTTP client in `staystat-api` implements it; tests plug in
//! in-memory sources.

use crate::error::Result;
use crate::types::{LoadedBookings, TourRecord};
use async_trait::async_trait;

/// Both collections the dashboard needs for one refresh
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    /// Tour/hotel records
    pub tours: Vec<TourRecord>,
    /// Validated bookings
    pub bookings: LoadedBookings,
}

/// Trait for anything that can supply tours and bookings.
#[async_trait]
pub trait BookingSource: Send + Sync {
    /// Fetch the tour/hotel collection
    async fn fetch_tours(&self) -> Result<Vec<TourRecord>>;

    /// Fetch and validate the booking collection
    async fn fetch_bookings(&self) -> Result<LoadedBookings>;

    /// Fetch both collections; fails if either fetch fails.
    ///
    /// The two requests run concurrently and both must finish before the
    /// caller aggregates anything.
    async fn fetch_dashboard(&self) -> Result<DashboardData> {
        let (tours, bookings) = futures::try_join!(self.fetch_tours(), self.fetch_bookings())?;
        Ok(DashboardData { tours, bookings })
    }
}
