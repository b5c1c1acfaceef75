//! Dashboard refresh cycle and view state
//!
//! A refresh fetches tours and bookings through a [`BookingSource`], aggregates
//! the bookings by month and produces an immutable [`DashboardSnapshot`]. The
//! view moves between [`DashboardState`]s only through
//! [`DashboardState::apply`], so the previous snapshot stays on screen while a
//! new refresh is in flight.

use crate::aggregation::{AggregatedSeries, MonthlyAggregator, Totals};
use crate::error::Result;
use crate::filters::MonthFilter;
use crate::provider::{BookingSource, DashboardData};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

/// Message shown when a refresh fails
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load dashboard data";

/// Everything the dashboard shows after one successful refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Monthly series after the month filter
    pub series: AggregatedSeries,
    /// Totals over `series`
    pub totals: Totals,
    /// Number of tours/hotels
    pub tours: usize,
    /// Number of bookings that passed validation
    pub bookings: usize,
    /// Number of bookings dropped during validation
    pub rejected: usize,
    /// When the data was fetched
    pub refreshed_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Aggregate freshly fetched data
    pub fn build(data: &DashboardData, aggregator: &MonthlyAggregator, filter: &MonthFilter) -> Self {
        let mut series = aggregator.aggregate(&data.bookings.records);
        if filter.is_active() {
            series.filter_months(filter);
        }
        let totals = Totals::from_series(&series);

        Self {
            series,
            totals,
            tours: data.tours.len(),
            bookings: data.bookings.records.len(),
            rejected: data.bookings.rejected,
            refreshed_at: Utc::now(),
        }
    }
}

/// What the dashboard currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    /// Nothing loaded yet
    Loading,
    /// Last successful refresh
    Loaded(DashboardSnapshot),
    /// Last refresh failed
    Failed { message: String },
}

/// Transitions of the refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    RefreshStarted,
    DataLoaded(DashboardSnapshot),
    LoadFailed(String),
}

impl DashboardState {
    /// Next state after `event`
    ///
    /// A refresh that starts while data is shown keeps showing it.
    pub fn apply(self, event: DashboardEvent) -> Self {
        match (self, event) {
            (Self::Loaded(snapshot), DashboardEvent::RefreshStarted) => Self::Loaded(snapshot),
            (_, DashboardEvent::RefreshStarted) => Self::Loading,
            (_, DashboardEvent::DataLoaded(snapshot)) => Self::Loaded(snapshot),
            (_, DashboardEvent::LoadFailed(message)) => Self::Failed { message },
        }
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        match self {
            Self::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Loads and aggregates dashboard data from a booking source
pub struct Dashboard {
    source: Arc<dyn BookingSource>,
    aggregator: MonthlyAggregator,
    filter: MonthFilter,
}

impl Dashboard {
    pub fn new(source: Arc<dyn BookingSource>, aggregator: MonthlyAggregator) -> Self {
        Self {
            source,
            aggregator,
            filter: MonthFilter::default(),
        }
    }

    /// Only show months inside `filter`
    pub fn with_filter(mut self, filter: MonthFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Fetch and aggregate once, returning the raw result
    pub async fn load(&self) -> Result<DashboardSnapshot> {
        let data = self.source.fetch_dashboard().await?;
        let snapshot = DashboardSnapshot::build(&data, &self.aggregator, &self.filter);
        info!(
            "Loaded {} tours and {} bookings into {} months",
            snapshot.tours,
            snapshot.bookings,
            snapshot.series.len()
        );
        Ok(snapshot)
    }

    /// Fetch and aggregate once, as a view-state event
    ///
    /// Errors are logged and reported with a generic message. There is no
    /// retry and no partial result.
    pub async fn load_event(&self) -> DashboardEvent {
        match self.load().await {
            Ok(snapshot) => DashboardEvent::DataLoaded(snapshot),
            Err(e) => {
                warn!("Dashboard refresh failed: {}", e);
                DashboardEvent::LoadFailed(LOAD_FAILED_MESSAGE.to_string())
            }
        }
    }

    /// Run one refresh from scratch and return the resulting state
    pub async fn refresh(&self) -> DashboardState {
        DashboardState::Loading
            .apply(DashboardEvent::RefreshStarted)
            .apply(self.load_event().await)
    }

    /// Refresh every `every` until Ctrl-C
    pub async fn watch<F>(&self, every: Duration, render: F) -> Result<()>
    where
        F: FnMut(&DashboardState),
    {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };
        self.watch_until(every, shutdown, render).await;
        Ok(())
    }

    /// Refresh every `every` until `shutdown` completes
    ///
    /// Refreshes never overlap; ticks missed during a slow refresh are skipped.
    pub async fn watch_until<F, S>(&self, every: Duration, shutdown: S, mut render: F) -> DashboardState
    where
        F: FnMut(&DashboardState),
        S: Future<Output = ()>,
    {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut state = DashboardState::Loading;
        let mut refreshes = 0u64;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    state = state.apply(DashboardEvent::RefreshStarted);
                    if state.is_loading() {
                        render(&state);
                    }
                    // Shutdown also interrupts a refresh that is still in flight
                    let event = tokio::select! {
                        event = self.load_event() => event,
                        _ = &mut shutdown => {
                            debug!("Stopping dashboard watch during refresh {}", refreshes + 1);
                            break;
                        }
                    };
                    state = state.apply(event);
                    refreshes += 1;
                    render(&state);
                }
                _ = &mut shutdown => {
                    debug!("Stopping dashboard watch after {} refreshes", refreshes);
                    break;
                }
            }
        }

        state
    }
}
