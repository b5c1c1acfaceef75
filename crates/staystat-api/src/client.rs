//! HTTP client for the booking API
//!
//! # Examples
//!
//! ```no_run
//! use staystat_api::{ApiClient, ApiConfig};
//! use staystat_core::provider::BookingSource;
//!
//! # async fn example() -> staystat_core::Result<()> {
//! let config = ApiConfig::new("http://localhost:8000/api/v1")?
//!     .with_token(Some("secret".to_string()));
//! let client = ApiClient::new(config)?;
//!
//! let data = client.fetch_dashboard().await?;
//! println!("{} hotels, {} bookings", data.tours.len(), data.bookings.records.len());
//! # Ok(())
//! # }
//! ```

use crate::config::{ApiConfig, BOOKINGS_ENDPOINT, TOURS_ENDPOINT};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use staystat_core::error::{Result, StaystatError};
use staystat_core::provider::BookingSource;
use staystat_core::types::{ApiEnvelope, LoadedBookings, TourRecord};
use tracing::{debug, info, warn};

/// Client for the tours and bookings endpoints
pub struct ApiClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client from connection settings
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// GET an endpoint and unwrap the `data` array of its envelope
    async fn get_data<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let url = self.config.endpoint_url(endpoint);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StaystatError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;
        if envelope.success == Some(false) {
            debug!(
                "{} reported success=false: {}",
                endpoint,
                envelope.message.as_deref().unwrap_or("no message")
            );
        }

        envelope.data.ok_or_else(|| StaystatError::MissingData {
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl BookingSource for ApiClient {
    async fn fetch_tours(&self) -> Result<Vec<TourRecord>> {
        let tours: Vec<TourRecord> = self.get_data(TOURS_ENDPOINT).await?;
        debug!("Fetched {} tours", tours.len());
        Ok(tours)
    }

    async fn fetch_bookings(&self) -> Result<LoadedBookings> {
        let values: Vec<serde_json::Value> = self.get_data(BOOKINGS_ENDPOINT).await?;
        let total = values.len();
        let loaded = LoadedBookings::from_values(values);

        if loaded.rejected > 0 {
            warn!(
                "Skipped {} of {} bookings that failed validation",
                loaded.rejected, total
            );
        }
        info!("Loaded {} bookings", loaded.records.len());
        Ok(loaded)
    }
}
