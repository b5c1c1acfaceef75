//! API connection settings
//!
//! The base URL and timeout come from the command line or the environment.
//! The bearer token can also come from a token file, by default
//! `<config dir>/staystat/token`:
//! - Linux: `~/.config/staystat/token`
//! - macOS: `~/Library/Application Support/staystat/token`
//! - Windows: `%APPDATA%\staystat\token`

use staystat_core::error::{Result, StaystatError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Base URL used when none is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Tours/hotels collection endpoint, relative to the base URL
pub const TOURS_ENDPOINT: &str = "tours";

/// Bookings collection endpoint, relative to the base URL
pub const BOOKINGS_ENDPOINT: &str = "booking";

/// Connection settings for [`crate::ApiClient`]
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:8000/api/v1`
    pub base_url: String,
    /// Bearer token; no `Authorization` header is sent without one
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Create a config for the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(StaystatError::Config(format!(
                "API URL must start with http:// or https://, got '{base_url}'"
            )));
        }
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of an endpoint under the base URL
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

/// Default location of the token file
pub fn default_token_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("staystat").join("token"))
}

/// Work out which bearer token to use
///
/// An explicit non-empty token wins. Otherwise the token file is read: an
/// explicitly named file must exist, the default file is optional.
pub fn resolve_token(explicit: Option<&str>, token_file: Option<&Path>) -> Result<Option<String>> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(Some(token.to_string()));
    }

    if let Some(path) = token_file {
        return read_token_file(path).map(Some);
    }

    match default_token_path() {
        Some(path) if path.is_file() => {
            debug!("Reading API token from {}", path.display());
            read_token_file(&path).map(Some)
        }
        _ => Ok(None),
    }
}

fn read_token_file(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        StaystatError::Config(format!("cannot read token file {}: {e}", path.display()))
    })?;
    let token = contents.trim();
    if token.is_empty() {
        return Err(StaystatError::Config(format!(
            "token file {} is empty",
            path.display()
        )));
    }
    Ok(token.to_string())
}
