//! Timezone used to place booking timestamps into calendar months
//!
//! A booking made at `2024-01-31T23:30:00Z` belongs to January in London and to
//! February in Tokyo. The dashboard buckets in the system's local timezone
//! unless told otherwise, the same way a browser would.

use crate::error::{Result, StaystatError};
use crate::types::{BookingDate, MonthKey};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

/// Configuration for timezone handling
#[derive(Debug, Clone, Copy)]
pub struct TimezoneConfig {
    /// The timezone months are computed in
    pub tz: Tz,
    /// Whether the timezone is UTC
    pub is_utc: bool,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self::fixed(get_local_timezone())
    }
}

impl TimezoneConfig {
    /// Use exactly this timezone
    pub fn fixed(tz: Tz) -> Self {
        Self {
            tz,
            is_utc: tz == Tz::UTC,
        }
    }

    /// UTC configuration
    pub fn utc() -> Self {
        Self::fixed(Tz::UTC)
    }

    /// Build from the `--timezone` / `--utc` flags; `--utc` wins
    pub fn from_cli(timezone_str: Option<&str>, use_utc: bool) -> Result<Self> {
        if use_utc {
            return Ok(Self::utc());
        }

        match timezone_str {
            Some(name) => Tz::from_str(name).map(Self::fixed).map_err(|_| {
                StaystatError::InvalidTimezone(format!(
                    "'{name}'. Use format like 'Asia/Ho_Chi_Minh', 'Europe/Paris', or 'UTC'"
                ))
            }),
            None => Ok(Self::default()),
        }
    }

    /// Get the display name for the configured timezone
    pub fn display_name(&self) -> &str {
        if self.is_utc { "UTC" } else { self.tz.name() }
    }

    /// Month a booking date falls into under this configuration
    pub fn month_of(&self, date: &BookingDate) -> MonthKey {
        date.month_key(&self.tz)
    }
}

/// Detect the system's local timezone
///
/// Tries the `TZ` environment variable, then the platform's configured zone,
/// and falls back to UTC.
pub fn get_local_timezone() -> Tz {
    let from_env = std::env::var("TZ")
        .ok()
        .and_then(|name| Tz::from_str(&name).ok());
    if let Some(tz) = from_env {
        debug!("Using timezone from TZ environment variable: {}", tz.name());
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => Tz::from_str(&name).unwrap_or_else(|_| {
            debug!("Unrecognized system timezone '{}', falling back to UTC", name);
            Tz::UTC
        }),
        Err(e) => {
            debug!("Could not detect local timezone: {:?}, falling back to UTC", e);
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_flag_overrides_timezone() {
        let config = TimezoneConfig::from_cli(Some("Asia/Tokyo"), true).unwrap();
        assert!(config.is_utc);
        assert_eq!(config.display_name(), "UTC");
    }

    #[test]
    fn test_explicit_timezone() {
        let config = TimezoneConfig::from_cli(Some("Asia/Ho_Chi_Minh"), false).unwrap();
        assert!(!config.is_utc);
        assert_eq!(config.display_name(), "Asia/Ho_Chi_Minh");

        let utc_by_name = TimezoneConfig::from_cli(Some("UTC"), false).unwrap();
        assert!(utc_by_name.is_utc);
    }

    #[test]
    fn test_invalid_timezone() {
        let result = TimezoneConfig::from_cli(Some("Mars/Olympus"), false);
        assert!(matches!(result, Err(StaystatError::InvalidTimezone(_))));
    }

    #[test]
    fn test_month_of_uses_configured_zone() {
        let date = BookingDate::parse_str("2023-12-31T20:00:00Z").unwrap();
        let utc = TimezoneConfig::utc();
        let saigon = TimezoneConfig::fixed(chrono_tz::Asia::Ho_Chi_Minh);

        assert_eq!(utc.month_of(&date), MonthKey::new(2023, 12).unwrap());
        assert_eq!(saigon.month_of(&date), MonthKey::new(2024, 1).unwrap());
    }
}
