//! CLI interface for staystat
//!
//! `staystat [GLOBAL FLAGS] [COMMAND]`. Without a command, `monthly` runs.
//! Every API setting can also come from the environment.
//!
//! # Example
//!
//! ```bash
//! # Monthly table for the first half of 2024
//! staystat --since 2024-01 --until Jun-2024
//!
//! # Chart data for a remote API
//! STAYSTAT_API_URL=https://hotel.example.com/api/v1 staystat chart --format chartjs
//!
//! # Refresh every 30 seconds
//! staystat watch --interval 30
//! ```

use crate::error::{Result, StaystatError};
use crate::filters::MonthFilter;
use crate::output::OutputFormat;
use crate::types::MonthKey;
use clap::{Args, Parser, Subcommand, ValueEnum};
use staystat_api::ApiConfig;
use staystat_api::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, resolve_token};
use std::path::PathBuf;
use std::time::Duration;

/// Monthly revenue, guest and room statistics from a hotel-booking API
#[derive(Parser, Debug, Clone)]
#[command(name = "staystat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Base URL of the booking API
    #[arg(long, env = "STAYSTAT_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Bearer token for the booking API
    #[arg(long, env = "STAYSTAT_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Read the bearer token from this file (default: <config dir>/staystat/token)
    #[arg(long, env = "STAYSTAT_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "STAYSTAT_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,

    /// Timezone for month grouping (e.g. "Europe/Paris", "Asia/Tokyo", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC for month grouping (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// First month to show (YYYY-MM or Mon-YYYY)
    #[arg(long, global = true)]
    pub since: Option<String>,

    /// Last month to show (YYYY-MM or Mon-YYYY)
    #[arg(long, global = true)]
    pub until: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show revenue, guests and rooms booked per month
    Monthly,

    /// Show the monthly series as charts
    Chart(ChartArgs),

    /// Refresh the monthly report periodically until Ctrl-C
    Watch(WatchArgs),
}

/// Arguments for the chart command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ChartArgs {
    /// Chart rendering
    #[arg(long, value_enum, default_value = "terminal")]
    pub format: ChartFormat,
}

/// Chart renderings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartFormat {
    /// Chart.js-style JSON datasets
    Chartjs,
    /// ASCII bar charts
    Terminal,
}

impl From<ChartFormat> for OutputFormat {
    fn from(format: ChartFormat) -> Self {
        match format {
            ChartFormat::Chartjs => OutputFormat::Chartjs,
            ChartFormat::Terminal => OutputFormat::Terminal,
        }
    }
}

/// Arguments for the watch command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct WatchArgs {
    /// Refresh interval in seconds
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,
}

impl Cli {
    /// The command to run; `monthly` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Monthly)
    }

    /// Output format for the selected command
    pub fn output_format(&self) -> OutputFormat {
        match (&self.command(), self.json) {
            (Command::Chart(args), _) => args.format.into(),
            (_, true) => OutputFormat::Json,
            (_, false) => OutputFormat::Table,
        }
    }

    /// Month range from `--since` / `--until`
    pub fn month_filter(&self) -> Result<MonthFilter> {
        let mut filter = MonthFilter::new();
        if let Some(since) = &self.since {
            filter = filter.with_since(parse_month_filter(since)?);
        }
        if let Some(until) = &self.until {
            filter = filter.with_until(parse_month_filter(until)?);
        }

        if let (Some(since), Some(until)) = (filter.since, filter.until)
            && since > until
        {
            return Err(StaystatError::InvalidArgument(format!(
                "--since {since} is after --until {until}"
            )));
        }
        Ok(filter)
    }

    /// API settings, with the token resolved from flags, environment or file
    pub fn api_config(&self) -> Result<ApiConfig> {
        let token = resolve_token(self.token.as_deref(), self.token_file.as_deref())?;
        Ok(ApiConfig::new(self.api_url.clone())?
            .with_token(token)
            .with_timeout(Duration::from_secs(self.timeout)))
    }
}

/// Parse a month filter value
///
/// Accepts `YYYY-MM`, `Mon-YYYY` (the chart label form) and `YYYY-MM-DD`,
/// which selects the month containing that day.
///
/// # Examples
/// ```
/// use staystat::cli::parse_month_filter;
///
/// let month = parse_month_filter("2024-01").unwrap();
/// assert_eq!(month.to_string(), "Jan-2024");
///
/// assert_eq!(parse_month_filter("jan-2024").unwrap(), month);
/// assert_eq!(parse_month_filter("2024-01-15").unwrap(), month);
/// ```
pub fn parse_month_filter(value: &str) -> Result<MonthKey> {
    let value = value.trim();
    if let Ok(date) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(MonthKey::from_date(date));
    }

    value.parse::<MonthKey>().map_err(|_| {
        StaystatError::InvalidMonth(format!(
            "'{value}', expected YYYY-MM, Mon-YYYY or YYYY-MM-DD"
        ))
    })
}
