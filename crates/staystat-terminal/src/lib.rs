//! Terminal rendering for staystat
//!
//! Draws the monthly revenue, guest and room series as horizontal ASCII bar
//! charts sized to the terminal.

pub mod series_chart;

pub use series_chart::{ChartMetric, SeriesChart};
