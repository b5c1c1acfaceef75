//! Output formatters for the monthly series
//!
//! Four renderings of the same data:
//! - [`TableFormatter`]: a month-per-row table with a TOTAL row
//! - [`JsonFormatter`]: the series and totals as JSON
//! - [`ChartJsFormatter`]: `{labels, datasets}` JSON ready to hand to a chart library
//! - [`TerminalChartFormatter`]: ASCII bar charts
//!
//! # Example
//!
//! ```
//! use staystat::aggregation::{AggregatedSeries, Totals};
//! use staystat::output::{OutputFormat, get_formatter};
//!
//! let series = AggregatedSeries::default();
//! let totals = Totals::from_series(&series);
//!
//! let output = get_formatter(OutputFormat::Json).format_series(&series, &totals);
//! assert!(output.contains("\"labels\""));
//! ```

use crate::aggregation::{AggregatedSeries, Totals};
use crate::dashboard::DashboardSnapshot;
use clap::ValueEnum;
use prettytable::{Cell, Row, Table, format, row};
use serde_json::{Value, json};
use staystat_terminal::{ChartMetric, SeriesChart};

/// Selectable output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Month-per-row table
    Table,
    /// Series and totals as JSON
    Json,
    /// Chart.js-style `{labels, datasets}` JSON
    Chartjs,
    /// ASCII bar charts
    Terminal,
}

/// Trait for rendering aggregated data
pub trait OutputFormatter {
    /// Render a series and its totals
    fn format_series(&self, series: &AggregatedSeries, totals: &Totals) -> String;

    /// Render a full dashboard refresh, including fetch counts
    fn format_summary(&self, snapshot: &DashboardSnapshot) -> String;
}

/// Table formatter for human-readable output
pub struct TableFormatter;

impl TableFormatter {
    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Format an amount with two decimals and thousands separators
    fn format_amount(amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let cents = (amount.abs() * 100.0).round() as u64;
        format!("{sign}{}.{:02}", Self::format_number(cents / 100), cents % 100)
    }

    fn format_totals_row(totals: &Totals) -> Row {
        row![
            b -> "TOTAL",
            br -> Self::format_number(totals.bookings),
            br -> Self::format_amount(totals.revenue),
            br -> Self::format_number(totals.guests),
            br -> Self::format_number(totals.rooms_booked)
        ]
    }
}

impl OutputFormatter for TableFormatter {
    fn format_series(&self, series: &AggregatedSeries, totals: &Totals) -> String {
        if series.is_empty() {
            return "No bookings found.".to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Month",
            b -> "Bookings",
            b -> "Revenue",
            b -> "Guests",
            b -> "Rooms Booked"
        ]);

        for entry in series.iter() {
            table.add_row(row![
                entry.month,
                r -> Self::format_number(entry.bookings),
                r -> Self::format_amount(entry.revenue),
                r -> Self::format_number(entry.guests),
                r -> Self::format_number(entry.rooms_booked)
            ]);
        }

        table.add_row(Row::new(vec![Cell::new(""); 5]));
        table.add_row(Self::format_totals_row(totals));

        table.to_string()
    }

    fn format_summary(&self, snapshot: &DashboardSnapshot) -> String {
        let mut output = format!(
            "Hotels: {}  Bookings: {}",
            Self::format_number(snapshot.tours as u64),
            Self::format_number(snapshot.bookings as u64)
        );
        if snapshot.rejected > 0 {
            output.push_str(&format!(" ({} skipped)", snapshot.rejected));
        }
        output.push_str(&format!(
            "  Updated: {}\n\n",
            snapshot
                .refreshed_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
        ));
        output.push_str(&self.format_series(&snapshot.series, &snapshot.totals));
        output
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    fn totals_json(totals: &Totals) -> Value {
        json!({
            "revenue": totals.revenue,
            "guests": totals.guests,
            "roomsBooked": totals.rooms_booked,
            "bookings": totals.bookings,
            "months": totals.months,
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_series(&self, series: &AggregatedSeries, totals: &Totals) -> String {
        to_pretty_json(&json!({
            "labels": series.label_strings(),
            "revenue": series.revenue,
            "guests": series.guests,
            "roomsBooked": series.rooms_booked,
            "bookings": series.bookings,
            "totals": Self::totals_json(totals),
        }))
    }

    fn format_summary(&self, snapshot: &DashboardSnapshot) -> String {
        to_pretty_json(&json!({
            "tours": snapshot.tours,
            "bookings": snapshot.bookings,
            "rejected": snapshot.rejected,
            "refreshedAt": snapshot.refreshed_at.to_rfc3339(),
            "series": {
                "labels": snapshot.series.label_strings(),
                "revenue": snapshot.series.revenue,
                "guests": snapshot.series.guests,
                "roomsBooked": snapshot.series.rooms_booked,
            },
            "totals": Self::totals_json(&snapshot.totals),
        }))
    }
}

/// Chart-ready JSON: shared labels plus one dataset per metric
pub struct ChartJsFormatter;

impl ChartJsFormatter {
    fn chart_json(series: &AggregatedSeries) -> Value {
        let datasets: Vec<Value> = ChartMetric::ALL
            .iter()
            .map(|metric| {
                let data = match metric {
                    ChartMetric::Revenue => json!(series.revenue),
                    ChartMetric::Guests => json!(series.guests),
                    ChartMetric::BookedRooms => json!(series.rooms_booked),
                };
                json!({ "label": metric.label(), "data": data })
            })
            .collect();

        json!({
            "labels": series.label_strings(),
            "datasets": datasets,
        })
    }
}

impl OutputFormatter for ChartJsFormatter {
    fn format_series(&self, series: &AggregatedSeries, _totals: &Totals) -> String {
        to_pretty_json(&Self::chart_json(series))
    }

    fn format_summary(&self, snapshot: &DashboardSnapshot) -> String {
        to_pretty_json(&Self::chart_json(&snapshot.series))
    }
}

/// ASCII bar charts sized to the terminal
pub struct TerminalChartFormatter {
    chart: SeriesChart,
}

impl TerminalChartFormatter {
    pub fn new(chart: SeriesChart) -> Self {
        Self { chart }
    }
}

impl OutputFormatter for TerminalChartFormatter {
    fn format_series(&self, series: &AggregatedSeries, totals: &Totals) -> String {
        self.chart.render(series, totals)
    }

    fn format_summary(&self, snapshot: &DashboardSnapshot) -> String {
        format!(
            "Hotels: {}  Bookings: {}\n{}",
            snapshot.tours,
            snapshot.bookings,
            self.chart.render(&snapshot.series, &snapshot.totals)
        )
    }
}

fn to_pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize output: {}", e);
        "{}".to_string()
    })
}

/// Get the formatter for an output format
pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Chartjs => Box::new(ChartJsFormatter),
        OutputFormat::Terminal => Box::new(TerminalChartFormatter::new(SeriesChart::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::MonthBucket;
    use crate::types::MonthKey;
    use chrono::Utc;

    fn sample_series() -> AggregatedSeries {
        AggregatedSeries::from_ordered_buckets([
            (
                MonthKey::new(2023, 12).unwrap(),
                MonthBucket {
                    revenue: 200.0,
                    guests: 4,
                    rooms_booked: 2,
                    bookings: 1,
                },
            ),
            (
                MonthKey::new(2024, 1).unwrap(),
                MonthBucket {
                    revenue: 1150.5,
                    guests: 3,
                    rooms_booked: 1,
                    bookings: 2,
                },
            ),
        ])
    }

    fn sample_snapshot() -> DashboardSnapshot {
        let series = sample_series();
        DashboardSnapshot {
            totals: Totals::from_series(&series),
            series,
            tours: 4,
            bookings: 3,
            rejected: 1,
            refreshed_at: Utc::now(),
        }
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(TableFormatter::format_number(1234567), "1,234,567");
        assert_eq!(TableFormatter::format_number(999), "999");
        assert_eq!(TableFormatter::format_number(0), "0");
        assert_eq!(TableFormatter::format_amount(1350.5), "1,350.50");
        assert_eq!(TableFormatter::format_amount(0.004), "0.00");
    }

    #[test]
    fn test_table_formatter() {
        let series = sample_series();
        let output = TableFormatter.format_series(&series, &Totals::from_series(&series));

        assert!(output.contains("Month"));
        assert!(output.contains("Rooms Booked"));
        assert!(output.contains("Dec-2023"));
        assert!(output.contains("Jan-2024"));
        assert!(output.contains("1,150.50"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("1,350.50"));

        let dec = output.find("Dec-2023").unwrap();
        let jan = output.find("Jan-2024").unwrap();
        assert!(dec < jan);
    }

    #[test]
    fn test_table_formatter_empty() {
        let output = TableFormatter.format_series(&AggregatedSeries::default(), &Totals::default());
        assert_eq!(output, "No bookings found.");
    }

    #[test]
    fn test_table_summary_mentions_skipped() {
        let output = TableFormatter.format_summary(&sample_snapshot());
        assert!(output.contains("Hotels: 4"));
        assert!(output.contains("(1 skipped)"));
    }

    #[test]
    fn test_json_formatter() {
        let series = sample_series();
        let output = JsonFormatter.format_series(&series, &Totals::from_series(&series));
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["labels"], json!(["Dec-2023", "Jan-2024"]));
        assert_eq!(parsed["revenue"], json!([200.0, 1150.5]));
        assert_eq!(parsed["guests"], json!([4, 3]));
        assert_eq!(parsed["roomsBooked"], json!([2, 1]));
        assert_eq!(parsed["totals"]["guests"], json!(7));
    }

    #[test]
    fn test_json_summary() {
        let parsed: Value =
            serde_json::from_str(&JsonFormatter.format_summary(&sample_snapshot())).unwrap();
        assert_eq!(parsed["tours"], json!(4));
        assert_eq!(parsed["rejected"], json!(1));
        assert_eq!(parsed["series"]["labels"], json!(["Dec-2023", "Jan-2024"]));
    }

    #[test]
    fn test_chartjs_formatter() {
        let series = sample_series();
        let output = ChartJsFormatter.format_series(&series, &Totals::default());
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["labels"], json!(["Dec-2023", "Jan-2024"]));
        let datasets = parsed["datasets"].as_array().unwrap();
        assert_eq!(datasets.len(), 3);
        assert_eq!(datasets[0]["label"], "Revenue");
        assert_eq!(datasets[1]["label"], "Guests");
        assert_eq!(datasets[2]["label"], "Booked Rooms");
        assert_eq!(datasets[2]["data"], json!([2, 1]));
    }

    #[test]
    fn test_terminal_formatter() {
        let series = sample_series();
        let formatter = TerminalChartFormatter::new(SeriesChart::with_width(80));
        let output = formatter.format_series(&series, &Totals::from_series(&series));
        assert!(output.contains("BOOKED ROOMS"));
        assert!(output.contains("Jan-2024"));
    }

    #[test]
    fn test_get_formatter() {
        let series = AggregatedSeries::default();
        let totals = Totals::default();

        assert!(
            get_formatter(OutputFormat::Json)
                .format_series(&series, &totals)
                .contains("\"labels\"")
        );
        assert!(
            get_formatter(OutputFormat::Chartjs)
                .format_series(&series, &totals)
                .contains("\"datasets\"")
        );
        assert_eq!(
            get_formatter(OutputFormat::Table).format_series(&series, &totals),
            "No bookings found."
        );
    }
}
