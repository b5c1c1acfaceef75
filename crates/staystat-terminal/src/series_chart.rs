//! ASCII bar charts for the monthly series
//!
//! Each metric gets its own panel with one bar per month, scaled against the
//! largest value of that metric. Output is plain ASCII so it survives pipes
//! and log files; colors are only added when `NO_COLOR` is unset.

use colored::*;
use staystat_core::aggregation_types::{AggregatedSeries, Totals};
use std::fmt;
use tracing::debug;

const BOX_CORNER: &str = "+";
const BOX_HORIZONTAL: &str = "-";
const BOX_VERTICAL: &str = "|";

const BAR_FULL: &str = "#";
const BAR_EMPTY: &str = ".";

const DEFAULT_WIDTH: usize = 100;
const MIN_WIDTH: usize = 60;
const MAX_WIDTH: usize = 120;
const MIN_BAR_WIDTH: usize = 10;

/// Width of a "Mon-YYYY" label
const LABEL_WIDTH: usize = 8;

/// One of the three charted series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMetric {
    Revenue,
    Guests,
    BookedRooms,
}

impl ChartMetric {
    /// All metrics, in display order
    pub const ALL: [ChartMetric; 3] = [Self::Revenue, Self::Guests, Self::BookedRooms];

    /// Dataset label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Guests => "Guests",
            Self::BookedRooms => "Booked Rooms",
        }
    }

    fn values(&self, series: &AggregatedSeries) -> Vec<f64> {
        match self {
            Self::Revenue => series.revenue.clone(),
            Self::Guests => series.guests.iter().map(|&g| g as f64).collect(),
            Self::BookedRooms => series.rooms_booked.iter().map(|&r| r as f64).collect(),
        }
    }

    fn format_value(&self, value: f64) -> String {
        match self {
            Self::Revenue => format_amount(value),
            Self::Guests | Self::BookedRooms => format_number(value as u64),
        }
    }

    fn paint(&self, text: &str) -> String {
        match self {
            Self::Revenue => text.green().to_string(),
            Self::Guests => text.cyan().to_string(),
            Self::BookedRooms => text.yellow().to_string(),
        }
    }
}

/// Renders an [`AggregatedSeries`] as boxed bar charts
pub struct SeriesChart {
    width: usize,
    colored_output: bool,
}

impl Default for SeriesChart {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesChart {
    /// Size to the current terminal, honoring `NO_COLOR`
    pub fn new() -> Self {
        let raw_width = terminal_width().unwrap_or(DEFAULT_WIDTH);
        let width = if raw_width < MIN_WIDTH {
            raw_width.max(LABEL_WIDTH + MIN_BAR_WIDTH + 20)
        } else {
            raw_width.clamp(MIN_WIDTH, MAX_WIDTH)
        };
        debug!("Chart width {} (terminal reports {})", width, raw_width);
        Self {
            width,
            colored_output: std::env::var("NO_COLOR").is_err(),
        }
    }

    /// Fixed width, no colors
    pub fn with_width(width: usize) -> Self {
        Self {
            width: width.max(LABEL_WIDTH + MIN_BAR_WIDTH + 20),
            colored_output: false,
        }
    }

    pub fn with_color(mut self, colored_output: bool) -> Self {
        self.colored_output = colored_output;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Render all three metrics plus a totals line
    pub fn render(&self, series: &AggregatedSeries, totals: &Totals) -> String {
        let mut output = String::new();
        output.push_str(&self.draw_border());
        output.push_str(&self.draw_centered_line("STAYSTAT - MONTHLY BOOKINGS"));

        if series.is_empty() {
            output.push_str(&self.draw_separator());
            output.push_str(&self.draw_line("No bookings to chart"));
            output.push_str(&self.draw_separator());
            return output;
        }

        for metric in ChartMetric::ALL {
            output.push_str(&self.draw_separator());
            output.push_str(&self.render_panel(series, metric));
        }

        output.push_str(&self.draw_separator());
        output.push_str(&self.draw_line(&format!(
            "Total  Revenue: {}  Guests: {}  Rooms: {}  Bookings: {}  Months: {}",
            format_amount(totals.revenue),
            format_number(totals.guests),
            format_number(totals.rooms_booked),
            format_number(totals.bookings),
            totals.months
        )));
        output.push_str(&self.draw_separator());
        output
    }

    /// Render a single metric panel, without the outer frame
    pub fn render_panel(&self, series: &AggregatedSeries, metric: ChartMetric) -> String {
        let values = metric.values(series);
        let formatted: Vec<String> = values.iter().map(|v| metric.format_value(*v)).collect();
        let value_width = formatted.iter().map(String::len).max().unwrap_or(0);
        let max = values.iter().copied().fold(0.0_f64, f64::max);

        // "| " + label + " [" + bar + "] " + value + " |"
        let bar_width = self
            .width
            .saturating_sub(4 + LABEL_WIDTH + 2 + 2 + value_width)
            .max(MIN_BAR_WIDTH);

        let mut output = self.draw_line(&metric.label().to_uppercase());
        for ((label, value), text) in series.labels.iter().zip(&values).zip(&formatted) {
            let bar = self.bar(*value, max, bar_width, metric);
            let line = format!(
                "{:<LABEL_WIDTH$} {bar} {text:>value_width$}",
                label.to_string()
            );
            output.push_str(&self.draw_line(&line));
        }
        output
    }

    fn bar(&self, value: f64, max: f64, width: usize, metric: ChartMetric) -> String {
        let filled = if max > 0.0 && value > 0.0 {
            (((value / max) * width as f64).round() as usize).min(width)
        } else {
            0
        };
        let fill = BAR_FULL.repeat(filled);
        let fill = if self.colored_output {
            metric.paint(&fill)
        } else {
            fill
        };
        format!("[{}{}]", fill, BAR_EMPTY.repeat(width - filled))
    }

    fn draw_border(&self) -> String {
        format!(
            "{}{}{}",
            BOX_CORNER,
            BOX_HORIZONTAL.repeat(self.width - 2),
            BOX_CORNER
        )
    }

    fn draw_separator(&self) -> String {
        format!("\n{}", self.draw_border())
    }

    fn draw_centered_line(&self, text: &str) -> String {
        let text_width = console::measure_text_width(text);
        let available = self.width.saturating_sub(2);
        if text_width >= available {
            return format!("\n{BOX_VERTICAL} {text} {BOX_VERTICAL}");
        }
        let left = (available - text_width) / 2;
        let right = available - left - text_width;
        format!(
            "\n{}{}{}{}{}",
            BOX_VERTICAL,
            " ".repeat(left),
            text,
            " ".repeat(right),
            BOX_VERTICAL
        )
    }

    fn draw_line(&self, content: &str) -> String {
        let available = self.width.saturating_sub(4);
        let content = console::truncate_str(content, available, "...");
        let padding = available.saturating_sub(console::measure_text_width(&content));
        format!(
            "\n{} {}{} {}",
            BOX_VERTICAL,
            content,
            " ".repeat(padding),
            BOX_VERTICAL
        )
    }
}

impl fmt::Display for SeriesChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeriesChart(width: {})", self.width)
    }
}

fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(width, _)| width.0 as usize)
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!("{sign}{}.{:02}", format_number(cents / 100), cents % 100)
}
