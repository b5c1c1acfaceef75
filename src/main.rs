//! staystat - monthly revenue, guest and room statistics from a hotel-booking API

use anyhow::Context;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use staystat::{
    aggregation::MonthlyAggregator,
    cli::{Cli, Command},
    dashboard::{Dashboard, DashboardState},
    output::{OutputFormat, OutputFormatter, get_formatter},
    timezone::TimezoneConfig,
};
use staystat_api::ApiClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(verbose: bool) {
    // RUST_LOG wins over the default; --verbose wins over both
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("staystat=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("staystat=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn loading_spinner(show: bool) -> Option<ProgressBar> {
    if !show {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Loading bookings...");
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Tables and terminal charts get the fetch counts; machine formats only the data
fn render(formatter: &dyn OutputFormatter, format: OutputFormat, state: &DashboardState) -> String {
    match state {
        DashboardState::Loading => "Loading...".to_string(),
        DashboardState::Failed { message } => message.red().to_string(),
        DashboardState::Loaded(snapshot) => match format {
            OutputFormat::Table | OutputFormat::Terminal => formatter.format_summary(snapshot),
            OutputFormat::Json | OutputFormat::Chartjs => {
                formatter.format_series(&snapshot.series, &snapshot.totals)
            }
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
    info!("Using timezone: {}", tz_config.display_name());

    let filter = cli.month_filter()?;
    let api_config = cli.api_config()?;
    info!("Using booking API at {}", api_config.base_url);
    let client = ApiClient::new(api_config).context("failed to create HTTP client")?;

    let dashboard =
        Dashboard::new(Arc::new(client), MonthlyAggregator::new(tz_config)).with_filter(filter);
    let format = cli.output_format();
    let formatter = get_formatter(format);
    let interactive = is_terminal::is_terminal(std::io::stdout());

    match cli.command() {
        Command::Monthly | Command::Chart(_) => {
            let spinner = loading_spinner(interactive && !cli.json);
            let state = dashboard.refresh().await;
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }

            if let DashboardState::Loaded(_) = state {
                println!("{}", render(formatter.as_ref(), format, &state));
            } else {
                eprintln!("{}", render(formatter.as_ref(), format, &state));
                std::process::exit(1);
            }
        }
        Command::Watch(args) => {
            info!("Refreshing every {}s", args.interval);
            let clear_screen = interactive && matches!(format, OutputFormat::Table | OutputFormat::Terminal);

            dashboard
                .watch(Duration::from_secs(args.interval), |state| {
                    if clear_screen {
                        print!("\x1B[2J\x1B[1;1H");
                        println!(
                            "Refresh interval: {}s | Press Ctrl+C to exit\n",
                            args.interval
                        );
                    }
                    println!("{}", render(formatter.as_ref(), format, state));
                })
                .await?;

            if interactive {
                println!("\nExiting watch mode...");
            }
        }
    }

    Ok(())
}
