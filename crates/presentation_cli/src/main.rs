//! Stop finder CLI
//!
//! Command-line presentation boundary for the stop/departure pipeline:
//! one-shot searches, direct per-stop departure boards, a live countdown,
//! and a provider health check. All times shown locally are converted here;
//! the core only ever hands out UTC epochs.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::{DepartureBoard, SearchResult, StopBoard, StopSearchService};
use chrono::{TimeZone, Utc};
use chrono_tz::America::New_York;
use clap::{Parser, Subcommand};
use domain::countdown::remaining;
use infrastructure::{AppConfig, NominatimGeocodingAdapter, TransitAdapter};
use integration_transit::{NominatimClient, TransitAppClient};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Stop finder CLI
#[derive(Parser)]
#[command(name = "stopfinder")]
#[command(version, about = "Find the nearest bus stop and its upcoming departures", long_about = None)]
struct Cli {
    /// Path to a configuration file (default: ./config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the nearest stop to an address and list its departures
    Find {
        /// Free-text address to search from
        address: String,
    },

    /// List departures for a known global stop id
    ///
    /// Example: stopfinder departures CTTRANSIT:4471
    Departures {
        /// Provider-global stop identifier
        global_stop_id: String,
    },

    /// Find the nearest stop, then tick a live countdown to the next bus
    Watch {
        /// Free-text address to search from
        address: String,
    },

    /// Check transit provider reachability
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    // A missing or empty API key aborts here, before any search is accepted.
    let service = build_service(&config)?;
    debug!("configuration loaded and clients initialized");

    match cli.command {
        Commands::Find { address } => run_find(&service, &address).await,
        Commands::Departures { global_stop_id } => {
            run_departures(&service, &global_stop_id).await;
        },
        Commands::Watch { address } => run_watch(&service, &address).await,
        Commands::Status => run_status(&service).await?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_service(config: &AppConfig) -> anyhow::Result<StopSearchService> {
    let transit_config = config
        .transit
        .to_client_config()
        .context("transit configuration")?;
    let radius_meters = transit_config.max_distance_meters;

    let transit_client =
        TransitAppClient::new(&transit_config).context("building transit client")?;
    let geocoding_client =
        NominatimClient::new(&config.geocoding).context("building geocoding client")?;

    Ok(StopSearchService::new(
        Arc::new(NominatimGeocodingAdapter::new(geocoding_client)),
        Arc::new(TransitAdapter::new(transit_client)),
        radius_meters,
    ))
}

async fn run_find(service: &StopSearchService, address: &str) {
    match service.search(address).await {
        SearchResult::MissingAddress => println!("Please enter a location."),
        SearchResult::LocationNotFound(_) => println!("Location not found."),
        SearchResult::StopNotFound { .. } => println!("No nearby bus stop found."),
        SearchResult::Resolved(resolved) => print_board(&resolved),
    }
}

async fn run_departures(service: &StopSearchService, global_stop_id: &str) {
    let board = service.board_for_stop(global_stop_id).await;
    print_departures(&board);
}

async fn run_watch(service: &StopSearchService, address: &str) {
    let resolved = match service.search(address).await {
        SearchResult::MissingAddress => {
            println!("Please enter a location.");
            return;
        },
        SearchResult::LocationNotFound(_) => {
            println!("Location not found.");
            return;
        },
        SearchResult::StopNotFound { .. } => {
            println!("No nearby bus stop found.");
            return;
        },
        SearchResult::Resolved(resolved) => resolved,
    };

    print_board(&resolved);
    let Some(next) = resolved.board.departures.first() else {
        return;
    };

    // Each tick recomputes the countdown from the already-fetched epoch;
    // no network I/O happens here.
    let mut tick = tokio::time::interval(Duration::from_secs(1));
    loop {
        tick.tick().await;
        let left = remaining(next.departure_epoch, Utc::now().timestamp());
        if left.is_zero() {
            println!("{}: arriving now", next.route_name);
            break;
        }
        println!("{}: {}", next.route_name, format_countdown(left));
    }
}

async fn run_status(service: &StopSearchService) -> anyhow::Result<()> {
    if service.provider_available().await {
        println!("Transit provider: reachable");
        Ok(())
    } else {
        println!("Transit provider: unreachable");
        anyhow::bail!("transit provider is unreachable")
    }
}

fn print_board(resolved: &StopBoard) {
    let straight_line = resolved.origin.distance_meters(&resolved.stop.location);
    println!(
        "Nearest bus stop: {} [{}]",
        resolved.stop.name, resolved.stop.stop_id
    );
    println!(
        "  at {}, {:.0} m reported, {:.0} m straight-line",
        resolved.stop.location, resolved.stop.distance_meters, straight_line
    );
    print_departures(&resolved.board);
}

fn print_departures(board: &DepartureBoard) {
    if board.departures.is_empty() {
        println!("No upcoming departures.");
        return;
    }

    let now = Utc::now().timestamp();
    for departure in &board.departures {
        println!(
            "  {:<12} {}  (in {})",
            departure.route_name,
            format_local_time(departure.departure_epoch),
            format_countdown(remaining(departure.departure_epoch, now))
        );
    }
}

/// Format a UTC epoch in the deployment region's local time
fn format_local_time(epoch: i64) -> String {
    match Utc.timestamp_opt(epoch, 0) {
        chrono::LocalResult::Single(utc) => {
            utc.with_timezone(&New_York).format("%I:%M %p").to_string()
        },
        _ => format!("epoch {epoch}"),
    }
}

/// Format a countdown as H:MM:SS, or "arriving now" at zero
fn format_countdown(left: Duration) -> String {
    if left.is_zero() {
        return "arriving now".to_string();
    }
    let total = left.as_secs();
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
