//! inmet-alerts - A command line client for the INMET weather alert feed.
//!
//! INMET (Instituto Nacional de Meteorologia) publishes the weather alerts
//! active in Brazil. This program fetches them, maps every alert into a typed
//! record and prints them in a human readable form.
//!
//! # Usage
//!
//! ```bash
//! # Print the alerts of today
//! inmet-alerts alerts
//!
//! # Print the alerts of today and of the next days
//! inmet-alerts alerts --include-future
//!
//! # Use another feed or timeout
//! inmet-alerts --config config.yaml alerts
//!
//! # Solve the Tower of Hanoi for 3 disks
//! inmet-alerts hanoi 3
//! ```
//!
//! # Architecture
//!
//! - [`alerts`] - Typed alert records and their rendering
//! - [`config`] - Optional YAML configuration with environment variable overrides
//! - [`hanoi`] - Tower of Hanoi solver
//! - [`inmet`] - INMET API client
//!
//! # Exit Status
//!
//! The program exits with status 1 when the configuration is invalid, the
//! request fails or the feed cannot be parsed. The logged error names the
//! offending field and, for a single alert, its list and position.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//! - `INMET_API__URL`, `INMET_API__TIMEOUT` - Override the configuration

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

use crate::config::Config;
use crate::inmet::{AlertFeed, InmetRequester};

mod alerts;
mod config;
mod hanoi;
mod inmet;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to an optional YAML configuration file.
    ///
    /// ```yaml
    /// api:
    ///   url: "https://apiprevmet3.inmet.gov.br/avisos/ativos"
    ///   timeout: 5
    /// ```
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the active alerts and print them.
    Alerts {
        /// Also print the alerts of the next days.
        #[arg(long)]
        include_future: bool,
    },
    /// Print the moves solving the Tower of Hanoi.
    Hanoi {
        /// Number of disks.
        #[arg(value_parser = clap::value_parser!(u32).range(1..=20))]
        disks: u32,
        /// Peg holding the disks at the start.
        #[arg(long, default_value = "A")]
        source: String,
        /// Peg receiving the disks.
        #[arg(long, default_value = "C")]
        destination: String,
        /// Spare peg.
        #[arg(long, default_value = "B")]
        auxiliary: String,
    },
}

/// Fetches the feed and prints it on the standard output.
async fn print_alerts(config: &Config, include_future: bool) -> Result<(), anyhow::Error> {
    info!(
        "using feed {} with a {}s timeout",
        config.api.url, config.api.timeout
    );

    let requester = InmetRequester::new(&config.api.url, config.api.timeout())?;
    let alerts = AlertFeed::new(requester).fetch().await?;

    print!("{}", alerts.render(include_future));
    Ok(())
}

fn print_hanoi(
    disks: u32,
    source: &str,
    destination: &str,
    auxiliary: &str,
) -> Result<(), anyhow::Error> {
    let moves = hanoi::solve(disks, source, destination, auxiliary)?;
    info!("solved {} disks in {} moves", disks, moves.len());

    for step in moves {
        println!("{}", step);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    let result = match args.command {
        Command::Alerts { include_future } => match Config::load(args.config.as_deref()) {
            Ok(config) => print_alerts(&config, include_future).await,
            Err(e) => Err(e),
        },
        Command::Hanoi {
            disks,
            source,
            destination,
            auxiliary,
        } => print_hanoi(disks, &source, &destination, &auxiliary),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
