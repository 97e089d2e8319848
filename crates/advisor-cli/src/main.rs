//! advisor - device keep/sell/replace recommendations
//!
//! Usage:
//!   advisor serve                          # HTTP API on 0.0.0.0:5000
//!   advisor serve --port 8080 --no-cors    # Custom port, no CORS headers
//!   advisor predict --age 3 --battery 50   # One-shot recommendation
//!   advisor predict --age 3 --json         # Same, as the API's JSON body

use clap::{Parser, Subcommand};
use device_advisor::advisor::{DeviceProfile, PredictRequest, TrainerConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::{predict, serve};

/// advisor - device recommendation service
///
/// Trains a decision tree on built-in device-condition data and recommends
/// whether to keep, sell or replace a device.
#[derive(Parser)]
#[command(name = "advisor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Shuffle seed for the train/holdout split
    #[arg(long, global = true, default_value_t = 42)]
    seed: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP prediction server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 5000)]
        port: u16,

        /// Do not send CORS headers
        #[arg(long)]
        no_cors: bool,
    },

    /// Predict a recommendation for one device
    Predict {
        /// Device age in years
        #[arg(long, allow_negative_numbers = true)]
        age: i64,

        /// Battery health percentage
        #[arg(long, default_value_t = DeviceProfile::DEFAULT_BATTERY_STATE, allow_negative_numbers = true)]
        battery: i64,

        /// Performance percentage
        #[arg(long, default_value_t = DeviceProfile::DEFAULT_PERFORMANCE, allow_negative_numbers = true)]
        performance: i64,

        /// Number of repairs
        #[arg(long, default_value_t = DeviceProfile::DEFAULT_REPAIR_FREQUENCY, allow_negative_numbers = true)]
        repairs: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Logs go to stderr so `predict --json` keeps stdout machine-readable.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let trainer = TrainerConfig::default().with_seed(u64::from(cli.seed));

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => {
            init_tracing(if cli.verbose { "debug" } else { "info" });
            let config = serve::ServerConfig::default()
                .with_host(host)
                .with_port(port)
                .with_cors(!no_cors);
            serve::run(&config, &trainer)
        }

        Commands::Predict {
            age,
            battery,
            performance,
            repairs,
            json,
        } => {
            init_tracing(if cli.verbose { "debug" } else { "warn" });
            let request = PredictRequest {
                device_age: age,
                battery_state: battery,
                performance,
                repair_frequency: repairs,
            };
            predict::run(request, &trainer, json)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
