//! `ratekit` entry point.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use infra_config::Settings;
use tracing::{debug, error};

mod commands;
mod error;
mod logging;
mod market;

pub use error::{CliError, Result};

/// Treasury yield curves and short-rate models.
#[derive(Debug, Parser)]
#[command(name = "ratekit", version, about)]
struct Cli {
    /// Settings file; defaults to config/default.toml and config/$RATEKIT_ENV.toml
    #[arg(long, global = true, env = "RATEKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bootstrap the Treasury par curve and print zero rates
    Curve(CurveArgs),
    /// Simulate Hull-White short-rate paths on the bootstrapped curve
    HullWhite(HullWhiteArgs),
    /// Calibrate and print a Black-Derman-Toy tree
    Bdt(BdtArgs),
    /// Print configuration and runtime information
    Check,
}

/// Par yield source shared by curve-based commands.
#[derive(Debug, Args)]
pub struct MarketArgs {
    /// Observation date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Par yields CSV (`tenor,yield`) instead of the Treasury feed
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Interpolation: log-cubic, log-linear or linear
    #[arg(long)]
    pub interpolation: Option<String>,
}

#[derive(Debug, Args)]
pub struct CurveArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Number of monthly spot rate rows
    #[arg(long)]
    pub months: Option<u32>,

    /// Write the spot rate table to this CSV file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct HullWhiteArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Mean reversion speed
    #[arg(long)]
    pub a: Option<f64>,

    /// Short rate volatility
    #[arg(long)]
    pub sigma: Option<f64>,

    /// Number of simulated paths
    #[arg(long)]
    pub paths: Option<usize>,

    /// Number of time steps
    #[arg(long)]
    pub steps: Option<usize>,

    /// Simulation horizon in years
    #[arg(long)]
    pub horizon: Option<f64>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write per-step path statistics to this CSV file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BdtArgs {
    /// BDT quotes CSV (`tenor,rate,volatility`); defaults to the built-in example
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Number of one-year levels
    #[arg(long)]
    pub max_tenor: Option<u32>,
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    let settings = match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load().context("loading settings")?,
    };
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_ref())?;

    logging::init_logging(&settings.general.log_level, cli.json_logs);
    pricer_kernel::init_thread_pool(settings.engine.thread_pool_size)
        .context("initialising thread pool")?;
    debug!(threads = settings.engine.thread_pool_size, "thread pool ready");

    let result = match cli.command {
        Commands::Curve(args) => commands::curve::run(&settings, args).await,
        Commands::HullWhite(args) => commands::hull_white::run(&settings, args).await,
        Commands::Bdt(args) => commands::bdt::run(&settings, args),
        Commands::Check => commands::check::run(&settings),
    };

    if let Err(e) = &result {
        error!(error = %e, "command failed");
    }
    Ok(result?)
}
