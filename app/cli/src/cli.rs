//! FILENAME: app/cli/src/cli.rs
// PURPOSE: Command-line definition for `bankviz`.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pivot_engine::Metric;
use scene_engine::{BarSize, ColorScale};
use std::path::PathBuf;

/// Banking portfolio dashboard: dataset, aggregates, 3D scene and KPIs as JSON
#[derive(Parser, Debug)]
#[command(name = "bankviz", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load the dataset, generating and saving it on first use
    Generate,
    /// Print the per (segment, product) cells of a metric
    Aggregate {
        #[command(flatten)]
        filter: FilterArgs,

        /// sum_balance, avg_balance, accounts or delinquency_rate
        #[arg(long)]
        metric: Option<Metric>,
    },
    /// Print the 3D bar scene
    Scene {
        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        chart: ChartArgs,

        /// Print the batched mesh buffer instead of per-bar cuboids
        #[arg(long)]
        mesh: bool,
    },
    /// Print the headline KPI figures
    Kpis {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Dataset CSV (default: data/sample/transactions.csv)
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mirror log lines to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Sidebar-equivalent record filter.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First included day (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last included day (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Comma-separated segments to keep
    #[arg(long, value_delimiter = ',')]
    pub segments: Vec<String>,

    /// Comma-separated products to keep
    #[arg(long, value_delimiter = ',')]
    pub products: Vec<String>,
}

/// Chart selection for the 3D scene.
#[derive(Args, Debug, Clone, Default)]
pub struct ChartArgs {
    /// sum_balance, avg_balance, accounts or delinquency_rate
    #[arg(long)]
    pub metric: Option<Metric>,

    /// Blues, Viridis, Cividis, Plasma, Inferno or Magma
    #[arg(long)]
    pub color_scale: Option<ColorScale>,

    /// Bar half-width in (0, 1]
    #[arg(long, value_parser = parse_bar_size)]
    pub bar_size: Option<BarSize>,

    /// Order axis categories alphabetically
    #[arg(long)]
    pub ascending: bool,
}

fn parse_bar_size(s: &str) -> Result<BarSize, String> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid float: {err}"))?;
    BarSize::new(value).map_err(|err| err.to_string())
}
