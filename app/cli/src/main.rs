//! FILENAME: app/cli/src/main.rs
// PURPOSE: `bankviz` entry point. JSON results go to stdout, logs to stderr.
// FORMAT: seq|level|category|message

mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;
use cli::{Cli, Command};
use config::{filter_context, DashboardConfig};
use std::error::Error;

pub type DynError = Box<dyn Error>;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DynError> {
    let mut config = DashboardConfig::from_args(&cli.global)?;
    logging::init(config.log_file.as_deref(), cli.global.verbose)?;
    log::debug!("running {:?} with data at {}", cli.command, config.data_path.display());

    let output = match &cli.command {
        Command::Generate => commands::generate(&config)?,
        Command::Aggregate { filter, metric } => {
            if let Some(metric) = metric {
                config.scene.metric = *metric;
            }
            commands::aggregate_cells(&config, &filter_context(filter)?)?
        }
        Command::Scene { filter, chart, mesh } => {
            config.apply_chart(chart);
            commands::scene(&config, &filter_context(filter)?, *mesh)?
        }
        Command::Kpis { filter } => commands::kpis(&config, &filter_context(filter)?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
