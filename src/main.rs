//! Angola Geo: command-line entry point.
//!
//! Startup sequence:
//!   1. Parse arguments (no command: print help and exit)
//!   2. Load .env (if present)
//!   3. Load config
//!   4. Init logger at the configured level
//!   5. Load the dataset and run the command

use std::process;

use clap::{CommandFactory, Parser};
use tracing::{info, warn};

use angola_geo::cli::{self, Cli};
use angola_geo::{config, logger, AngolaGeo, DataSource, GeoError};

fn main() {
    let outcome = run(Cli::parse());
    if let Err(e) = &outcome {
        eprintln!("{}", cli::error_message(e));
    }
    process::exit(cli::exit_code(&outcome));
}

fn run(args: Cli) -> Result<bool, GeoError> {
    let Some(command) = args.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(true);
    };

    // .env is optional; a broken one is reported once logging is up.
    let dotenv = dotenvy::dotenv();

    let config = config::load(args.config.as_deref())?;
    logger::init(config.log_level)?;

    if let Some(problem) = config::dotenv_problem(&dotenv) {
        warn!("ignoring .env: {problem}");
    }
    info!(
        config = ?config.source,
        log_level = %config.log_level,
        "config loaded"
    );

    let source = args.data.map(DataSource::Path).unwrap_or_else(|| config.data_source());
    let geo = AngolaGeo::new(source)?;

    let report = cli::execute(&geo, &command, args.json)?;
    println!("{}", report.text);
    Ok(report.success)
}
