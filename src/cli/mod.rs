//! `angola-geo` command line: argument types and command dispatch.
//!
//! ```text
//! angola-geo [--config <path>] [--data <path>] [--json] <command>
//!
//! Commands:
//!   list provinces [-d]                  all provinces
//!   list municipalities [-p <province>]  municipalities, optionally by province
//!   get province <name>                  one province in detail
//!   search <term>                        search provinces, municipalities, communes
//!   info                                 dataset metadata
//!   new                                  provinces created by Lei 14/24
//!   check                                data-quality report
//! ```
//!
//! [`execute`] runs a parsed [`Command`] against an engine and returns the
//! text to print; the binary only handles process concerns (config, logging,
//! exit status).

pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::error::{GeoError, Result};
use crate::query::AngolaGeo;

const PROVINCE_HINT: &str = "  hint: run 'angola-geo list provinces' to see every province";

const EXAMPLES: &str = "\
Examples:
  angola-geo list provinces
  angola-geo get province Luanda
  angola-geo list municipalities --province Luanda
  angola-geo search Bengo
  angola-geo info
  angola-geo new";

#[derive(Debug, Parser)]
#[command(
    name = "angola-geo",
    version,
    about = "Angola Geo - administrative divisions of Angola (Lei n.º 14/24)",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Config file (default: config/default.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dataset JSON file to load instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List provinces or municipalities
    List {
        #[command(subcommand)]
        target: ListTarget,
    },
    /// Show details of a single division
    Get {
        #[command(subcommand)]
        target: GetTarget,
    },
    /// Search provinces, municipalities and communes by name
    Search {
        /// Case-insensitive substring to look for
        #[arg(allow_hyphen_values = true)]
        term: String,
    },
    /// Show information about the dataset
    Info,
    /// List the provinces created by Lei 14/24
    New,
    /// Report data-quality problems in the loaded dataset
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ListTarget {
    /// List every province
    Provinces {
        /// Include the municipality list of each province
        #[arg(short, long)]
        detailed: bool,
    },
    /// List municipalities
    Municipalities {
        /// Only municipalities of this province
        #[arg(short, long)]
        province: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum GetTarget {
    /// Show a province with its municipalities
    Province {
        /// Province name (case-insensitive)
        name: String,
    },
}

/// Output of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    /// `false` when the command ran but found a problem (e.g. `check`).
    pub success: bool,
}

impl Report {
    fn ok(text: String) -> Self {
        Self { text, success: true }
    }
}

/// Run `command` against `geo`.
pub fn execute(geo: &AngolaGeo, command: &Command, as_json: bool) -> Result<Report> {
    debug!(?command, as_json, "executing command");
    match command {
        Command::List { target: ListTarget::Provinces { detailed } } => {
            let provinces = geo.list_provinces();
            if as_json {
                return to_json(&provinces);
            }
            let total = geo.count_municipalities(None)?;
            Ok(Report::ok(render::province_list(&provinces, total, *detailed)))
        }
        Command::List { target: ListTarget::Municipalities { province } } => {
            // `-p ""` means no filter.
            let province = province.as_deref().filter(|p| !p.is_empty());
            let municipalities = geo.list_municipalities(province)?;
            if as_json {
                return to_json(&municipalities);
            }
            let text = match province {
                Some(name) => {
                    let canonical = geo.get_province(name)?.name;
                    let coverage = geo.coverage(Some(name))?;
                    render::municipality_list(
                        &format!("Municipalities of {canonical}"),
                        &municipalities,
                        Some(coverage),
                    )
                }
                None => render::municipality_list("All municipalities", &municipalities, None),
            };
            Ok(Report::ok(text))
        }
        Command::Get { target: GetTarget::Province { name } } => {
            let province = geo.get_province(name)?;
            if as_json {
                return to_json(&province);
            }
            Ok(Report::ok(render::province_detail(&province)))
        }
        Command::Search { term } => {
            let results = geo.search(term);
            if as_json {
                return to_json(&results);
            }
            Ok(Report::ok(render::search_results(term, &results)))
        }
        Command::Info => {
            let metadata = geo.metadata();
            let new = geo.new_provinces();
            if as_json {
                return to_json(&json!({ "metadata": metadata, "new_provinces": new }));
            }
            Ok(Report::ok(render::info(&metadata, &new)))
        }
        Command::New => {
            let new = geo.new_provinces();
            if as_json {
                return to_json(&new);
            }
            Ok(Report::ok(render::new_provinces(&new)))
        }
        Command::Check => {
            let issues = geo.audit();
            let success = issues.is_empty();
            let text = if as_json {
                pretty(&issues)?
            } else {
                render::audit(&issues)
            };
            Ok(Report { text, success })
        }
    }
}

/// Process exit status for a finished run: `Ok(success)` from the command,
/// or the error that stopped it.
pub fn exit_code(outcome: &Result<bool>) -> i32 {
    match outcome {
        Ok(true) => 0,
        Ok(false) | Err(_) => 1,
    }
}

/// What to print on stderr for a failed run.
pub fn error_message(err: &GeoError) -> String {
    match err {
        GeoError::ProvinceNotFound(_) => format!("error: {err}\n{PROVINCE_HINT}"),
        _ => format!("error: {err}"),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Report> {
    Ok(Report::ok(pretty(value)?))
}

fn pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
