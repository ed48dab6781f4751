//! UniConvert command-line front end
//!
//! Converts values between units and tracks daily visit streaks.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use uniconvert::build_info;
use uniconvert::conversion::{format_result, parse_input, Catalog};
use uniconvert::streak::{self, VisitHistory};

#[derive(Parser)]
#[command(name = "uniconvert")]
#[command(about = "Unit converter and visit streak tracker", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON catalog to use instead of the built-in categories
    #[arg(long, global = true, env = "UNICONVERT_CATALOG_PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories and their units
    Categories,

    /// Convert a value between two units of a category
    Convert {
        /// Category name (e.g., "Length")
        category: String,

        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Source unit symbol
        from: String,

        /// Target unit symbol
        to: String,
    },

    /// Record a visit for today and print the updated streak
    Visit {
        /// History file (defaults to UNICONVERT_HISTORY_PATH or data/visit_history.json)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Day to treat as today (yyyy-MM-dd)
        #[arg(long)]
        today: Option<String>,
    },

    /// Print the current streak without recording a visit
    Streak {
        /// History file (defaults to UNICONVERT_HISTORY_PATH or data/visit_history.json)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Day to treat as today (yyyy-MM-dd)
        #[arg(long)]
        today: Option<String>,
    },

    /// Show build information
    Version,
}

/// Get the history path from environment or use default
fn get_history_path() -> PathBuf {
    std::env::var("UNICONVERT_HISTORY_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("visit_history.json");
            path
        })
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Catalog::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(Catalog::builtin()),
    }
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match today {
        Some(s) => Ok(streak::parse_iso_date(s)?),
        None => Ok(streak::today()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("uniconvert=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Categories => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            for category in catalog.categories() {
                println!("{}", category.name);
                for unit in &category.units {
                    println!("  {:<8} {}", unit.symbol, unit.name);
                }
            }
        }

        Commands::Convert {
            category,
            value,
            from,
            to,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let value = parse_input(&value).ok_or_else(|| format!("Not a number: {}", value))?;
            let result = catalog.convert(&category, value, &from, &to)?;
            // Unknown unit pairs print an empty line
            println!("{}", format_result(result).unwrap_or_default());
        }

        Commands::Visit { history, today } => {
            let path = history.unwrap_or_else(get_history_path);
            let today = resolve_today(today.as_deref())?;

            let mut visits = VisitHistory::load(&path)?;
            if visits.record_visit(today) {
                visits.save(&path)?;
            }
            println!("{}", serde_json::to_string_pretty(&visits.streak_data(today))?);
        }

        Commands::Streak { history, today } => {
            let path = history.unwrap_or_else(get_history_path);
            let today = resolve_today(today.as_deref())?;

            let visits = VisitHistory::load(&path)?;
            println!("{}", serde_json::to_string_pretty(&visits.streak_data(today))?);
        }

        Commands::Version => {
            println!("{}", build_info::summary());
        }
    }

    Ok(())
}
