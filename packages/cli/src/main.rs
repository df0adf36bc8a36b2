#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the radon canvassing client.
//!
//! With no subcommand, opens the interactive menu (`Tornado Map` plus the
//! Organize / Remediation / Information dropdowns) and lets volunteers
//! manage neighborhoods and households, review target neighborhoods and
//! browse the reference material. Each subcommand prints one page and
//! exits.
//!
//! Uses `indicatif-log-bridge` (via [`radon_canvas_cli_utils::init_logger`])
//! so log lines and loading spinners never fight for the terminal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use radon_canvas_api::{DEFAULT_API_URL, HttpApi};
use radon_canvas_cli::nav::Route;
use radon_canvas_cli::screens::Context;
use radon_canvas_cli::{commands, interactive};
use radon_canvas_cli_utils::DialoguerInteraction;
use radon_canvas_models::HotNeighborhoodSort;
use radon_canvas_views::{AddressFilter, ReferenceSort};

#[derive(Parser)]
#[command(name = "radon_canvas", about = "Radon canvassing client")]
struct Cli {
    /// Base URL of the backend API
    #[arg(long, env = "RADON_CANVAS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Page the interactive menu opens on (e.g. "/addresses")
    #[arg(long, default_value = "/")]
    start: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List neighborhoods
    Neighborhoods,
    /// List household addresses
    Addresses {
        /// "all", "unassigned", or a neighborhood id
        #[arg(long, default_value = "all")]
        neighborhood: AddressFilter,
    },
    /// Rank neighborhoods by radon test results
    Hot {
        /// Only show neighborhoods with at least this many tests
        #[arg(long, default_value = "5")]
        min_tests: u32,
        /// One of "average", "count", "percent"
        #[arg(long, default_value = "average")]
        sort_by: HotNeighborhoodSort,
    },
    /// Summarize the tornado path and radon results
    Map {
        /// Write the map overlay as `GeoJSON` to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show the St. Louis neighborhood reference table
    Reference {
        /// Match name, ward, or ZIP code
        #[arg(long)]
        search: Option<String>,
        /// One of "name", "ward", "zip"
        #[arg(long, default_value = "name")]
        sort_by: ReferenceSort,
    },
    /// Show radon testing and remediation options
    Solutions,
    /// Show resource links
    Sources,
    /// Check the backend status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = radon_canvas_cli_utils::init_logger();
    let cli = Cli::parse();

    let ctx = Context {
        api: HttpApi::new(&cli.api_url),
        multi,
        ui: DialoguerInteraction,
    };

    let Some(command) = cli.command else {
        let Some(start) = Route::from_path(&cli.start) else {
            return Err(format!("Unknown page: {}", cli.start).into());
        };
        return interactive::run(&ctx, start).await;
    };

    match command {
        Commands::Neighborhoods => commands::neighborhoods(&ctx).await?,
        Commands::Addresses { neighborhood } => commands::addresses(&ctx, neighborhood).await?,
        Commands::Hot { min_tests, sort_by } => {
            commands::hot_neighborhoods(&ctx, min_tests, sort_by).await?;
        }
        Commands::Map { output } => commands::map(&ctx, output.as_deref()).await?,
        Commands::Reference { search, sort_by } => commands::reference(search, sort_by),
        Commands::Solutions => commands::solutions(),
        Commands::Sources => commands::sources(),
        Commands::Status => commands::status(&ctx).await?,
    }

    Ok(())
}
