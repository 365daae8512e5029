//! Billboard API CLI
//!
//! Thin command-line consumer of the data access layer. Reads print JSON
//! and keep working against demonstration data when the backend is down.

use std::path::{Path, PathBuf};

use billboard_api::{
    config,
    error::{AppError, Result},
    models::{BillboardInput, BillboardQuery, BillboardStatus},
    services::ApiService,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Advertising structures dashboard client
#[derive(Parser, Debug)]
#[command(name = "billboard", version, about = "Advertising structures API client")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "billboard.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe base URL candidates and report availability
    Health,

    /// List categories
    Categories,

    /// List one page of billboards
    List {
        /// Category slug or id
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        status: Option<BillboardStatus>,

        /// Employee id
        #[arg(long)]
        employee: Option<i64>,

        /// Contractor id
        #[arg(long)]
        contractor: Option<i64>,

        /// Free-text search
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show one billboard
    Get { id: i64 },

    /// Show dashboard statistics
    Stats,

    /// List billboards whose rental ends soon
    Expiring,

    /// List employees
    Employees,

    /// List contractors
    Contractors,

    /// Create a billboard from a JSON file
    Create {
        #[arg(long)]
        file: PathBuf,
    },

    /// Update a billboard from a JSON file
    Update {
        id: i64,

        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a billboard
    Delete { id: i64 },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn read_input(path: &Path) -> Result<BillboardInput> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load_config(&cli.config)?;
    log::debug!("Base URL candidates: {:?}", config.api.base_urls);

    if let Command::Validate = cli.command {
        log::info!("Configuration OK ({} base URL candidates)", config.api.base_urls.len());
        return Ok(());
    }

    let api = ApiService::new(config)?;

    match cli.command {
        Command::Health => {
            let health = api.check_api_health().await;
            print_json(&health)?;
            if !health.is_ok() {
                return Err(AppError::NoReachableEndpoint {
                    tried: api.config().api.base_urls.clone(),
                });
            }
        }

        Command::Categories => print_json(&api.list_categories().await?)?,

        Command::List {
            category,
            status,
            employee,
            contractor,
            search,
            page,
        } => {
            let query = BillboardQuery {
                category,
                status,
                employee,
                contractor,
                search,
                page: Some(page),
            };
            let page = api.list_billboards(&query).await?;
            log::info!(
                "{} of {} billboards{}",
                page.items.len(),
                page.total_count,
                page.next_page
                    .map(|n| format!(", next page {n}"))
                    .unwrap_or_default()
            );
            print_json(&page.items)?;
        }

        Command::Get { id } => print_json(&api.get_billboard(id).await?)?,

        Command::Stats => print_json(&api.get_statistics().await?)?,

        Command::Expiring => print_json(&api.get_expiring_soon().await?)?,

        Command::Employees => print_json(&api.list_employees().await?)?,

        Command::Contractors => print_json(&api.list_contractors().await?)?,

        Command::Create { file } => {
            let input = read_input(&file).await?;
            let created = api.create_billboard(&input).await?;
            log::info!("Created billboard {}", created.id);
            print_json(&created)?;
        }

        Command::Update { id, file } => {
            let input = read_input(&file).await?;
            print_json(&api.update_billboard(id, &input).await?)?;
        }

        Command::Delete { id } => api.delete_billboard(id).await?,

        Command::Validate => {}
    }

    Ok(())
}
