use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

use oneonone::analytics::{AnalyticsApiServer, AnalyticsEngine};
use oneonone::config::{load_config, AppConfig};
use oneonone::storage::{self, BackendType};

/// Analytics for recurring 1:1 meetings
#[derive(Parser)]
#[command(name = "oneonone")]
#[command(
    about = "Annual reports, team overviews and pulse trends for 1:1 meetings",
    long_about = None
)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ~/.oneonone/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding journey documents
    #[arg(long, global = true, env = "ONEONONE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the analytics REST API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep journeys in memory only
        #[arg(long)]
        memory: bool,
    },
    /// Print an analytics report as JSON
    Report {
        #[command(subcommand)]
        report: ReportCommands,
    },
    /// Print computed insights for one meeting
    Insights {
        #[arg(long)]
        collaborator: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        meeting: u32,
    },
    /// Import journeys from a JSON export (one journey or an array)
    Import {
        /// File to import
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Annual report for one collaborator
    Annual {
        #[arg(long)]
        collaborator: String,
        #[arg(long)]
        year: i32,
    },
    /// Every journey under a manager
    Team {
        #[arg(long)]
        manager: String,
    },
    /// Most recent years for one collaborator
    Trends {
        #[arg(long)]
        collaborator: String,
    },
}

fn init_tracing(verbose: u8, configured: Option<&str>) {
    let filter = match (verbose, configured) {
        (0, Some(directive)) => EnvFilter::try_new(directive).unwrap_or_else(|e| {
            eprintln!("Invalid log filter '{directive}': {e}");
            EnvFilter::new("info")
        }),
        (0, None) => EnvFilter::new("info"),
        (1, _) => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose, config.log_filter.as_deref());
    debug!("oneonone started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli, config).await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(dir) = cli.data_dir {
        config.storage.base_dir = Some(dir);
    }

    match cli.command {
        Commands::Serve { host, port, memory } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if memory {
                config.storage.backend = BackendType::Memory;
            }

            let engine = open_engine(&config).await?;
            AnalyticsApiServer::new(engine, config.server).start().await
        }
        Commands::Report { report } => {
            let engine = open_engine(&config).await?;
            match report {
                ReportCommands::Annual { collaborator, year } => {
                    print_json(&engine.annual_report(&collaborator, year).await?)
                }
                ReportCommands::Team { manager } => {
                    print_json(&engine.team_overview(&manager).await?)
                }
                ReportCommands::Trends { collaborator } => {
                    print_json(&engine.trends(&collaborator).await?)
                }
            }
        }
        Commands::Insights {
            collaborator,
            year,
            meeting,
        } => {
            let engine = open_engine(&config).await?;
            let insights = engine
                .meeting_insights(&collaborator, year, meeting)
                .await?
                .with_context(|| {
                    format!("No meeting {meeting} for {collaborator} in {year}")
                })?;
            print_json(&insights)
        }
        Commands::Import { file } => {
            let store = storage::from_config(&config.storage).await?;
            let saved = oneonone::import::import_file(store.as_ref(), &file).await?;
            println!("Imported {saved} journey(s) from {}", file.display());
            Ok(())
        }
    }
}

async fn open_engine(config: &AppConfig) -> anyhow::Result<AnalyticsEngine> {
    let store = storage::from_config(&config.storage)
        .await
        .context("Failed to open journey storage")?;
    Ok(AnalyticsEngine::new(store))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
