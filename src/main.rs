//! Lotkeeper CLI - lot database server and import tool

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use lotkeeper::config::{self, LotkeeperConfig};
use lotkeeper::server::{self, AppState};
use lotkeeper::{ImportLayout, Importer, LotLookup, LotStore, ui};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lotkeeper")]
#[command(version)]
#[command(about = "Inventory lot tracker - lot records, CSV import and HTTP API")]
#[command(long_about = r#"
Lotkeeper keeps inventory lots (lot id, part, expiration) in a SQLite file
and imports them from exported CSV lot lists.

Example usage:
  lotkeeper serve --port 8089
  lotkeeper import --file lot.list.csv
  lotkeeper get --lot LOT123
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides config)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Default import layout for uploads (base, extended)
        #[arg(short, long)]
        layout: Option<ImportLayout>,
    },

    /// Import an exported lot list
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,

        /// Import layout (base, extended)
        #[arg(short, long)]
        layout: Option<ImportLayout>,
    },

    /// Look up a single lot
    Get {
        #[arg(short, long)]
        lot: String,
    },

    /// List lots for a part number
    Part {
        #[arg(short, long)]
        part: String,
    },

    /// List every lot
    List,

    /// Count stored lots
    Count,

    /// Delete a lot
    Delete {
        #[arg(short, long)]
        lot: String,
    },
}

fn open_store(database: &Path) -> anyhow::Result<LotStore> {
    config::ensure_db_dir(database)?;
    Ok(LotStore::open(database)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let database = cli.database.clone().unwrap_or_else(|| file_config.database_path());

    match cli.command {
        Commands::Serve { host, port, layout } => {
            let settings = LotkeeperConfig {
                database: None,
                host: host.or(file_config.host.clone()),
                port: port.or(file_config.port),
                layout: layout.or(file_config.layout),
            };
            let addr: SocketAddr = format!("{}:{}", settings.host(), settings.port()).parse()?;

            let store = open_store(&database)?;
            tracing::info!(
                "Serving {:?} ({} lots, layout {})",
                database,
                store.count()?,
                settings.layout()
            );

            let state = AppState::new(store, settings.layout());
            server::start_server(addr, state).await?;
        }

        Commands::Import { file, layout } => {
            let layout = layout.unwrap_or(file_config.layout());
            let store = open_store(&database)?;
            let reader = std::fs::File::open(&file)?;

            tracing::info!("Importing {} into {:?} ({} layout)", file.display(), database, layout);
            let report = Importer::new(&store, layout).ingest(reader)?;

            if cli.json {
                print_json(&report)?;
            } else {
                ui::header(&format!("Imported {}", file.display()));
                if !report.updates.is_empty() {
                    println!("{}", ui::lots_table(&report.updates));
                }
                println!("{}", ui::report_table(&report));
            }
        }

        Commands::Get { lot } => {
            let store = open_store(&database)?;
            match store.get(&lot)? {
                Some(record) if cli.json => print_json(&LotLookup::from(record))?,
                Some(record) => println!("{}", ui::lots_table(&[record])),
                None if cli.json => print_json(&serde_json::json!({ "error": "lot not found" }))?,
                None => ui::error(&format!("Lot not found: {}", lot)),
            }
        }

        Commands::Part { part } => {
            let store = open_store(&database)?;
            let lots = store.get_by_part(&part)?;
            if cli.json {
                print_json(&lots)?;
            } else if lots.is_empty() {
                ui::warn(&format!("No lots for part {}", part));
            } else {
                println!("{}", ui::lots_table(&lots));
            }
        }

        Commands::List => {
            let store = open_store(&database)?;
            let lots = store.get_all()?;
            if cli.json {
                print_json(&lots)?;
            } else if lots.is_empty() {
                ui::warn("No lots stored");
            } else {
                println!("{}", ui::lots_table(&lots));
            }
        }

        Commands::Count => {
            let store = open_store(&database)?;
            let count = store.count()?;
            if cli.json {
                print_json(&serde_json::json!({ "count": count }))?;
            } else {
                ui::info("Lots", &count.to_string());
            }
        }

        Commands::Delete { lot } => {
            let store = open_store(&database)?;
            let removed = store.delete(&lot)?;
            if cli.json {
                print_json(&serde_json::json!({ "deleted": lot }))?;
            } else if removed {
                ui::deleted(&lot);
            } else {
                ui::success(&format!("Lot {} was not stored, nothing to delete", lot));
            }
        }
    }

    Ok(())
}
