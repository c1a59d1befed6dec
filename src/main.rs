//! # Manual Ingest CLI (`manual-ingest`)
//!
//! Commands for database initialization, manual ingestion, listing stored
//! study material, and database stats.
//!
//! ## Usage
//!
//! ```bash
//! manual-ingest --config ./config/manual-ingest.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `manual-ingest init` | Create the SQLite database and run schema migrations |
//! | `manual-ingest ingest <path>` | Ingest a manual or quoted batch (`-` reads stdin) |
//! | `manual-ingest list` | List stored entries |
//! | `manual-ingest stats` | Show entry counts per source and category |
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` or pass `-v`
//! for more detail.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use manual_ingest::config;
use manual_ingest::ingest::{self, InputFormat};
use manual_ingest::list;
use manual_ingest::migrate;
use manual_ingest::models::EntryFilter;
use manual_ingest::source::TextSource;
use manual_ingest::stats;

/// Manual Ingest — section-aware ingestion of training manuals.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file.
#[derive(Parser)]
#[command(
    name = "manual-ingest",
    about = "Manual Ingest — section-aware ingestion of training manuals into a local study-material store",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/manual-ingest.toml")]
    config: PathBuf,

    /// Log debug detail to stderr (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Idempotent — running it multiple times is safe.
    Init,

    /// Ingest a manual into the database.
    ///
    /// Splits the text into sections (or quoted rows), drops invalid entries
    /// and titles this source already has, and stores the rest in one batch.
    Ingest {
        /// File to read (`.txt`, `.pdf`, `.docx`, `.csv`), or `-` for stdin.
        path: String,

        /// Deduplication scope. Defaults to the file name, or `stdin`.
        #[arg(long)]
        source_name: Option<String>,

        /// Category stamped on every entry. Defaults to `ingest.category`.
        #[arg(long)]
        category: Option<String>,

        /// Input format.
        #[arg(long, value_enum, default_value = "auto")]
        format: InputFormat,

        /// Show what would be inserted without writing.
        #[arg(long)]
        dry_run: bool,
    },

    /// List stored entries.
    List {
        /// Only entries from this source.
        #[arg(long)]
        source: Option<String>,

        /// Only entries in this category.
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive text to find in title or content.
        #[arg(long)]
        search: Option<String>,

        /// Maximum number of entries to show.
        #[arg(long)]
        limit: Option<i64>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show entry counts per source and category.
    Stats,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Ingest {
            path,
            source_name,
            category,
            format,
            dry_run,
        } => {
            let source = if path == "-" {
                TextSource::Stdin
            } else {
                TextSource::File(PathBuf::from(path))
            };
            ingest::run_ingest(&cfg, source, source_name, category, format, dry_run).await?;
        }
        Commands::List {
            source,
            category,
            search,
            limit,
            json,
        } => {
            let filter = EntryFilter {
                source_name: source,
                category,
                search,
                limit,
            };
            list::run_list(&cfg, &filter, json).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}
