//! Wordcounter CLI - Command-line interface for the word-frequency store

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wordcounter::config::{self, WordCounterConfig};
use wordcounter::storage::WordCounterStore;
use wordcounter::ui::{self, Icons};

#[derive(Parser)]
#[command(name = "wordcounter")]
#[command(version)]
#[command(about = "Word-frequency counter store backed by SQLite")]
#[command(long_about = r#"
Wordcounter keeps word -> count rows in a local SQLite table.
Rows are append-only; inserting a word again adds another row.

Example usage:
  wordcounter insert cloud 3
  wordcounter import counts.json
  wordcounter list --word cloud
  wordcounter clear
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert a single word and count
    Insert {
        /// The word to record
        word: String,

        /// Occurrence count
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },

    /// Insert every entry of a JSON object or TOML table of word -> count
    Import {
        /// File to read (.toml is parsed as TOML, anything else as JSON)
        file: PathBuf,
    },

    /// Drop all rows and recreate the table
    Clear,

    /// List stored rows
    List {
        /// Only rows for this word
        #[arg(short, long)]
        word: Option<String>,
    },

    /// Show row, distinct-word and total-count statistics
    Stats,

    /// Write a config file pointing at the database
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the version
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }

    /// Banners and confirmations print only in human mode and only when
    /// quiet is off. Listings and tables follow `is_human` alone.
    pub fn shows_banners(&self, quiet: bool) -> bool {
        self.is_human() && !quiet
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    ok: bool,
    command: &'a str,
    data: T,
}

/// Print a success envelope in JSON mode; no-op for human output.
pub fn emit_success<T: Serialize>(output_mode: OutputMode, command: &str, data: T) -> anyhow::Result<()> {
    if output_mode == OutputMode::Json {
        let envelope = Envelope { ok: true, command, data };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    let chatty = output_mode.shows_banners(wordcounter::output::is_quiet());

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_config(Some(&config_path))
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    let database = config::resolve_database_path(cli.database.clone(), loaded.as_ref());

    match cli.command {
        Commands::Insert { word, count } => {
            let store = open_store(&database)?;
            let row_id = store.insert_word(&word, count)?;

            if chatty {
                ui::word_added(&word, count, row_id);
            }
            emit_success(output_mode, "insert", serde_json::json!({ "row_id": row_id }))?;
        }

        Commands::Import { file } => {
            let counts = config::load_word_counts(&file)?;
            if counts.is_empty() {
                ui::warn(&format!("{} contains no words", file.display()));
            }
            let store = open_store(&database)?;

            if chatty {
                ui::header(&format!("Importing {} words from {}", counts.len(), file.display()));
            }
            let last_row_id = store.insert_words(&counts)?;
            tracing::info!(words = counts.len(), last_row_id, "Import finished");

            if chatty {
                ui::success(&format!("Inserted {} words (last row {})", counts.len(), last_row_id));
            }
            emit_success(
                output_mode,
                "import",
                serde_json::json!({ "inserted": counts.len(), "last_row_id": last_row_id }),
            )?;
        }

        Commands::Clear => {
            let store = open_store(&database)?;
            store.clear_all()?;

            if chatty {
                println!("{} Cleared {}", Icons::DEL, database.display());
            }
            emit_success(output_mode, "clear", serde_json::json!({ "database": database }))?;
        }

        Commands::List { word } => {
            let store = open_store(&database)?;
            let rows = match word.as_deref() {
                Some(w) => store.find_word(w)?,
                None => store.all_words()?,
            };

            if output_mode.is_human() {
                if rows.is_empty() {
                    ui::empty("No words stored.");
                } else {
                    println!("{}", ui::words_table(&rows));
                }
            }
            emit_success(output_mode, "list", &rows)?;
        }

        Commands::Stats => {
            let store = open_store(&database)?;
            let stats = store.stats()?;

            if chatty {
                println!("{} Wordcounter Statistics ({})", Icons::STATS, database.display());
            }
            if output_mode.is_human() {
                println!("{}", ui::stats_table(&stats));
            }
            emit_success(
                output_mode,
                "stats",
                serde_json::json!({
                    "rows": stats.rows,
                    "distinct_words": stats.distinct_words,
                    "total_occurrences": stats.total_occurrences,
                }),
            )?;
        }

        Commands::Init { force } => {
            let new_config = WordCounterConfig {
                database: Some(database.to_string_lossy().into_owned()),
            };
            config::write_config(&config_path, &new_config, force)?;
            open_store(&database)?;

            if chatty {
                ui::success(&format!("Wrote {}", config_path.display()));
                ui::info(&format!("{} Database", Icons::DATABASE), &database.display().to_string());
            }
            emit_success(
                output_mode,
                "init",
                serde_json::json!({ "config": config_path, "database": database }),
            )?;
        }

        Commands::Version => commands::run_version(output_mode)?,
    }

    Ok(())
}

fn open_store(database: &Path) -> anyhow::Result<WordCounterStore> {
    config::ensure_db_dir(database)?;
    let store = WordCounterStore::open(database)?;
    tracing::debug!(path = %database.display(), "Opened wordcounter store");
    Ok(store)
}
