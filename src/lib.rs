//! # Wordcounter - Word-frequency counter store
//!
//! Persists word-frequency counts to a local SQLite table.
//!
//! Wordcounter provides:
//! - A `WordCount` row model (word, cumulative count, last-modified time)
//! - A connection-per-operation SQLite store with insert, bulk insert and clear
//! - Schema versioning that recreates the table when the layout changes

pub mod word_count;
pub mod storage;
pub mod output;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use word_count::WordCount;
pub use storage::{StoreStats, WordCounterStore};

use std::path::PathBuf;

/// Result type alias for Wordcounter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Wordcounter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Database schema version {found} is newer than supported version {supported}")]
    SchemaDowngrade { found: i32, supported: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
