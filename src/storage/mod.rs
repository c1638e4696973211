//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with a single table:
//! - wordcounter(id, word, total_count, modified_date_millis)
//!
//! The store never keeps a handle open between calls; each operation opens
//! its own connection and drops it before returning.

pub mod schema;
pub mod sqlite;

pub use sqlite::{StoreStats, WordCounterStore};
