//! SQLite storage implementation

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use rusqlite::{Connection, params};
use crate::{Result, Error};
use crate::word_count::{WordCount, now_millis};
use super::schema;

/// SQLite-backed storage for word counts.
///
/// Holds only the database location. Every operation acquires its own
/// connection, runs, and releases it before returning, on success and on
/// error alike.
#[derive(Debug, Clone)]
pub struct WordCounterStore {
    path: PathBuf,
}

impl WordCounterStore {
    /// Open a database file (creates if doesn't exist) and bring its schema
    /// up to date.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        store.with_connection(|_| Ok(()))?;
        Ok(store)
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `op` against a freshly opened connection.
    ///
    /// The connection is closed when this returns; an error from `op` drops
    /// it on the way out.
    fn with_connection<T>(&self, op: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut conn = Connection::open(&self.path).map_err(|source| Error::Open {
            path: self.path.clone(),
            source,
        })?;
        ensure_schema(&mut conn)?;

        let value = op(&mut conn)?;
        conn.close().map_err(|(_, e)| Error::Storage(e))?;
        Ok(value)
    }

    // ========== Write Operations ==========

    /// Insert a single word & count row, returning the new row id.
    ///
    /// No uniqueness check: inserting the same word again adds another row.
    pub fn insert_word(&self, word: &str, count: i64) -> Result<i64> {
        let modified = now_millis();
        self.with_connection(|conn| {
            conn.execute(schema::INSERT_WORD, params![word, count, modified])?;
            let row_id = conn.last_insert_rowid();
            tracing::debug!(row_id, word, count, "Added word to database");
            Ok(row_id)
        })
    }

    /// Insert one row per `(word, count)` entry, returning the id of the last
    /// row added, or `0` if there were no entries.
    ///
    /// Entries are inserted in iterator order, each on its own connection.
    /// Nothing is rolled back if an entry fails: rows inserted before the
    /// failure stay. With a `HashMap` the "last" row is unspecified; pass a
    /// `BTreeMap` for key order.
    pub fn insert_words<I, W, C>(&self, counts: I) -> Result<i64>
    where
        I: IntoIterator<Item = (W, C)>,
        W: AsRef<str>,
        C: Borrow<i64>,
    {
        let mut last_row_id = 0;
        for (word, count) in counts {
            last_row_id = self.insert_word(word.as_ref(), *count.borrow())?;
        }
        Ok(last_row_id)
    }

    /// Drop the counter table and recreate it empty.
    ///
    /// Dropping discards the AUTOINCREMENT sequence, so ids restart at 1.
    pub fn clear_all(&self) -> Result<()> {
        self.with_connection(|conn| {
            let tx = conn.transaction()?;
            tx.execute(schema::DROP_WORDCOUNTER_TABLE, [])?;
            tx.execute(schema::CREATE_WORDCOUNTER_TABLE, [])?;
            tx.commit()?;
            tracing::debug!("Wordcounter table dropped and recreated");
            Ok(())
        })
    }

    // ========== Read Operations ==========

    /// All rows, oldest first
    pub fn all_words(&self) -> Result<Vec<WordCount>> {
        self.with_connection(|conn| {
            let sql = format!(
                "SELECT {} FROM {} ORDER BY id",
                schema::SELECT_COLUMNS,
                schema::WORDCOUNTER_TABLE
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], row_to_word_count)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    /// Every row recorded for `word`, oldest first
    pub fn find_word(&self, word: &str) -> Result<Vec<WordCount>> {
        self.with_connection(|conn| {
            let sql = format!(
                "SELECT {} FROM {} WHERE word = ?1 ORDER BY id",
                schema::SELECT_COLUMNS,
                schema::WORDCOUNTER_TABLE
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([word], row_to_word_count)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    /// Count all rows
    pub fn count_rows(&self) -> Result<usize> {
        self.with_connection(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM wordcounter", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        self.with_connection(|conn| {
            let stats = conn.query_row(
                "SELECT COUNT(*), COUNT(DISTINCT word), COALESCE(SUM(total_count), 0) FROM wordcounter",
                [],
                |row| {
                    let rows: i64 = row.get(0)?;
                    let distinct: i64 = row.get(1)?;
                    Ok(StoreStats {
                        rows: rows as usize,
                        distinct_words: distinct as usize,
                        total_occurrences: row.get(2)?,
                    })
                },
            )?;
            Ok(stats)
        })
    }
}

/// Create or upgrade the counter table according to `PRAGMA user_version`.
///
/// A fresh file gets the table. An older version loses its table and gets
/// the current one. A newer version is refused.
fn ensure_schema(conn: &mut Connection) -> Result<()> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    match version.cmp(&schema::SCHEMA_VERSION) {
        Ordering::Equal => Ok(()),
        Ordering::Greater => Err(Error::SchemaDowngrade {
            found: version,
            supported: schema::SCHEMA_VERSION,
        }),
        Ordering::Less => {
            let tx = conn.transaction()?;
            if version == 0 {
                tx.execute(schema::CREATE_WORDCOUNTER_TABLE, [])?;
                tracing::debug!("Wordcounter database table created");
            } else {
                tracing::info!(
                    from = version,
                    to = schema::SCHEMA_VERSION,
                    "Upgrading wordcounter database"
                );
                tx.execute(schema::DROP_WORDCOUNTER_TABLE, [])?;
                tx.execute(schema::CREATE_WORDCOUNTER_TABLE, [])?;
            }
            tx.pragma_update(None, "user_version", schema::SCHEMA_VERSION)?;
            tx.commit()?;
            Ok(())
        }
    }
}

/// Helper to convert a row to a WordCount
fn row_to_word_count(row: &rusqlite::Row) -> rusqlite::Result<WordCount> {
    Ok(WordCount {
        id: row.get(0)?,
        word: row.get(1)?,
        total_count: row.get(2)?,
        modified_date_millis: row.get(3)?,
    })
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub rows: usize,
    pub distinct_words: usize,
    pub total_occurrences: i64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Rows: {}", self.rows)?;
        writeln!(f, "  Distinct words: {}", self.distinct_words)?;
        writeln!(f, "  Total occurrences: {}", self.total_occurrences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, WordCounterStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = WordCounterStore::open(dir.path().join(schema::DB_NAME)).unwrap();
        (dir, store)
    }

    fn table_columns(path: &Path) -> Vec<String> {
        let conn = Connection::open(path).unwrap();
        let mut stmt = conn.prepare("PRAGMA table_info(wordcounter)").unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_insert_word() {
        let (_dir, store) = temp_store();

        let before = now_millis();
        let id = store.insert_word("cloud", 7).unwrap();

        let rows = store.all_words().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].word, "cloud");
        assert_eq!(rows[0].total_count, 7);
        assert!(rows[0].modified_date_millis >= before);
    }

    #[test]
    fn test_duplicate_words_are_kept() {
        let (_dir, store) = temp_store();

        let first = store.insert_word("the", 3).unwrap();
        let second = store.insert_word("the", 5).unwrap();
        assert_ne!(first, second);

        let rows = store.find_word("the").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_count, 3);
        assert_eq!(rows[1].total_count, 5);
    }

    #[test]
    fn test_insert_words() {
        let (_dir, store) = temp_store();

        let mut counts: HashMap<String, i64> = HashMap::new();
        counts.insert("a".to_string(), 1);
        counts.insert("b".to_string(), 2);

        let last = store.insert_words(&counts).unwrap();

        let rows = store.all_words().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].id < rows[1].id);
        assert_eq!(rows[1].id, last);

        let mut words: Vec<_> = rows.iter().map(|r| (r.word.as_str(), r.total_count)).collect();
        words.sort();
        assert_eq!(words, vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_insert_words_in_key_order() {
        let (_dir, store) = temp_store();

        let counts: BTreeMap<&str, i64> = [("zebra", 1), ("apple", 4), ("mango", 2)].into_iter().collect();
        let last = store.insert_words(counts).unwrap();

        let rows = store.all_words().unwrap();
        let words: Vec<_> = rows.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["apple", "mango", "zebra"]);
        assert_eq!(store.find_word("zebra").unwrap()[0].id, last);
    }

    #[test]
    fn test_insert_words_empty() {
        let (_dir, store) = temp_store();

        let counts: HashMap<String, i64> = HashMap::new();
        assert_eq!(store.insert_words(&counts).unwrap(), 0);
        assert_eq!(store.count_rows().unwrap(), 0);
    }

    #[test]
    fn test_clear_all() {
        let (_dir, store) = temp_store();

        store.insert_word("alpha", 1).unwrap();
        store.insert_word("beta", 2).unwrap();
        store.clear_all().unwrap();

        assert_eq!(store.count_rows().unwrap(), 0);
        assert!(store.all_words().unwrap().is_empty());

        // Dropping the table resets the sequence
        let id = store.insert_word("gamma", 3).unwrap();
        assert_eq!(id, 1);
        assert_eq!(table_columns(store.path()), schema::COLUMNS);
    }

    #[test]
    fn test_stats() {
        let (_dir, store) = temp_store();

        store.insert_word("word", 2).unwrap();
        store.insert_word("word", 3).unwrap();
        store.insert_word("cloud", 10).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(
            stats,
            StoreStats { rows: 3, distinct_words: 2, total_occurrences: 15 }
        );
        assert!(stats.to_string().contains("Distinct words: 2"));
    }

    #[test]
    fn test_stats_empty() {
        let (_dir, store) = temp_store();
        assert_eq!(store.stats().unwrap().total_occurrences, 0);
    }

    #[test]
    fn test_open_stamps_schema_version() {
        let (_dir, store) = temp_store();

        let conn = Connection::open(store.path()).unwrap();
        let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0)).unwrap();
        assert_eq!(version, schema::SCHEMA_VERSION);
        assert_eq!(table_columns(store.path()), schema::COLUMNS);
    }

    #[test]
    fn test_upgrade_recreates_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE wordcounter (_id INTEGER PRIMARY KEY AUTOINCREMENT, word TEXT NOT NULL, total_count INTEGER NOT NULL, import_count INTEGER NOT NULL);
                 INSERT INTO wordcounter (word, total_count, import_count) VALUES ('old', 1, 1);
                 PRAGMA user_version = 2;",
            )
            .unwrap();
        }

        let store = WordCounterStore::open(&path).unwrap();
        assert_eq!(store.count_rows().unwrap(), 0);
        assert_eq!(table_columns(&path), schema::COLUMNS);
    }

    #[test]
    fn test_version_three_id_column_is_recreated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v3.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE wordcounter (_id INTEGER PRIMARY KEY AUTOINCREMENT, word TEXT NOT NULL, total_count INTEGER NOT NULL, modified_date_millis INTEGER NOT NULL);
                 INSERT INTO wordcounter (word, total_count, modified_date_millis) VALUES ('legacy', 1, 0);
                 PRAGMA user_version = 3;",
            )
            .unwrap();
        }

        let store = WordCounterStore::open(&path).unwrap();
        let id = store.insert_word("x", 1).unwrap();
        assert_eq!(id, 1);

        let rows = store.all_words().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].word, "x");
        assert_eq!(table_columns(&path), schema::COLUMNS);
    }

    #[test]
    fn test_insert_words_keeps_rows_before_failure() {
        let (_dir, store) = temp_store();
        {
            let conn = Connection::open(store.path()).unwrap();
            conn.execute_batch(
                "CREATE TRIGGER reject_b BEFORE INSERT ON wordcounter
                 WHEN NEW.word = 'b'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();
        }

        let counts: BTreeMap<&str, i64> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        let result = store.insert_words(counts);
        assert!(matches!(result, Err(Error::Storage(_))));

        let words: Vec<_> = store.all_words().unwrap().into_iter().map(|r| r.word).collect();
        assert_eq!(words, vec!["a".to_string()]);
    }

    #[test]
    fn test_newer_schema_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.pragma_update(None, "user_version", schema::SCHEMA_VERSION + 1).unwrap();
        }

        let err = WordCounterStore::open(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaDowngrade { found: 5, supported: 4 }
        ));
    }

    #[test]
    fn test_open_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("wordcloud.db");

        let err = WordCounterStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }
}
