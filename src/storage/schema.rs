//! Database schema definitions

/// Default database file name
pub const DB_NAME: &str = "wordcloud.db";

/// Schema version stamped into `PRAGMA user_version`.
/// Bumping it drops and recreates the counter table on next open.
/// Version 3 files carry the older `_id` primary key and are recreated.
pub const SCHEMA_VERSION: i32 = 4;

/// Counter table name
pub const WORDCOUNTER_TABLE: &str = "wordcounter";

pub const WORD_ID: &str = "id";
pub const WORD: &str = "word";
pub const TOTAL_COUNT: &str = "total_count";
pub const MODIFIED_DATE: &str = "modified_date_millis";

/// Column names in declaration order
pub const COLUMNS: &[&str] = &[WORD_ID, WORD, TOTAL_COUNT, MODIFIED_DATE];

/// SQL to create the counter table
pub const CREATE_WORDCOUNTER_TABLE: &str = r#"
CREATE TABLE wordcounter (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL,
    total_count INTEGER NOT NULL,
    modified_date_millis INTEGER NOT NULL
)
"#;

/// SQL to drop the counter table
pub const DROP_WORDCOUNTER_TABLE: &str = "DROP TABLE IF EXISTS wordcounter";

/// SQL to insert one row
pub const INSERT_WORD: &str = r#"
INSERT INTO wordcounter (word, total_count, modified_date_millis)
VALUES (?1, ?2, ?3)
"#;

/// Columns selected by every row read, matching `COLUMNS`
pub const SELECT_COLUMNS: &str = "id, word, total_count, modified_date_millis";
