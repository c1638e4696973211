use tabled::{settings::Style, Table, Tabled};

use crate::storage::StoreStats;
use crate::word_count::WordCount;

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct WordRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Word")]
    word: String,
    #[tabled(rename = "Count")]
    count: i64,
    #[tabled(rename = "Modified")]
    modified: String,
}

impl From<&WordCount> for WordRow {
    fn from(row: &WordCount) -> Self {
        let modified = row
            .modified_at()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| row.modified_date_millis.to_string());

        Self {
            id: row.id,
            word: row.word.clone(),
            count: row.total_count,
            modified,
        }
    }
}

/// Render rows as a rounded table. Empty input renders as an empty string.
pub fn words_table(rows: &[WordCount]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    Table::new(rows.iter().map(WordRow::from))
        .with(Style::rounded())
        .to_string()
}

pub fn stats_table(stats: &StoreStats) -> String {
    let rows = [
        StatRow { metric: "Rows", value: stats.rows.to_string() },
        StatRow { metric: "Distinct words", value: stats.distinct_words.to_string() },
        StatRow { metric: "Total occurrences", value: stats.total_occurrences.to_string() },
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}
