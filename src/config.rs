use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::storage::schema;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WordCounterConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("wordcounter.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(schema::DB_NAME)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<WordCounterConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: WordCounterConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &WordCounterConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Pick the database path: explicit flag, then config, then the default
/// file in the working directory.
pub fn resolve_database_path(flag: Option<PathBuf>, config: Option<&WordCounterConfig>) -> PathBuf {
    flag.or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(|| default_database_path_in(Path::new(".")))
}

/// Read a word -> count mapping from a `.toml` table or, for any other
/// extension, a JSON object. Keys come back sorted, so an import runs in key
/// order and its "last row" is stable.
pub fn load_word_counts(path: &Path) -> anyhow::Result<BTreeMap<String, i64>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let counts: BTreeMap<String, i64> = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&contents).with_context(|| format!("invalid TOML in {}", path.display()))?
    } else {
        serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", path.display()))?
    };
    Ok(counts)
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
