use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::normalize::{DEFAULT_MAX_TITLE_CHARS, DEFAULT_MIN_CONTENT_CHARS};
use crate::quoted::DEFAULT_UNTITLED_LABEL;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_max_title_chars")]
    pub max_title_chars: usize,
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,
    #[serde(default = "default_untitled_label")]
    pub untitled_label: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            max_title_chars: DEFAULT_MAX_TITLE_CHARS,
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
            untitled_label: default_untitled_label(),
        }
    }
}

fn default_category() -> String {
    "Dispatcher Training".to_string()
}
fn default_max_title_chars() -> usize {
    DEFAULT_MAX_TITLE_CHARS
}
fn default_min_content_chars() -> usize {
    DEFAULT_MIN_CONTENT_CHARS
}
fn default_untitled_label() -> String {
    DEFAULT_UNTITLED_LABEL.to_string()
}

impl Config {
    /// Config with only a database path; everything else defaulted.
    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db: DbConfig { path: path.into() },
            ingest: IngestConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.ingest.max_title_chars == 0 {
        anyhow::bail!("ingest.max_title_chars must be > 0");
    }

    if config.ingest.category.trim().is_empty() {
        anyhow::bail!("ingest.category must not be empty");
    }

    if config.ingest.untitled_label.trim().is_empty() {
        anyhow::bail!("ingest.untitled_label must not be empty");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let cfg = parse_config("[db]\npath = \"./data/manuals.sqlite\"\n").unwrap();
        assert_eq!(cfg.db.path, PathBuf::from("./data/manuals.sqlite"));
        assert_eq!(cfg.ingest.category, "Dispatcher Training");
        assert_eq!(cfg.ingest.max_title_chars, 255);
        assert_eq!(cfg.ingest.min_content_chars, 15);
        assert_eq!(cfg.ingest.untitled_label, "Untitled Protocol");
    }

    #[test]
    fn test_partial_ingest_section() {
        let cfg = parse_config(
            "[db]\npath = \"db.sqlite\"\n\n[ingest]\ncategory = \"Safety\"\nmin_content_chars = 40\n",
        )
        .unwrap();
        assert_eq!(cfg.ingest.category, "Safety");
        assert_eq!(cfg.ingest.min_content_chars, 40);
        assert_eq!(cfg.ingest.max_title_chars, 255);
    }

    #[test]
    fn test_rejects_zero_title_length() {
        let err = parse_config("[db]\npath = \"db.sqlite\"\n[ingest]\nmax_title_chars = 0\n")
            .unwrap_err();
        assert!(err.to_string().contains("max_title_chars"));
    }

    #[test]
    fn test_rejects_blank_category() {
        assert!(parse_config("[db]\npath = \"db.sqlite\"\n[ingest]\ncategory = \"  \"\n").is_err());
    }

    #[test]
    fn test_missing_db_section_is_error() {
        assert!(parse_config("[ingest]\ncategory = \"x\"\n").is_err());
    }
}
