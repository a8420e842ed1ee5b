//! Composer configuration, read from TOML.
//!
//! Every field has a default so an empty file (or no file at all) yields a
//! working configuration.
//!
//! ```toml
//! storage_key = "elden-ring-advice-state"
//! history_limit = 100
//! lexicon_dir = "lexicon/zh-CN"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_STORAGE_KEY: &str = "elden-ring-advice-state";
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_LEXICON_DIR: &str = "lexicon/zh-CN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Key the state blob is stored under.
    pub storage_key: String,
    /// Maximum number of history entries kept.
    pub history_limit: usize,
    /// Directory holding `templates.txt`, `conjunctions.txt` and one file per category.
    pub lexicon_dir: PathBuf,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            lexicon_dir: PathBuf::from(DEFAULT_LEXICON_DIR),
        }
    }
}

impl ComposerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
