//! word2vec-format backend
//!
//! Loads a table written in the word2vec binary or text format. The
//! vocabulary follows the file's row order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::embedding::PretrainedKind;
use crate::error::{EmbeddingError, Result};
use crate::format::{load_word2vec, save_word2vec};
use crate::provider::EmbeddingProvider;
use crate::table::VectorTable;

/// word2vec backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word2VecConfig {
    /// Vector file
    pub path: PathBuf,
    /// Read at most this many rows
    #[serde(default)]
    pub limit: Option<usize>,
    /// Binary (true) or text (false) table format
    #[serde(default = "default_binary")]
    pub binary: bool,
}

fn default_binary() -> bool {
    true
}

impl Word2VecConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: None,
            binary: true,
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }
}

/// Pretrained vectors read from a word2vec-format file
pub struct Word2Vec {
    table: VectorTable,
}

impl Word2Vec {
    /// Load vectors from `path`
    ///
    /// Fails with `FileNotFound` if `path` does not exist and with a load
    /// error if the file is not a valid table in the requested format.
    pub fn load(path: impl AsRef<Path>, limit: Option<usize>, binary: bool) -> Result<Self> {
        let path = path.as_ref();
        log::info!(
            "Loading word2vec format pretrained vectors from {}",
            path.display()
        );

        if !path.exists() {
            return Err(EmbeddingError::file_not_found(path));
        }
        let table = load_word2vec(path, binary, limit)?;

        Ok(Self { table })
    }

    pub fn with_config(config: &Word2VecConfig) -> Result<Self> {
        Self::load(&config.path, config.limit, config.binary)
    }

    /// Wrap an already loaded table
    pub fn from_table(table: VectorTable) -> Self {
        Self { table }
    }

    /// Write the loaded table to `path` in word2vec format
    pub fn save(&self, path: impl AsRef<Path>, binary: bool) -> Result<()> {
        save_word2vec(&self.table, path.as_ref(), binary)
    }
}

impl EmbeddingProvider for Word2Vec {
    fn table(&self) -> &VectorTable {
        &self.table
    }

    fn kind(&self) -> PretrainedKind {
        PretrainedKind::Word2Vec
    }
}
