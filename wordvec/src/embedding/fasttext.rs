//! FastText backend
//!
//! FastText publishes its vectors in the word2vec text format, so the
//! loaded table is a [`Word2Vec`] one. What differs is acquisition: the
//! `.vec` file is downloaded on first use and converted to a `.vec.bin`
//! sibling so later loads skip text parsing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::acquire::{ensure_vector_file, with_suffix};
use crate::embedding::word2vec::Word2Vec;
use crate::embedding::PretrainedKind;
use crate::error::Result;
use crate::provider::EmbeddingProvider;
use crate::table::VectorTable;

/// English Common Crawl vectors, 2M words, 300d
pub const FASTTEXT_CRAWL_URL: &str =
    "https://dl.fbaipublicfiles.com/fasttext/vectors-english/crawl-300d-2M.vec.zip";

/// FastText backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastTextConfig {
    /// Text (`.vec`) vector file; `<path>.bin` and `<path>.zip` live beside it
    pub path: PathBuf,
    /// Read at most this many rows
    #[serde(default)]
    pub limit: Option<usize>,
    /// Zip archive fetched when neither file exists
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String {
    FASTTEXT_CRAWL_URL.to_string()
}

impl FastTextConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: None,
            url: default_url(),
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }
}

/// Pretrained FastText word vectors
pub struct FastText {
    inner: Word2Vec,
}

impl FastText {
    pub fn load(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Self> {
        Self::with_config(&FastTextConfig::new(path.as_ref()).with_limit(limit))
    }

    /// Load with acquisition policy:
    /// 1. `<path>.bin` if present
    /// 2. `<path>` (text), writing `<path>.bin` for next time
    /// 3. otherwise fetch and unzip the archive, then retry 1 and 2
    pub fn with_config(config: &FastTextConfig) -> Result<Self> {
        let path_vec = config.path.as_path();
        let path_bin = with_suffix(path_vec, ".bin");
        let path_zip = with_suffix(path_vec, ".zip");

        if !path_bin.exists() && !path_vec.exists() {
            log::info!("Downloading FastText embeddings from {}", config.url);
            ensure_vector_file(path_vec, &config.url, &path_zip)?;
        }

        let inner = if path_bin.exists() {
            log::info!("Opening binary file {}", path_bin.display());
            Word2Vec::load(&path_bin, config.limit, true)?
        } else {
            log::info!("Opening textual (.vec) file {}", path_vec.display());
            let inner = Word2Vec::load(path_vec, config.limit, false)?;
            cache_binary(&inner, &path_bin, config.limit);
            inner
        };

        Ok(Self { inner })
    }
}

/// Write the binary sibling of a freshly parsed text file
///
/// A truncated table would shadow the full text file on the next load, so
/// only complete tables are cached. Failures are logged, not returned.
fn cache_binary(w2v: &Word2Vec, path_bin: &Path, limit: Option<usize>) {
    if limit.is_some() {
        log::debug!(
            "Row limit set, not caching {} as binary",
            path_bin.display()
        );
        return;
    }

    log::info!("Saving as binary file {}", path_bin.display());
    if let Err(e) = w2v.save(path_bin, true) {
        log::warn!("Failed to save {}: {}", path_bin.display(), e);
    }
}

impl EmbeddingProvider for FastText {
    fn table(&self) -> &VectorTable {
        self.inner.table()
    }

    fn kind(&self) -> PretrainedKind {
        PretrainedKind::FastText
    }
}
