//! GloVe backend
//!
//! Vector sets are identified by name (`840B`, `6B`, ...) and dimension and
//! live in a cache directory as `glove.<name>.<dim>d.txt`. The first load
//! of a set writes a binary word2vec copy next to the text file; later
//! loads read that copy instead.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::acquire::{ensure_vector_file, with_suffix};
use crate::embedding::discovery::resolve_cache_dir;
use crate::embedding::PretrainedKind;
use crate::error::{EmbeddingError, Result};
use crate::format::{load_glove, load_word2vec, save_word2vec};
use crate::provider::EmbeddingProvider;
use crate::table::VectorTable;

pub const DEFAULT_GLOVE_SET: &str = "840B";
pub const DEFAULT_GLOVE_DIM: usize = 300;

/// Published GloVe sets and their download archives
const GLOVE_URLS: &[(&str, &str)] = &[
    ("42B", "http://nlp.stanford.edu/data/glove.42B.300d.zip"),
    ("840B", "http://nlp.stanford.edu/data/glove.840B.300d.zip"),
    ("twitter.27B", "http://nlp.stanford.edu/data/glove.twitter.27B.zip"),
    ("6B", "http://nlp.stanford.edu/data/glove.6B.zip"),
];

/// Download archive for a named GloVe set
pub fn glove_url(name: &str) -> Option<&'static str> {
    GLOVE_URLS
        .iter()
        .find(|(set, _)| *set == name)
        .map(|(_, url)| *url)
}

/// GloVe backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GloVeConfig {
    /// Set name, e.g. `840B`
    pub name: String,
    /// Vector dimension, selects the file within the set
    pub dim: usize,
    /// Cache directory; see [`resolve_cache_dir`] when unset
    pub cache: Option<PathBuf>,
    /// Keep at most this many vectors
    pub max_vectors: Option<usize>,
}

impl Default for GloVeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_GLOVE_SET.to_string(),
            dim: DEFAULT_GLOVE_DIM,
            cache: None,
            max_vectors: None,
        }
    }
}

impl GloVeConfig {
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = dim;
        self
    }

    pub fn with_cache(mut self, cache: impl Into<PathBuf>) -> Self {
        self.cache = Some(cache.into());
        self
    }

    pub fn with_max_vectors(mut self, max_vectors: Option<usize>) -> Self {
        self.max_vectors = max_vectors;
        self
    }

    /// Text file for this set inside `cache_dir`
    pub fn text_path(&self, cache_dir: &Path) -> PathBuf {
        cache_dir.join(format!("glove.{}.{}d.txt", self.name, self.dim))
    }

    /// Binary copy written after the first text load
    pub fn binary_path(&self, cache_dir: &Path) -> PathBuf {
        let text = self.text_path(cache_dir);
        match self.max_vectors {
            Some(max) => with_suffix(&text, &format!("_{max}.bin")),
            None => with_suffix(&text, ".bin"),
        }
    }
}

/// Pretrained GloVe word vectors
pub struct GloVe {
    table: VectorTable,
    name: String,
}

impl GloVe {
    /// Load set `name` from `cache` (or the resolved default cache)
    pub fn new(name: &str, cache: Option<&Path>, max_vectors: Option<usize>) -> Result<Self> {
        let mut config = GloVeConfig::default()
            .with_name(name)
            .with_max_vectors(max_vectors);
        config.cache = cache.map(Path::to_path_buf);
        Self::with_config(&config)
    }

    pub fn with_config(config: &GloVeConfig) -> Result<Self> {
        if config.dim == 0 {
            return Err(EmbeddingError::invalid_input("GloVe dimension must be positive"));
        }

        log::info!("Loading GloVe pretrained vectors ({})", config.name);

        let cache_dir = resolve_cache_dir(config.cache.as_deref());
        let text_path = config.text_path(&cache_dir);
        let binary_path = config.binary_path(&cache_dir);

        let table = if binary_path.exists() {
            load_word2vec(&binary_path, true, None)?
        } else {
            if !text_path.exists() {
                let url = glove_url(&config.name).ok_or_else(|| {
                    EmbeddingError::load(format!(
                        "unknown GloVe set '{}' and {} not found",
                        config.name,
                        text_path.display()
                    ))
                })?;
                let zip_name = url.rsplit('/').next().unwrap_or(url);
                ensure_vector_file(&text_path, url, &cache_dir.join(zip_name))?;
            }

            let table = load_glove(&text_path, config.max_vectors)?;
            check_dim(&table, config.dim, &text_path)?;
            if let Err(e) = save_word2vec(&table, &binary_path, true) {
                log::warn!("Failed to cache {}: {}", binary_path.display(), e);
            }
            table
        };
        check_dim(&table, config.dim, &binary_path)?;

        log::info!("Done");
        Ok(Self {
            table,
            name: config.name.clone(),
        })
    }

    /// Set name this instance was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn check_dim(table: &VectorTable, expected: usize, path: &Path) -> Result<()> {
    if table.dim() != expected {
        return Err(EmbeddingError::load(format!(
            "{} holds {}-d vectors, expected {}",
            path.display(),
            table.dim(),
            expected
        )));
    }
    Ok(())
}

impl EmbeddingProvider for GloVe {
    fn table(&self) -> &VectorTable {
        &self.table
    }

    fn kind(&self) -> PretrainedKind {
        PretrainedKind::GloVe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquire::tests::write_zip;
    use crate::error::ErrorKind;
    use std::fs;

    const TXT: &str = "the 0.1 0.2 0.3 0.4\ncat 1 1 1 1\n, 0 0 0 -1\n";

    fn config(cache: &Path) -> GloVeConfig {
        GloVeConfig::default()
            .with_name("6B")
            .with_dim(4)
            .with_cache(cache)
    }

    #[test]
    fn test_glove_url() {
        assert_eq!(
            glove_url("6B"),
            Some("http://nlp.stanford.edu/data/glove.6B.zip")
        );
        assert!(glove_url("1T").is_none());
    }

    #[test]
    fn test_paths() {
        let cfg = config(Path::new("/cache")).with_max_vectors(Some(1000));
        assert_eq!(
            cfg.text_path(Path::new("/cache")),
            PathBuf::from("/cache/glove.6B.4d.txt")
        );
        assert_eq!(
            cfg.binary_path(Path::new("/cache")),
            PathBuf::from("/cache/glove.6B.4d.txt_1000.bin")
        );
    }

    #[test]
    fn test_load_from_cached_text() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        fs::write(cfg.text_path(dir.path()), TXT).unwrap();

        let glove = GloVe::with_config(&cfg).unwrap();
        assert_eq!(glove.dim(), 4);
        assert_eq!(glove.vocab_size(), 3);
        assert_eq!(glove.name(), "6B");
        assert!(cfg.binary_path(dir.path()).exists());

        let m = glove.extract(&["cat", "dog", ","]);
        assert_eq!(m.row(0).to_vec(), vec![1.0; 4]);
        assert_eq!(m.row(1).to_vec(), vec![0.0; 4]);
        assert_eq!(m.row(2).to_vec(), vec![0.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_binary_cache_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        fs::write(cfg.text_path(dir.path()), TXT).unwrap();
        let first = GloVe::with_config(&cfg).unwrap();

        fs::remove_file(cfg.text_path(dir.path())).unwrap();
        let second = GloVe::with_config(&cfg).unwrap();
        assert_eq!(second.table().words(), first.table().words());
    }

    #[test]
    fn test_dim_mismatch_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path()).with_dim(3);
        fs::write(cfg.text_path(dir.path()), TXT).unwrap();

        let err = GloVe::with_config(&cfg).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::LoadError);
        assert!(err.to_string().contains("holds 4-d vectors, expected 3"));
        assert!(!cfg.binary_path(dir.path()).exists());
    }

    #[test]
    fn test_cache_written_through_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        fs::write(cfg.text_path(dir.path()), TXT).unwrap();
        let part = with_suffix(&cfg.binary_path(dir.path()), ".part");
        fs::write(&part, b"3 4\nthe \x00").unwrap();

        let glove = GloVe::with_config(&cfg).unwrap();
        assert!(!part.exists());

        let cached = load_word2vec(&cfg.binary_path(dir.path()), true, None).unwrap();
        assert_eq!(cached.vectors(), glove.table().vectors());
    }

    #[test]
    fn test_max_vectors_uses_separate_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path()).with_max_vectors(Some(2));
        fs::write(cfg.text_path(dir.path()), TXT).unwrap();

        let glove = GloVe::with_config(&cfg).unwrap();
        assert_eq!(glove.vocab_size(), 2);
        assert!(!glove.contains(","));
        assert!(!config(dir.path()).binary_path(dir.path()).exists());
    }

    #[test]
    fn test_unzips_prestaged_archive() {
        let dir = tempfile::tempdir().unwrap();
        write_zip(
            &dir.path().join("glove.6B.zip"),
            &[("glove.6B.4d.txt", TXT.as_bytes())],
        );

        let glove = GloVe::with_config(&config(dir.path())).unwrap();
        assert_eq!(glove.vocab_size(), 3);
    }

    #[test]
    fn test_unknown_set_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path()).with_name("1T");
        let err = GloVe::with_config(&cfg).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::LoadError);
        assert!(err.to_string().contains("unknown GloVe set"));
    }

    #[test]
    fn test_zero_dim_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = GloVe::with_config(&config(dir.path()).with_dim(0)).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_config_json_defaults() {
        let cfg: GloVeConfig = serde_json::from_str(r#"{"name": "42B"}"#).unwrap();
        assert_eq!(cfg.dim, DEFAULT_GLOVE_DIM);
        assert_eq!(cfg.name, "42B");
        assert!(cfg.cache.is_none());
    }
}
