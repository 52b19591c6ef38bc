//! Backend selection
//!
//! One entry point that turns a `BackendConfig` into a loaded provider,
//! so callers can pick GloVe, word2vec or FastText from configuration.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::fasttext::{FastText, FastTextConfig};
use super::glove::{GloVe, GloVeConfig};
use super::word2vec::{Word2Vec, Word2VecConfig};
use crate::error::{EmbeddingError, Result};
use crate::provider::EmbeddingProvider;

/// Backend names accepted by [`PretrainedKind::from_str`]
pub const AVAILABLE_PRETRAINED: [&str; 3] = ["glove", "word2vec", "fasttext"];

/// Pretrained vector backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PretrainedKind {
    GloVe,
    Word2Vec,
    FastText,
}

impl PretrainedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GloVe => "glove",
            Self::Word2Vec => "word2vec",
            Self::FastText => "fasttext",
        }
    }
}

impl fmt::Display for PretrainedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PretrainedKind {
    type Err = EmbeddingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "glove" => Ok(Self::GloVe),
            "word2vec" => Ok(Self::Word2Vec),
            "fasttext" => Ok(Self::FastText),
            other => Err(EmbeddingError::invalid_input(format!(
                "unknown pretrained backend '{}', expected one of {}",
                other,
                AVAILABLE_PRETRAINED.join(", ")
            ))),
        }
    }
}

/// Configuration for any of the three backends
///
/// Serialized with a `backend` tag:
///
/// ```json
/// {"backend": "word2vec", "path": "GoogleNews-vectors-negative300.bin", "limit": 200000}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum BackendConfig {
    GloVe(GloVeConfig),
    Word2Vec(Word2VecConfig),
    FastText(FastTextConfig),
}

impl BackendConfig {
    pub fn kind(&self) -> PretrainedKind {
        match self {
            Self::GloVe(_) => PretrainedKind::GloVe,
            Self::Word2Vec(_) => PretrainedKind::Word2Vec,
            Self::FastText(_) => PretrainedKind::FastText,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EmbeddingError::file_not_found(path),
            _ => e.into(),
        })?;
        Self::from_json_str(&json)
    }
}

/// Load the backend described by `config`
///
/// Blocks until the whole table is in memory. No partially loaded provider
/// is ever returned.
pub fn open(config: &BackendConfig) -> Result<Box<dyn EmbeddingProvider>> {
    let provider: Box<dyn EmbeddingProvider> = match config {
        BackendConfig::GloVe(cfg) => Box::new(GloVe::with_config(cfg)?),
        BackendConfig::Word2Vec(cfg) => Box::new(Word2Vec::with_config(cfg)?),
        BackendConfig::FastText(cfg) => Box::new(FastText::with_config(cfg)?),
    };

    log::info!(
        "{} ready ({} words, {}d)",
        provider.kind(),
        provider.vocab_size(),
        provider.dim()
    );
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;

    #[test]
    fn test_kind_round_trip_names() {
        for name in AVAILABLE_PRETRAINED {
            let kind: PretrainedKind = name.parse().unwrap();
            assert_eq!(kind.as_str(), name);
        }
        assert_eq!("GloVe".parse::<PretrainedKind>().unwrap(), PretrainedKind::GloVe);
    }

    #[test]
    fn test_unknown_kind() {
        let err = "elmo".parse::<PretrainedKind>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("glove, word2vec, fasttext"));
    }

    #[test]
    fn test_config_from_json() {
        let cfg = BackendConfig::from_json_str(
            r#"{"backend": "fasttext", "path": "/v/crawl-300d-2M.vec", "limit": 50000}"#,
        )
        .unwrap();
        assert_eq!(cfg.kind(), PretrainedKind::FastText);
        match cfg {
            BackendConfig::FastText(ft) => {
                assert_eq!(ft.limit, Some(50000));
                assert!(ft.url.ends_with("crawl-300d-2M.vec.zip"));
            }
            _ => panic!("Expected FastText config"),
        }
    }

    #[test]
    fn test_config_unknown_backend() {
        let err = BackendConfig::from_json_str(r#"{"backend": "bert"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_config_file_missing() {
        let err = BackendConfig::from_json_file(Path::new("/nonexistent/cfg.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn test_open_word2vec() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.txt");
        fs::write(&path, "2 2\na 1 2\nb 3 4\n").unwrap();

        let cfg = BackendConfig::Word2Vec(Word2VecConfig::new(&path).with_binary(false));
        let provider = open(&cfg).unwrap();
        assert_eq!(provider.kind(), PretrainedKind::Word2Vec);
        assert_eq!(provider.extract(&["b"]).row(0).to_vec(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_open_missing_word2vec() {
        let cfg = BackendConfig::Word2Vec(Word2VecConfig::new("/nonexistent/v.bin"));
        let err = open(&cfg).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }
}
