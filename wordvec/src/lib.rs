//! wordvec
//!
//! Uniform access to pretrained word vectors stored as GloVe, word2vec or
//! FastText tables. Callers ask for vectors for a list of words and get a
//! dense matrix back without caring which format holds them.
//!
//! ## Features
//!
//! - **One interface** - `vocabulary()`, `dim()` and `extract()` on every backend
//! - **Order-preserving extraction** - row `i` of the result belongs to word `i`
//! - **Zero rows for unknown words** - out-of-vocabulary words never fail a query
//! - **Acquisition** - FastText and GloVe archives are downloaded and unzipped on first use
//! - **Binary caching** - text tables are converted to word2vec binary for faster reloads
//!
//! ## Example
//!
//! ```ignore
//! use wordvec::{EmbeddingProvider, Word2Vec};
//!
//! let w2v = Word2Vec::load("GoogleNews-vectors-negative300.bin", Some(200_000), true)?;
//! let matrix = w2v.extract(&["the", "quick", "qwzx"]);
//! assert_eq!(matrix.dim(), (3, w2v.dim()));
//! ```

pub mod acquire;
pub mod align;
pub mod embedding;
pub mod error;
pub mod format;
pub mod provider;
pub mod table;

// Re-exports for convenience
pub use align::{align, Alignment, WordIndex};
pub use embedding::{
    open, BackendConfig, FastText, FastTextConfig, GloVe, GloVeConfig, PretrainedKind, Word2Vec,
    Word2VecConfig, AVAILABLE_PRETRAINED,
};
pub use error::{EmbeddingError, ErrorKind, Result};
pub use provider::{extract_rows, EmbeddingProvider};
pub use table::{TableBuilder, VectorTable};
