//! Pretrained word vector backends
//!
//! GloVe, word2vec and FastText tables behind one `EmbeddingProvider`
//! interface.

mod discovery;
mod engine;
mod fasttext;
mod glove;
mod word2vec;

pub use discovery::{resolve_cache_dir, CACHE_ENV};
pub use engine::{open, BackendConfig, PretrainedKind, AVAILABLE_PRETRAINED};
pub use fasttext::{FastText, FastTextConfig, FASTTEXT_CRAWL_URL};
pub use glove::{glove_url, GloVe, GloVeConfig, DEFAULT_GLOVE_DIM, DEFAULT_GLOVE_SET};
pub use word2vec::{Word2Vec, Word2VecConfig};
