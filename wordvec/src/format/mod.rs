//! On-disk vector table formats
//!
//! - `word2vec`: `<count> <dim>` header followed by binary or text rows
//! - `glove`: header-less text rows

pub mod glove;
pub mod word2vec;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::error::{EmbeddingError, Result};

pub use glove::{load_glove, read_glove};
pub use word2vec::{load_word2vec, read_word2vec, save_word2vec, write_word2vec};

/// Open a vector file, mapping a missing path to `FileNotFound`
pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::with_capacity(1 << 20, file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(EmbeddingError::file_not_found(path)),
        Err(e) => Err(e.into()),
    }
}

/// Map a read failure in the middle of a table to a load error
pub(crate) fn truncated(e: io::Error) -> EmbeddingError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => EmbeddingError::load(
            "unexpected end of input; is count incorrect or file otherwise damaged?",
        ),
        io::ErrorKind::InvalidData => EmbeddingError::load(format!("invalid data: {}", e)),
        _ => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_open_missing_file() {
        let err = open(Path::new("/nonexistent/vectors.bin")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn test_truncated_maps_eof() {
        let err = truncated(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert!(err.to_string().contains("unexpected end of input"));
    }
}
