//! Embedding provider capability
//!
//! Every backend exposes the same three operations over its loaded
//! `VectorTable`. Backends only differ in how the table gets built.

use std::collections::HashSet;

use ndarray::Array2;

use crate::align::align;
use crate::embedding::PretrainedKind;
use crate::table::VectorTable;

/// Read-only access to a loaded set of pretrained word vectors
///
/// Implementations must be safe for concurrent use (Send + Sync).
pub trait EmbeddingProvider: Send + Sync {
    /// The backend's loaded table
    fn table(&self) -> &VectorTable;

    /// Which backend format this provider was loaded from
    fn kind(&self) -> PretrainedKind;

    /// All words the backend recognizes
    fn vocabulary(&self) -> HashSet<&str> {
        self.table().words().iter().map(String::as_str).collect()
    }

    /// Vector length
    fn dim(&self) -> usize {
        self.table().dim()
    }

    fn vocab_size(&self) -> usize {
        self.table().len()
    }

    fn contains(&self, word: &str) -> bool {
        self.table().contains(word)
    }

    /// Dense `(words.len(), dim)` matrix of vectors in query order
    ///
    /// Out-of-vocabulary words get a zero row.
    fn extract(&self, words: &[&str]) -> Array2<f32> {
        extract_rows(self.table(), words)
    }
}

/// Shared extraction over any table
pub fn extract_rows<W: AsRef<str>>(table: &VectorTable, words: &[W]) -> Array2<f32> {
    let mut extraction = Array2::<f32>::zeros((words.len(), table.dim()));
    let alignment = align(words, table);
    for (source, target) in alignment.pairs() {
        extraction.row_mut(source).assign(&table.row(target));
    }
    extraction
}
