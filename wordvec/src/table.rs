//! Immutable vocabulary + vector table
//!
//! A `VectorTable` is built once by a format reader and never mutated
//! afterwards. Row `i` of `vectors` belongs to `words[i]`.

use std::collections::HashMap;

use ndarray::{Array2, ArrayView1};

use crate::align::WordIndex;
use crate::error::{EmbeddingError, Result};

/// Vocabulary mapping and dense vector rows of one loaded backend
#[derive(Debug, Clone)]
pub struct VectorTable {
    words: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Array2<f32>,
}

impl VectorTable {
    /// Build a table from a word list and a `(words.len(), dim)` matrix
    ///
    /// Fails if the shapes disagree, `dim` is zero or a word repeats.
    pub fn new(words: Vec<String>, vectors: Array2<f32>) -> Result<Self> {
        let (rows, dim) = vectors.dim();
        if dim == 0 {
            return Err(EmbeddingError::load("vector dimension must be positive"));
        }
        if rows != words.len() {
            return Err(EmbeddingError::load(format!(
                "{} words but {} vector rows",
                words.len(),
                rows
            )));
        }

        let mut index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            if index.insert(word.clone(), i).is_some() {
                return Err(EmbeddingError::load(format!("duplicate word '{}'", word)));
            }
        }

        Ok(Self {
            words,
            index,
            vectors,
        })
    }

    /// Vector length
    pub fn dim(&self) -> usize {
        self.vectors.ncols()
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in row order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Word to row mapping
    pub fn vocab(&self) -> &HashMap<String, usize> {
        &self.index
    }

    /// The full `(len, dim)` matrix
    pub fn vectors(&self) -> &Array2<f32> {
        &self.vectors
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Row for `word`, if known
    pub fn vector(&self, word: &str) -> Option<ArrayView1<'_, f32>> {
        self.index.get(word).map(|&i| self.vectors.row(i))
    }

    /// Row `i`
    ///
    /// Panics if `i >= len()`.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f32> {
        self.vectors.row(i)
    }
}

impl WordIndex for VectorTable {
    fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }
}

/// Incremental builder used by the format readers
///
/// Rows are appended in file order. A word seen a second time is skipped so
/// the first occurrence keeps its row.
#[derive(Debug)]
pub struct TableBuilder {
    dim: usize,
    words: Vec<String>,
    index: HashMap<String, usize>,
    data: Vec<f32>,
}

impl TableBuilder {
    pub fn new(dim: usize) -> Self {
        Self::with_capacity(dim, 0)
    }

    /// Builder with room for `rows` rows
    pub fn with_capacity(dim: usize, rows: usize) -> Self {
        Self {
            dim,
            words: Vec::with_capacity(rows),
            index: HashMap::with_capacity(rows),
            data: Vec::with_capacity(rows.saturating_mul(dim)),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Rows kept so far
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Append a row
    ///
    /// Returns `Ok(false)` when `word` is already present and the row was
    /// skipped.
    pub fn push(&mut self, word: String, vector: &[f32]) -> Result<bool> {
        if vector.len() != self.dim {
            return Err(EmbeddingError::load(format!(
                "vector for '{}' has {} dimensions, expected {}",
                word,
                vector.len(),
                self.dim
            )));
        }
        if self.index.contains_key(&word) {
            return Ok(false);
        }

        self.index.insert(word.clone(), self.words.len());
        self.words.push(word);
        self.data.extend_from_slice(vector);
        Ok(true)
    }

    /// Finish into an immutable table
    pub fn build(self) -> Result<VectorTable> {
        if self.dim == 0 {
            return Err(EmbeddingError::load("vector dimension must be positive"));
        }
        let rows = self.words.len();
        let vectors = Array2::from_shape_vec((rows, self.dim), self.data)
            .map_err(|e| EmbeddingError::load(format!("invalid table shape: {}", e)))?;

        Ok(VectorTable {
            words: self.words,
            index: self.index,
            vectors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_new_table() {
        let table = VectorTable::new(
            vec!["a".into(), "b".into()],
            array![[1.0, 2.0], [3.0, 4.0]],
        )
        .unwrap();
        assert_eq!(table.dim(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.index_of("b"), Some(1));
        assert_eq!(table.vector("a").unwrap().to_vec(), vec![1.0, 2.0]);
        assert!(table.vector("c").is_none());
    }

    #[test]
    fn test_new_rejects_shape_mismatch() {
        let result = VectorTable::new(vec!["a".into()], array![[1.0], [2.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = VectorTable::new(vec!["a".into(), "a".into()], array![[1.0], [2.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_first_occurrence_wins() {
        let mut builder = TableBuilder::new(2);
        assert!(builder.push("x".into(), &[1.0, 1.0]).unwrap());
        assert!(!builder.push("x".into(), &[9.0, 9.0]).unwrap());
        assert!(builder.push("y".into(), &[2.0, 2.0]).unwrap());

        let table = builder.build().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.words(), &["x".to_string(), "y".to_string()]);
        assert_eq!(table.row(0).to_vec(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_builder_rejects_wrong_length() {
        let mut builder = TableBuilder::new(3);
        assert!(builder.push("x".into(), &[1.0]).is_err());
    }

    #[test]
    fn test_builder_empty_table_keeps_dim() {
        let table = TableBuilder::new(4).build().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.dim(), 4);
    }

    #[test]
    fn test_builder_zero_dim() {
        assert!(TableBuilder::new(0).build().is_err());
    }
}
