//! Query-to-vocabulary index alignment
//!
//! Pairs positions in a query word list with row positions in a backend's
//! vector table, skipping words the backend does not know.

use std::collections::HashMap;
use std::hash::BuildHasher;

/// Word to row-index lookup
///
/// Anything that can answer "which row holds this word" can be aligned
/// against.
pub trait WordIndex {
    /// Row index of `word`, or `None` if the word is out of vocabulary
    fn index_of(&self, word: &str) -> Option<usize>;
}

impl<S: BuildHasher> WordIndex for HashMap<String, usize, S> {
    fn index_of(&self, word: &str) -> Option<usize> {
        self.get(word).copied()
    }
}

impl<S: BuildHasher> WordIndex for HashMap<&str, usize, S> {
    fn index_of(&self, word: &str) -> Option<usize> {
        self.get(word).copied()
    }
}

/// Two parallel index sequences produced by [`align`]
///
/// For every `k`, `query[source[k]]` is stored at row `target[k]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    /// Positions in the query
    pub source: Vec<usize>,
    /// Rows in the vector table
    pub target: Vec<usize>,
}

impl Alignment {
    /// Number of aligned pairs
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Iterate `(source, target)` pairs in query order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.source.iter().copied().zip(self.target.iter().copied())
    }
}

/// Align `query` against `index`
///
/// One lookup per query word. Out-of-vocabulary words contribute nothing;
/// repeated words produce one pair per occurrence.
pub fn align<W, I>(query: &[W], index: &I) -> Alignment
where
    W: AsRef<str>,
    I: WordIndex + ?Sized,
{
    let mut alignment = Alignment {
        source: Vec::with_capacity(query.len()),
        target: Vec::with_capacity(query.len()),
    };

    for (i, word) in query.iter().enumerate() {
        if let Some(j) = index.index_of(word.as_ref()) {
            alignment.source.push(i);
            alignment.target.push(j);
        }
    }

    alignment
}
