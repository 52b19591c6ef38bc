//! GloVe text format
//!
//! One `word v1 ... vdim` row per line, no header. The vector length is
//! taken from the first row.

use std::io::BufRead;
use std::path::Path;

use crate::error::{EmbeddingError, Result};
use crate::format::{open, truncated};
use crate::table::{TableBuilder, VectorTable};

/// Load a GloVe text file, keeping at most `max_vectors` rows
pub fn load_glove(path: &Path, max_vectors: Option<usize>) -> Result<VectorTable> {
    let mut reader = open(path)?;
    let table = read_glove(&mut reader, max_vectors).map_err(|e| match e {
        EmbeddingError::Load(msg) => EmbeddingError::load(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;

    log::info!(
        "Loaded {} GloVe vectors ({}d) from {}",
        table.len(),
        table.dim(),
        path.display()
    );
    Ok(table)
}

/// Read GloVe rows from any buffered reader
pub fn read_glove<R: BufRead>(reader: &mut R, max_vectors: Option<usize>) -> Result<VectorTable> {
    let max_vectors = max_vectors.unwrap_or(usize::MAX);
    let mut builder: Option<TableBuilder> = None;
    let mut line = Vec::new();
    let mut vector = Vec::new();
    let mut line_no = 0usize;

    loop {
        if builder.as_ref().map_or(0, TableBuilder::len) >= max_vectors {
            break;
        }

        line.clear();
        if reader.read_until(b'\n', &mut line).map_err(truncated)? == 0 {
            break;
        }
        line_no += 1;

        let trimmed = line.trim_ascii_end();
        if trimmed.is_empty() {
            continue;
        }

        let mut fields = trimmed.split(|&b| b == b' ');
        let word = fields.next().unwrap_or_default();

        vector.clear();
        for field in fields {
            vector.push(parse_component(field, line_no)?);
        }

        if vector.len() == 1 {
            log::warn!(
                "Skipping token on line {} with 1-dimensional vector; likely a header or stray row",
                line_no
            );
            continue;
        }
        let builder = builder.get_or_insert_with(|| TableBuilder::new(vector.len()));

        if vector.len() != builder.dim() {
            return Err(EmbeddingError::load(format!(
                "vector on line {} has {} dimensions, but previously read vectors have {} dimensions",
                line_no,
                vector.len(),
                builder.dim()
            )));
        }

        let word = match std::str::from_utf8(word) {
            Ok(w) => w.to_string(),
            Err(_) => {
                log::debug!("Skipping non-UTF8 token on line {}", line_no);
                continue;
            }
        };
        if !builder.push(word, &vector)? {
            log::debug!("Skipping duplicate token on line {}", line_no);
        }
    }

    match builder {
        Some(b) => b.build(),
        None => Err(EmbeddingError::load("no vectors found")),
    }
}

fn parse_component(field: &[u8], line_no: usize) -> Result<f32> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .ok_or_else(|| EmbeddingError::load(format!("invalid number on line {}", line_no)))
}
