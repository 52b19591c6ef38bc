//! word2vec table format
//!
//! ```text
//! <count> <dim>\n
//! <word> <dim little-endian f32>[\n]    (binary)
//! <word> <v1> ... <vdim>\n              (text)
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use crate::acquire::with_suffix;
use crate::error::{EmbeddingError, Result};
use crate::format::{open, truncated};
use crate::table::{TableBuilder, VectorTable};

/// Largest vector length accepted from a header
pub const MAX_DIM: usize = 1 << 16;

/// Upper bound on the f32s reserved up front from header counts
const MAX_PREALLOC_ELEMS: usize = 1 << 24;

/// Load a word2vec table from `path`
///
/// `limit` caps the number of rows read from the top of the file.
pub fn load_word2vec(path: &Path, binary: bool, limit: Option<usize>) -> Result<VectorTable> {
    let mut reader = open(path)?;
    let table = read_word2vec(&mut reader, binary, limit)
        .map_err(|e| match e {
            EmbeddingError::Load(msg) => {
                EmbeddingError::load(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

    log::info!(
        "Loaded {} vectors ({}d) from {}",
        table.len(),
        table.dim(),
        path.display()
    );
    Ok(table)
}

/// Read a word2vec table from any buffered reader
pub fn read_word2vec<R: BufRead>(
    reader: &mut R,
    binary: bool,
    limit: Option<usize>,
) -> Result<VectorTable> {
    let (count, dim) = read_header(reader)?;
    let rows = limit.map_or(count, |l| count.min(l));

    // The header is untrusted; grow past this as rows actually arrive.
    let mut builder = TableBuilder::with_capacity(dim, rows.min(MAX_PREALLOC_ELEMS / dim));
    let mut skipped = 0usize;

    if binary {
        let mut word_buf = Vec::new();
        let row_bytes = dim
            .checked_mul(std::mem::size_of::<f32>())
            .ok_or_else(|| EmbeddingError::load(format!("dimension {} too large", dim)))?;
        let mut vec_buf = vec![0u8; row_bytes];
        let mut vector = vec![0f32; dim];
        for _ in 0..rows {
            let word = read_binary_word(reader, &mut word_buf)?;
            reader.read_exact(&mut vec_buf).map_err(truncated)?;
            for (v, bytes) in vector.iter_mut().zip(vec_buf.chunks_exact(4)) {
                *v = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            }
            if !builder.push(word, &vector)? {
                skipped += 1;
            }
        }
    } else {
        let mut line = String::new();
        let mut vector = Vec::with_capacity(dim);
        for i in 0..rows {
            let line_no = i + 2;
            line.clear();
            if reader.read_line(&mut line).map_err(truncated)? == 0 {
                return Err(truncated(std::io::ErrorKind::UnexpectedEof.into()));
            }
            let word = parse_text_row(&line, dim, line_no, &mut vector)?;
            if !builder.push(word.to_string(), &vector)? {
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::debug!(
            "Ignored {} duplicate words in word2vec table, kept first occurrences",
            skipped
        );
    }

    builder.build()
}

/// Save `table` to `path` in word2vec format
///
/// Rows go to `<path>.part` first, which is renamed over `path` once
/// complete, so `path` never holds a partial table.
pub fn save_word2vec(table: &VectorTable, path: &Path, binary: bool) -> Result<()> {
    let part = with_suffix(path, ".part");
    if let Err(e) = write_file(table, &part, binary) {
        let _ = fs::remove_file(&part);
        return Err(e);
    }
    fs::rename(&part, path)?;

    log::info!(
        "Saved {} vectors ({}d, {}) to {}",
        table.len(),
        table.dim(),
        if binary { "binary" } else { "text" },
        path.display()
    );
    Ok(())
}

fn write_file(table: &VectorTable, path: &Path, binary: bool) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(1 << 20, file);
    write_word2vec(table, &mut writer, binary)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// Write `table` in word2vec format, rows in index order
pub fn write_word2vec<W: Write>(table: &VectorTable, writer: &mut W, binary: bool) -> Result<()> {
    writeln!(writer, "{} {}", table.len(), table.dim())?;

    for (i, word) in table.words().iter().enumerate() {
        let row = table.row(i);
        if binary {
            writer.write_all(word.as_bytes())?;
            writer.write_all(b" ")?;
            for v in row.iter() {
                writer.write_all(&v.to_le_bytes())?;
            }
            writer.write_all(b"\n")?;
        } else {
            write!(writer, "{}", word)?;
            for v in row.iter() {
                write!(writer, " {}", v)?;
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn read_header<R: BufRead>(reader: &mut R) -> Result<(usize, usize)> {
    let mut header = String::new();
    if reader.read_line(&mut header).map_err(truncated)? == 0 {
        return Err(EmbeddingError::load("empty file, missing word2vec header"));
    }

    let mut parts = header.split_whitespace();
    let count = parts.next().and_then(|p| p.parse::<usize>().ok());
    let dim = parts.next().and_then(|p| p.parse::<usize>().ok());
    match (count, dim, parts.next()) {
        (Some(count), Some(dim), None) if dim > 0 && dim <= MAX_DIM => Ok((count, dim)),
        (Some(_), Some(dim), None) if dim > MAX_DIM => Err(EmbeddingError::load(format!(
            "invalid word2vec header '{}': dimension {} exceeds {}",
            header.trim_end(),
            dim,
            MAX_DIM
        ))),
        _ => Err(EmbeddingError::load(format!(
            "invalid word2vec header '{}'",
            header.trim_end()
        ))),
    }
}

fn read_binary_word<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<String> {
    buf.clear();
    reader.read_until(b' ', buf).map_err(truncated)?;
    if buf.pop() != Some(b' ') {
        return Err(truncated(std::io::ErrorKind::UnexpectedEof.into()));
    }

    // The previous row's vector may be followed by a newline.
    let start = buf.iter().position(|&b| b != b'\n').unwrap_or(buf.len());
    std::str::from_utf8(&buf[start..])
        .map(str::to_string)
        .map_err(|e| EmbeddingError::load(format!("word is not valid UTF-8: {}", e)))
}

fn parse_text_row<'a>(
    line: &'a str,
    dim: usize,
    line_no: usize,
    vector: &mut Vec<f32>,
) -> Result<&'a str> {
    let invalid = || {
        EmbeddingError::load(format!(
            "invalid vector on line {} (is this really the text format?)",
            line_no
        ))
    };

    let mut parts = line.trim_end().split(' ');
    let word = parts.next().ok_or_else(invalid)?;

    vector.clear();
    for part in parts {
        vector.push(part.parse::<f32>().map_err(|_| invalid())?);
    }
    if vector.len() != dim {
        return Err(invalid());
    }
    Ok(word)
}
