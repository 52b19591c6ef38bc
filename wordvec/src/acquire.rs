//! Acquisition of remote vector archives
//!
//! Makes sure a vector file exists locally before a backend reads it,
//! downloading and unzipping the published archive when needed.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{EmbeddingError, Result};

/// `path` with `suffix` appended to its file name (`a.vec` + `.bin` = `a.vec.bin`)
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Ensure `target` exists, fetching it from the zip archive at `url`
///
/// The archive is downloaded to `zip_path` only if that file is not already
/// present, then extracted next to `target`.
pub fn ensure_vector_file(target: &Path, url: &str, zip_path: &Path) -> Result<()> {
    if target.exists() {
        log::debug!("{} already exists", target.display());
        return Ok(());
    }

    if !zip_path.exists() {
        log::info!("{} not found, downloading from {}", zip_path.display(), url);
        download(url, zip_path)?;
    }

    let dir = parent_dir(target);
    log::info!("Unzipping {} to {}", zip_path.display(), dir.display());
    unzip(zip_path, dir)?;

    if !target.exists() {
        return Err(EmbeddingError::download(format!(
            "{} does not contain {}",
            zip_path.display(),
            target.display()
        )));
    }

    log::info!("{} is ready for use", target.display());
    Ok(())
}

/// Stream `url` into `dest`
///
/// Bytes go to `<dest>.part` first and are renamed on success, so `dest`
/// never holds a truncated archive.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    let partial = with_suffix(dest, ".part");

    // Clean up partial downloads from a previous interrupted attempt
    if partial.exists() {
        log::warn!("Found partial download {}, removing", partial.display());
        fs::remove_file(&partial)?;
    }
    fs::create_dir_all(parent_dir(dest))?;

    let response = ureq::get(url)
        .call()
        .map_err(|e| EmbeddingError::download(format!("Failed to download {url}: {e}")))?;

    let written = File::create(&partial)
        .and_then(|mut file| {
            let n = io::copy(&mut response.into_reader(), &mut file)?;
            file.sync_all()?;
            Ok(n)
        })
        .map_err(|e| {
            let _ = fs::remove_file(&partial);
            EmbeddingError::download(format!("Failed to write {}: {e}", partial.display()))
        })?;

    fs::rename(&partial, dest)?;

    let size_mb = written as f64 / (1024.0 * 1024.0);
    log::info!("Download completed: {} ({size_mb:.1} MB)", dest.display());
    Ok(())
}

/// Extract every entry of `zip_path` into `dir`
pub fn unzip(zip_path: &Path, dir: &Path) -> Result<()> {
    let file = File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| EmbeddingError::download(format!("Failed to open {}: {e}", zip_path.display())))?;

    fs::create_dir_all(dir)?;
    archive.extract(dir).map_err(|e| {
        EmbeddingError::download(format!("Failed to unzip {}: {e}", zip_path.display()))
    })?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}
