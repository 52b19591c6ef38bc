//! Vector cache directory discovery
//!
//! Finds where downloaded vector sets live across installation scenarios.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the vector cache directory
pub const CACHE_ENV: &str = "WORDVEC_CACHE";

/// Resolve the vector cache directory with priority:
/// 1. Explicit path from configuration
/// 2. WORDVEC_CACHE environment variable
/// 3. User home directory (~/.wordvec/vector_cache)
/// 4. ./vector_cache
pub fn resolve_cache_dir(explicit: Option<&Path>) -> PathBuf {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    resolve_from(explicit, std::env::var_os(CACHE_ENV), home)
}

fn resolve_from(explicit: Option<&Path>, env: Option<OsString>, home: Option<OsString>) -> PathBuf {
    // Priority 1: explicit configuration
    if let Some(path) = explicit {
        log::debug!("Using configured vector cache: {}", path.display());
        return path.to_path_buf();
    }

    // Priority 2: WORDVEC_CACHE
    if let Some(path) = env.filter(|p| !p.is_empty()) {
        let path = PathBuf::from(path);
        log::debug!("Using {}: {}", CACHE_ENV, path.display());
        return path;
    }

    // Priority 3: user home directory
    if let Some(home) = home.filter(|h| !h.is_empty()) {
        return PathBuf::from(home).join(".wordvec").join("vector_cache");
    }

    log::warn!("Cannot determine home directory, using ./vector_cache");
    PathBuf::from("vector_cache")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins() {
        let dir = resolve_from(
            Some(Path::new("/explicit")),
            Some("/env".into()),
            Some("/home/u".into()),
        );
        assert_eq!(dir, PathBuf::from("/explicit"));
    }

    #[test]
    fn test_env_before_home() {
        let dir = resolve_from(None, Some("/env".into()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/env"));
    }

    #[test]
    fn test_home_default() {
        let dir = resolve_from(None, None, Some("/home/u".into()));
        assert!(dir.ends_with("vector_cache"));
        assert!(dir.to_string_lossy().contains(".wordvec"));
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let dir = resolve_from(None, Some("".into()), None);
        assert_eq!(dir, PathBuf::from("vector_cache"));
    }
}
