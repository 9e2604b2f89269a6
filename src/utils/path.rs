//! Path derivation for outputs and side-car files

use std::path::{Path, PathBuf};

/// Extension stripped from the input before suffixes are appended
pub const CONTAINER_EXTENSION: &str = ".mkv";

/// Suffix of the final remuxed container
pub const OUTPUT_SUFFIX: &str = "_enhanced.mkv";

/// Suffix of each per-track enhanced audio file
pub const SIDECAR_SUFFIX: &str = "_enhanced.opus";

/// Path utilities for pipeline artifacts
pub struct PathUtils;

impl PathUtils {
    /// Input path with a trailing `.mkv` removed, directory kept.
    ///
    /// Only the exact lowercase extension is stripped; any other input keeps
    /// its full name and the suffixes are appended after it.
    pub fn container_stem(input: &Path) -> String {
        let full = input.to_string_lossy();
        let full: &str = &full;
        full.strip_suffix(CONTAINER_EXTENSION)
            .unwrap_or(full)
            .to_string()
    }

    /// Default output path, e.g. `movie.mkv` -> `movie_enhanced.mkv`
    pub fn output_path(input: &Path) -> PathBuf {
        PathBuf::from(format!("{}{}", Self::container_stem(input), OUTPUT_SUFFIX))
    }

    /// Side-car path for one track, e.g. `movie_track1_enhanced.opus`
    pub fn sidecar_path(input: &Path, index: &str) -> PathBuf {
        PathBuf::from(format!(
            "{}_track{}{}",
            Self::container_stem(input),
            index,
            SIDECAR_SUFFIX
        ))
    }

    /// Lossy string form for command arguments
    pub fn to_arg(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }
}
