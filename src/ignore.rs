//! Substitution exclusions for Forge templates.
//! A `.forgeignore` file at the template root lists glob patterns, one per line;
//! matching files are copied verbatim and never searched for tokens.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs, path::Path};

pub use crate::constants::IGNORE_FILE;

/// Reads the .forgeignore file and compiles it into a set of glob patterns.
///
/// # Arguments
/// * `ignore_path` - Path to the .forgeignore file
///
/// # Returns
/// * `Result<GlobSet>` - Set of compiled glob patterns for path matching
///
/// # Notes
/// - If the file doesn't exist, returns an empty GlobSet
/// - Blank lines and lines starting with `#` are skipped
/// - Invalid patterns result in an IgnoreError
///
/// # Example
/// ```ignore
/// # Contents of .forgeignore:
/// assets/**
/// *.png
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(ignore_path: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    if let Ok(contents) = fs::read_to_string(ignore_path.as_ref()) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(Glob::new(line).map_err(|e| {
                Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}"))
            })?);
        }
    } else {
        debug!("{IGNORE_FILE} does not exist");
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}")))
}

/// Loads the ignore patterns from `project_root` and removes the file.
pub fn load_ignore_patterns<P: AsRef<Path>>(project_root: P) -> Result<GlobSet> {
    let ignore_path = project_root.as_ref().join(IGNORE_FILE);
    let patterns = parse_ignore_file(&ignore_path)?;
    if ignore_path.is_file() {
        fs::remove_file(&ignore_path).map_err(|e| Error::filesystem(&ignore_path, e))?;
    }
    Ok(patterns)
}
