//! Best-effort removal of a partially created project.

use log::{info, warn};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Deletes `project_root` and everything below it.
///
/// A root that is already gone counts as rolled back.
///
/// # Errors
/// * `Error::Filesystem` if the directory exists but cannot be removed
pub fn rollback<P: AsRef<Path>>(project_root: P) -> Result<()> {
    let project_root = project_root.as_ref();
    if !project_root.exists() {
        return Ok(());
    }

    info!("Rolling back '{}'", project_root.display());
    fs::remove_dir_all(project_root).map_err(|e| Error::filesystem(project_root, e))
}

/// Rolls back without surfacing a failure; a leftover directory is logged.
///
/// Returns whether the project root is gone afterwards.
pub fn rollback_quietly<P: AsRef<Path>>(project_root: P) -> bool {
    match rollback(&project_root) {
        Ok(()) => true,
        Err(e) => {
            warn!("Rollback incomplete, remnants may persist: {e}");
            false
        }
    }
}
