//! Template archive extraction.
//! Entries are unpacked into a staging directory created next to the
//! destination and the staging directory is renamed into place once every
//! entry has been written, so the destination never holds a partial tree.

use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use zip::ZipArchive;

use crate::constants::STAGING_PREFIX;
use crate::error::{Error, Result};

fn open_archive(archive_path: &Path) -> Result<ZipArchive<File>> {
    if !archive_path.exists() {
        return Err(Error::InputNotFound { path: archive_path.display().to_string() });
    }

    let file = File::open(archive_path).map_err(|e| Error::filesystem(archive_path, e))?;
    ZipArchive::new(file).map_err(|source| Error::ArchiveCorrupt {
        path: archive_path.display().to_string(),
        source,
    })
}

/// Writes every entry of `archive` below `staging_dir`.
fn unpack(archive: &mut ZipArchive<File>, archive_path: &Path, staging_dir: &Path) -> Result<()> {
    let corrupt = |source: zip::result::ZipError| Error::ArchiveCorrupt {
        path: archive_path.display().to_string(),
        source,
    };

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(corrupt)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(corrupt(zip::result::ZipError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("entry '{}' escapes the archive root", entry.name()),
            ))));
        };
        let target = staging_dir.join(relative);

        if entry.is_dir() {
            debug!("Creating directory: {}", target.display());
            fs::create_dir_all(&target).map_err(|e| Error::filesystem(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::filesystem(parent, e))?;
        }
        // Read errors (bad CRC, broken deflate stream) belong to the archive,
        // write errors to the staging directory.
        let mut content = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut content)
            .map_err(|e| corrupt(zip::result::ZipError::Io(e)))?;
        debug!("Creating file: {}", target.display());
        fs::write(&target, content).map_err(|e| Error::filesystem(&target, e))?;
    }

    Ok(())
}

/// Extracts the zip archive at `archive_path` into `destination`.
///
/// # Arguments
/// * `archive_path` - Template archive to unpack
/// * `destination` - Directory to create; its parent must exist
///
/// # Errors
/// * `Error::InputNotFound` if the archive does not exist
/// * `Error::ArchiveCorrupt` if the archive cannot be parsed or an entry
///   cannot be read or points outside the archive root
/// * `Error::Filesystem` if a directory or file cannot be written, or the
///   staging directory cannot be renamed into place
pub fn extract_template<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    destination: Q,
) -> Result<()> {
    let archive_path = archive_path.as_ref();
    let destination = destination.as_ref();

    let mut archive = open_archive(archive_path)?;

    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // Dropping the guard removes the staging directory if anything below fails.
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)
        .map_err(|e| Error::filesystem(parent, e))?;

    info!("Extracting '{}' ({} entries)", archive_path.display(), archive.len());
    unpack(&mut archive, archive_path, staging.path())?;

    debug!("Renaming '{}' to '{}'", staging.path().display(), destination.display());
    fs::rename(staging.path(), destination).map_err(|e| Error::filesystem(destination, e))?;
    // The staging path now names the destination; the guard must not remove it.
    let _ = staging.keep();

    Ok(())
}
