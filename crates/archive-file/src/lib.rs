//! archive-file: move a file into an archive directory.
//!
//! The archived name is `YYYYmmdd-HHMMSS-<stem>-<stat><.ext>`, so
//! `notes.txt` archived as `done` at noon on 2025-01-31 becomes
//! `20250131-120000-notes-done.txt`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

/// Timestamp prefix format.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Ways archiving can fail. Each maps to a distinct exit code.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The source does not exist.
    #[error("file not found: '{}'", .0.display())]
    SourceNotFound(PathBuf),

    /// The destination directory does not exist.
    #[error("directory not found: {}/", .0.display())]
    DestinationNotFound(PathBuf),

    /// The source path has no file name to archive under.
    #[error("no file name in '{}'", .0.display())]
    NoFileName(PathBuf),

    /// Moving the file failed.
    #[error("cannot move '{}' to '{}': {source}", from.display(), to.display())]
    Rename {
        /// Source path.
        from: PathBuf,
        /// Intended archive path.
        to: PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
}

impl ArchiveError {
    /// Process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::SourceNotFound(_) => 1,
            Self::DestinationNotFound(_) => 2,
            Self::NoFileName(_) | Self::Rename { .. } => 3,
        }
    }
}

/// Archive file name for `src` tagged `stat` at `now`.
///
/// Only the last extension is kept apart: `a.tar.gz` has stem `a.tar`.
/// Returns `None` if `src` has no file name.
#[must_use]
pub fn archive_name(src: &Path, stat: &str, now: NaiveDateTime) -> Option<String> {
    let stem = src.file_stem()?.to_string_lossy();
    let timestamp = now.format(TIMESTAMP_FORMAT);

    let name = match src.extension() {
        Some(ext) => format!("{timestamp}-{stem}-{stat}.{}", ext.to_string_lossy()),
        None => format!("{timestamp}-{stem}-{stat}"),
    };
    Some(name)
}

/// Move `src` into `dstdir` under its archive name and return the new path.
pub fn archive(src: &Path, dstdir: &Path, stat: &str, now: NaiveDateTime) -> Result<PathBuf, ArchiveError> {
    if !src.exists() {
        return Err(ArchiveError::SourceNotFound(src.to_path_buf()));
    }
    if !dstdir.exists() {
        return Err(ArchiveError::DestinationNotFound(dstdir.to_path_buf()));
    }

    let name = archive_name(src, stat, now).ok_or_else(|| ArchiveError::NoFileName(src.to_path_buf()))?;
    tracing::debug!(name = %name, "archive name");

    let new_path = dstdir.join(name);
    tracing::debug!(new_path = %new_path.display(), "moving");

    fs::rename(src, &new_path).map_err(|source| ArchiveError::Rename {
        from: src.to_path_buf(),
        to: new_path.clone(),
        source,
    })?;

    Ok(new_path)
}
