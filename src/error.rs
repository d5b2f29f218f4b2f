//! Error taxonomy for an organizing run.
//!
//! `RunError` ends the run before anything is touched. `FileWarning` belongs
//! to a single entry and never stops the loop.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure of a whole run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The target directory could not be listed.
    #[error("error reading directory {}: {source}", path.display())]
    DirectoryRead { path: PathBuf, source: io::Error },
}

/// Non-fatal failure confined to one file.
#[derive(Debug, Error)]
pub enum FileWarning {
    /// The destination directory for the file's extension could not be created.
    #[error(
        "error creating directory {}: {source}. Skipping file {}",
        dir.display(),
        name.to_string_lossy()
    )]
    DirectoryCreate {
        name: OsString,
        dir: PathBuf,
        source: io::Error,
    },

    /// The file could not be moved into its destination directory.
    #[error("error moving file {} to {}: {source}", from.display(), to.display())]
    Move {
        name: OsString,
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

impl FileWarning {
    /// The name of the file this warning is about.
    pub fn name(&self) -> &OsString {
        match self {
            FileWarning::DirectoryCreate { name, .. } | FileWarning::Move { name, .. } => name,
        }
    }

    /// Short machine-readable kind, used by the JSON report.
    pub fn kind(&self) -> &'static str {
        match self {
            FileWarning::DirectoryCreate { .. } => "directory_create",
            FileWarning::Move { .. } => "move",
        }
    }
}
