//! Filesystem collaborator used by the organizer.
//!
//! The organizer only needs three primitives: listing a directory's immediate
//! entries, ensuring a directory exists, and renaming a file. Keeping them
//! behind a trait lets tests inject failures without touching permissions.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

/// One item of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// The entry's file name (no parent components).
    pub name: OsString,
    /// Whether the entry is itself a directory. Symlinks are not followed.
    pub is_dir: bool,
}

/// Minimal, synchronous filesystem abstraction.
pub trait FileSystem {
    /// Lists the immediate entries of `path`, sorted by name.
    fn list(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>>;

    /// Creates `path` and any missing parents. An existing directory is not an error.
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Moves `from` to `to` with a single rename.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Real filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn list(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        let mut entries = fs::read_dir(path)?
            .map(|entry| {
                let entry = entry?;
                Ok(DirectoryEntry {
                    name: entry.file_name(),
                    is_dir: entry.file_type()?.is_dir(),
                })
            })
            .collect::<io::Result<Vec<_>>>()?;

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    /// Refuses to replace an existing destination, so a name collision is
    /// reported instead of silently overwriting the earlier file.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if fs::symlink_metadata(to).is_ok() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "destination already exists",
            ));
        }
        fs::rename(from, to)
    }
}
