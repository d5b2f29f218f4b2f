//! Extension classification for directory entries.
//!
//! A file's destination directory is derived from nothing but its name: the
//! text after the last `.`, lowercased.
//!
//! # Examples
//!
//! ```
//! use tidyext::classify::{Classification, classify};
//!
//! assert_eq!(classify("report.TXT"), Classification::Extension("txt".to_string()));
//! assert_eq!(classify("Dockerfile"), Classification::Absent);
//! ```

use std::ffi::OsStr;

/// The result of classifying a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Lowercased extension without the leading separator.
    Extension(String),
    /// The name carries no usable extension.
    Absent,
}

impl Classification {
    /// Returns the destination directory name, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidyext::classify::classify;
    ///
    /// assert_eq!(classify("archive.tar.GZ").dir_name(), Some("gz"));
    /// assert_eq!(classify("Makefile").dir_name(), None);
    /// ```
    pub fn dir_name(&self) -> Option<&str> {
        match self {
            Classification::Extension(ext) => Some(ext),
            Classification::Absent => None,
        }
    }
}

/// Classifies a file name by its last `.`-delimited suffix.
///
/// A leading-dot name such as `.bashrc` classifies as `bashrc`. A name ending
/// in `.` has an empty suffix and is treated as having no extension.
pub fn classify(name: &str) -> Classification {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Classification::Extension(ext.to_lowercase()),
        _ => Classification::Absent,
    }
}

/// Classifies an OS file name, rendering it lossily when it is not UTF-8.
pub fn classify_os(name: &OsStr) -> Classification {
    classify(&name.to_string_lossy())
}
