//! tidyext - sort a directory's files into per-extension subdirectories
//!
//! This library lists a directory once, classifies each file by its lowercased
//! extension and moves it into a subdirectory of that name. Subdirectories are
//! never entered or moved, files without an extension stay put, and per-file
//! failures are reported without stopping the pass.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod organizer;
pub mod output;

pub use classify::{Classification, classify};
pub use config::{CompiledFilters, Config, ConfigError};
pub use error::{FileWarning, RunError};
pub use fs::{DirectoryEntry, FileSystem, RealFileSystem};
pub use organizer::{EntryOutcome, Organizer, RunReport, SkipReason};

pub use cli::{CliArgs, run_cli};
