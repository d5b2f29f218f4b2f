//! The organizing pass.
//!
//! [`Organizer`] lists a directory once, then walks its entries in order and
//! moves every file with an extension into `<target>/<extension>/`. Only a
//! failed listing aborts the pass; every per-file problem becomes an
//! [`EntryOutcome::Failed`] and the loop moves on.

use crate::classify::{Classification, classify_os};
use crate::config::CompiledFilters;
use crate::error::{FileWarning, RunError};
use crate::fs::{FileSystem, RealFileSystem};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Why a file was left in place without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The name has no extension.
    NoExtension,
    /// A filter rule excluded the file.
    Excluded,
}

impl SkipReason {
    fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoExtension => "no_extension",
            SkipReason::Excluded => "excluded",
        }
    }
}

/// What happened to one non-directory entry.
#[derive(Debug)]
pub enum EntryOutcome {
    /// The file now lives in `dest_dir`.
    Moved { name: OsString, dest_dir: String },
    /// Dry run: the file would have been moved to `dest_dir`.
    Planned { name: OsString, dest_dir: String },
    /// The file was left in place on purpose.
    Skipped { name: OsString, reason: SkipReason },
    /// Creating the destination or moving the file failed; the file stayed put.
    Failed(FileWarning),
}

impl EntryOutcome {
    /// The original file name of the entry, bytes preserved.
    pub fn name(&self) -> &OsString {
        match self {
            EntryOutcome::Moved { name, .. }
            | EntryOutcome::Planned { name, .. }
            | EntryOutcome::Skipped { name, .. } => name,
            EntryOutcome::Failed(warning) => warning.name(),
        }
    }

    fn to_json(&self) -> Value {
        let name = self.name().to_string_lossy().to_string();
        match self {
            EntryOutcome::Moved { dest_dir, .. } => {
                json!({ "name": name, "status": "moved", "destination": dest_dir })
            }
            EntryOutcome::Planned { dest_dir, .. } => {
                json!({ "name": name, "status": "planned", "destination": dest_dir })
            }
            EntryOutcome::Skipped { reason, .. } => {
                json!({ "name": name, "status": "skipped", "reason": reason.as_str() })
            }
            EntryOutcome::Failed(warning) => json!({
                "name": name,
                "status": "failed",
                "kind": warning.kind(),
                "error": warning.to_string(),
            }),
        }
    }
}

/// Everything a successful pass did, in listing order.
#[derive(Debug)]
pub struct RunReport {
    pub target: PathBuf,
    pub dry_run: bool,
    pub outcomes: Vec<EntryOutcome>,
}

impl RunReport {
    /// Files actually moved. Always zero in a dry run.
    pub fn moved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Moved { .. }))
            .count()
    }

    /// Files a dry run would have moved. Always zero in a real run.
    pub fn planned_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Planned { .. }))
            .count()
    }

    /// Files left in place without an error (no extension or excluded).
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Skipped { .. }))
            .count()
    }

    /// Files whose directory creation or move failed.
    pub fn failed_count(&self) -> usize {
        self.warnings().count()
    }

    /// The per-file failures, in listing order.
    pub fn warnings(&self) -> impl Iterator<Item = &FileWarning> {
        self.outcomes.iter().filter_map(|o| match o {
            EntryOutcome::Failed(warning) => Some(warning),
            _ => None,
        })
    }

    /// Number of files per destination directory, sorted by directory name.
    ///
    /// Planned moves are counted too, so a dry run shows the layout it would
    /// produce.
    pub fn destination_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for outcome in &self.outcomes {
            if let EntryOutcome::Moved { dest_dir, .. } | EntryOutcome::Planned { dest_dir, .. } =
                outcome
            {
                *counts.entry(dest_dir.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Renders the report as a JSON document.
    ///
    /// Top-level keys are `target`, `dry_run`, the counts `moved`, `planned`,
    /// `skipped` and `failed`, and `outcomes`, one object per entry with a
    /// `status` of `moved`, `planned`, `skipped` or `failed`.
    pub fn to_json(&self) -> Value {
        json!({
            "target": self.target.to_string_lossy().to_string(),
            "dry_run": self.dry_run,
            "moved": self.moved_count(),
            "planned": self.planned_count(),
            "skipped": self.skipped_count(),
            "failed": self.failed_count(),
            "outcomes": self.outcomes.iter().map(EntryOutcome::to_json).collect::<Vec<_>>(),
        })
    }
}

/// Moves files into subdirectories named after their extensions.
///
/// # Examples
///
/// ```no_run
/// use tidyext::organizer::Organizer;
/// use std::path::Path;
///
/// let report = Organizer::new().run(Path::new("/path/to/downloads"))?;
/// println!("moved {} files", report.moved_count());
/// # Ok::<(), tidyext::RunError>(())
/// ```
#[derive(Debug)]
pub struct Organizer<F = RealFileSystem> {
    fs: F,
    filters: CompiledFilters,
    dry_run: bool,
}

impl Organizer<RealFileSystem> {
    /// Build an organizer over the real filesystem with default filters.
    pub fn new() -> Self {
        Self::with_fs(RealFileSystem)
    }
}

impl Default for Organizer<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> Organizer<F> {
    /// Build an organizer over a custom filesystem.
    pub fn with_fs(fs: F) -> Self {
        Self {
            fs,
            filters: CompiledFilters::default(),
            dry_run: false,
        }
    }

    /// Replace the filter rules applied before classification.
    pub fn filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = filters;
        self
    }

    /// In a dry run nothing is created or moved.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run one pass over `target`.
    pub fn run(&self, target: &Path) -> Result<RunReport, RunError> {
        self.run_with(target, |_| {})
    }

    /// Run one pass over `target`, calling `on_outcome` as each entry is settled.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::DirectoryRead`] if `target` cannot be listed. In that
    /// case nothing has been created or moved.
    pub fn run_with<C>(&self, target: &Path, mut on_outcome: C) -> Result<RunReport, RunError>
    where
        C: FnMut(&EntryOutcome),
    {
        let entries = self
            .fs
            .list(target)
            .map_err(|source| RunError::DirectoryRead {
                path: target.to_path_buf(),
                source,
            })?;
        debug!(target = %target.display(), entries = entries.len(), "listed directory");

        let mut outcomes = Vec::new();
        for entry in entries {
            if entry.is_dir {
                debug!(name = ?entry.name, "skipping subdirectory");
                continue;
            }

            let outcome = self.process_file(target, entry.name);
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        Ok(RunReport {
            target: target.to_path_buf(),
            dry_run: self.dry_run,
            outcomes,
        })
    }

    fn process_file(&self, target: &Path, name: OsString) -> EntryOutcome {
        if !self.filters.should_include(&name.to_string_lossy()) {
            debug!(name = ?name, "excluded by filters");
            return EntryOutcome::Skipped {
                name,
                reason: SkipReason::Excluded,
            };
        }

        let dest_dir = match classify_os(&name) {
            Classification::Extension(ext) => ext,
            Classification::Absent => {
                debug!(name = ?name, "no extension");
                return EntryOutcome::Skipped {
                    name,
                    reason: SkipReason::NoExtension,
                };
            }
        };

        if self.dry_run {
            return EntryOutcome::Planned { name, dest_dir };
        }

        let dir = target.join(&dest_dir);
        if let Err(source) = self.fs.ensure_dir(&dir) {
            warn!(dir = %dir.display(), error = %source, "cannot create destination directory");
            return EntryOutcome::Failed(FileWarning::DirectoryCreate { name, dir, source });
        }

        let from = target.join(&name);
        let to = dir.join(&name);
        if let Err(source) = self.fs.rename(&from, &to) {
            warn!(from = %from.display(), to = %to.display(), error = %source, "cannot move file");
            return EntryOutcome::Failed(FileWarning::Move {
                name,
                from,
                to,
                source,
            });
        }

        info!(name = ?name, dest_dir = %dest_dir, "moved");
        EntryOutcome::Moved { name, dest_dir }
    }
}
