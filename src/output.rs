//! Output formatting and styling module.
//!
//! All human-readable CLI output goes through [`OutputFormatter`], so the
//! progress lines, warnings and the summary table share one look. Coloring
//! follows `colored`'s defaults, which honour `NO_COLOR` and non-terminals.

use crate::organizer::{EntryOutcome, RunReport, SkipReason};
use colored::*;
use std::collections::BTreeMap;
use std::path::Path;

const SEPARATOR: &str = "--------------------";

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tidyext::output::OutputFormatter;
    /// OutputFormatter::success("Moved report.TXT -> txt/");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message to stderr in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tidyext::output::OutputFormatter;
    /// OutputFormatter::error("error moving file a.txt to txt/a.txt: permission denied");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a yellow message prefixed with `[DRY RUN]`.
    ///
    /// # Arguments
    ///
    /// * `message` - The dry-run message
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints the banner shown before the directory is listed.
    pub fn scan_header(target: &Path) {
        Self::info(&format!("Scanning directory: {}", target.display()));
        Self::plain(SEPARATOR);
        Self::plain("Organizing files...");
    }

    /// Prints the progress line for one entry.
    pub fn outcome(outcome: &EntryOutcome) {
        let name = outcome.name().to_string_lossy();
        match outcome {
            EntryOutcome::Moved { dest_dir, .. } => {
                Self::success(&format!("Moved {} -> {}/", name, dest_dir));
            }
            EntryOutcome::Planned { dest_dir, .. } => {
                Self::dry_run_notice(&format!("Would move {} -> {}/", name, dest_dir));
            }
            EntryOutcome::Skipped {
                reason: SkipReason::NoExtension,
                ..
            } => {
                Self::plain(&format!(" - Skipping file with no extension: {}", name));
            }
            EntryOutcome::Skipped {
                reason: SkipReason::Excluded,
                ..
            } => {
                Self::plain(&format!(" - Skipping excluded file: {}", name));
            }
            EntryOutcome::Failed(warning) => Self::error(&warning.to_string()),
        }
    }

    /// Prints the completion signal followed by the summary table.
    pub fn completion(report: &RunReport) {
        Self::plain(SEPARATOR);
        Self::success("Organization complete.");

        if report.dry_run {
            Self::dry_run_notice("No files were modified.");
        }

        let counts = report.destination_counts();
        if !counts.is_empty() {
            Self::summary_table(&counts, report.moved_count() + report.planned_count());
        }

        if report.skipped_count() > 0 {
            Self::plain(&format!("Skipped: {}", report.skipped_count()));
        }
        if report.failed_count() > 0 {
            eprintln!(
                "{}",
                format!(
                    "{} file(s) could not be organized. Please review errors above.",
                    report.failed_count()
                )
                .yellow()
            );
        }
    }

    /// Prints a summary table of files per destination directory.
    ///
    /// # Arguments
    ///
    /// * `counts` - Files per destination directory name
    /// * `total_files` - Total number of files moved or planned
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::collections::BTreeMap;
    /// use tidyext::output::OutputFormatter;
    ///
    /// let mut counts = BTreeMap::new();
    /// counts.insert("jpg".to_string(), 8);
    /// counts.insert("pdf".to_string(), 15);
    /// OutputFormatter::summary_table(&counts, 23);
    /// ```
    pub fn summary_table(counts: &BTreeMap<String, usize>, total_files: usize) {
        println!("\n{}", "SUMMARY".bold());

        let width = counts
            .keys()
            .map(|name| name.chars().count() + 1)
            .max()
            .unwrap_or(0)
            .max("Directory".len());

        println!(
            "{:<width$} | {}",
            "Directory".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (dir, count) in counts {
            println!(
                "{:<width$} | {} {}",
                format!("{}/", dir),
                count.to_string().green(),
                plural(*count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            plural(total_files),
            width = width
        );
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
