/// Integration tests for tidyext
///
/// These tests run the organizer against real temporary directories.
///
/// Test categories:
/// 1. Basic organization workflows
/// 2. Classification edge cases
/// 3. Failure isolation
/// 4. Dry-run mode and filtering
use clap::Parser;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tidyext::{
    CliArgs, Config, EntryOutcome, FileWarning, Organizer, RunError, SkipReason, run_cli,
};

// ============================================================================
// Test Utilities
// ============================================================================

/// A temporary directory with helpers for building and checking file layouts.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn create_text_file(&self, name: &str, content: &str) {
        let file_path = self.path().join(name);
        let mut file = File::create(&file_path).expect("Failed to create file");
        file.write_all(content.as_bytes())
            .expect("Failed to write file content");
    }

    fn create_files(&self, names: &[&str]) {
        for name in names {
            self.create_text_file(name, name);
        }
    }

    fn create_subdir(&self, name: &str) {
        fs::create_dir(self.path().join(name)).expect("Failed to create subdirectory");
    }

    fn assert_dir_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_dir(), "Directory should exist: {}", path.display());
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_file(), "File should exist: {}", path.display());
    }

    fn assert_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "Path should not exist: {}", path.display());
    }

    /// Names of the top-level subdirectories, sorted.
    fn dirs(&self) -> Vec<String> {
        let mut dirs: Vec<String> = fs::read_dir(self.path())
            .expect("Failed to read directory")
            .flatten()
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        dirs.sort();
        dirs
    }

    /// Every file below the fixture root, relative and sorted.
    fn list_files_recursive(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        Self::walk_dir(self.path(), self.path(), &mut files);
        files.sort();
        files
    }

    fn walk_dir(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) {
        if let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    files.push(path.strip_prefix(root).unwrap().to_path_buf());
                } else if path.is_dir() {
                    Self::walk_dir(root, &path, files);
                }
            }
        }
    }
}

fn organize(fixture: &TestFixture) -> tidyext::RunReport {
    Organizer::new()
        .run(fixture.path())
        .expect("Organizing should succeed")
}

// ============================================================================
// Test Suite 1: Basic Organization
// ============================================================================

#[test]
fn test_organize_empty_directory() {
    let fixture = TestFixture::new();

    let report = organize(&fixture);

    assert!(report.outcomes.is_empty());
    assert!(fixture.dirs().is_empty(), "Should have no subdirectories");
}

#[test]
fn test_end_to_end_scenario() {
    let fixture = TestFixture::new();
    fixture.create_files(&["report.TXT", "photo.jpg", "Dockerfile"]);
    fixture.create_subdir("archive");

    let report = organize(&fixture);

    fixture.assert_file_exists("txt/report.TXT");
    fixture.assert_file_exists("jpg/photo.jpg");
    fixture.assert_file_exists("Dockerfile");
    fixture.assert_dir_exists("archive");
    fixture.assert_not_exists("report.TXT");
    fixture.assert_not_exists("photo.jpg");
    assert_eq!(fixture.dirs(), vec!["archive", "jpg", "txt"]);

    assert_eq!(report.moved_count(), 2);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.failed_count(), 0);
}

#[test]
fn test_subdirectories_are_not_entered_or_moved() {
    let fixture = TestFixture::new();
    fixture.create_subdir("backup.zip");
    fixture.create_subdir("nested");
    fixture.create_text_file("nested/inner.txt", "inner");

    let report = organize(&fixture);

    assert!(report.outcomes.is_empty());
    fixture.assert_dir_exists("backup.zip");
    fixture.assert_file_exists("nested/inner.txt");
    fixture.assert_not_exists("zip");
    fixture.assert_not_exists("txt");
}

#[test]
fn test_same_extension_shares_one_directory() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.md", "B.MD", "c.Md"]);

    let report = organize(&fixture);

    assert_eq!(fixture.dirs(), vec!["md"]);
    assert_eq!(report.destination_counts().get("md"), Some(&3));
    assert_eq!(
        fixture.list_files_recursive(),
        vec![
            PathBuf::from("md/B.MD"),
            PathBuf::from("md/a.md"),
            PathBuf::from("md/c.Md"),
        ]
    );
}

#[test]
fn test_organize_preserves_file_content() {
    let fixture = TestFixture::new();
    fixture.create_text_file("notes.txt", "keep me intact");

    organize(&fixture);

    let content = fs::read_to_string(fixture.path().join("txt/notes.txt")).unwrap();
    assert_eq!(content, "keep me intact");
}

#[test]
fn test_existing_destination_directory_is_reused() {
    let fixture = TestFixture::new();
    fixture.create_subdir("pdf");
    fixture.create_text_file("pdf/old.pdf", "old");
    fixture.create_text_file("new.pdf", "new");

    let report = organize(&fixture);

    assert_eq!(report.failed_count(), 0);
    fixture.assert_file_exists("pdf/old.pdf");
    fixture.assert_file_exists("pdf/new.pdf");
}

#[test]
fn test_second_run_is_a_no_op() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "b.jpg", "README"]);

    let first = organize(&fixture);
    assert_eq!(first.moved_count(), 2);
    let layout = fixture.list_files_recursive();

    let second = organize(&fixture);

    assert_eq!(second.moved_count(), 0);
    assert_eq!(second.failed_count(), 0);
    assert_eq!(second.skipped_count(), 1);
    assert_eq!(fixture.list_files_recursive(), layout);
}

#[test]
fn test_organize_then_add_files_then_organize_again() {
    let fixture = TestFixture::new();
    fixture.create_files(&["first.txt"]);
    organize(&fixture);

    fixture.create_files(&["second.txt", "third.csv"]);
    let report = organize(&fixture);

    assert_eq!(report.moved_count(), 2);
    fixture.assert_file_exists("txt/first.txt");
    fixture.assert_file_exists("txt/second.txt");
    fixture.assert_file_exists("csv/third.csv");
}

// ============================================================================
// Test Suite 2: Classification Edge Cases
// ============================================================================

#[test]
fn test_files_with_multiple_dots_use_last_extension() {
    let fixture = TestFixture::new();
    fixture.create_files(&["backup.2024.tar.GZ"]);

    organize(&fixture);

    fixture.assert_file_exists("gz/backup.2024.tar.GZ");
}

#[test]
fn test_files_without_extension_stay_in_place() {
    let fixture = TestFixture::new();
    fixture.create_files(&["Makefile", "LICENSE", "odd."]);

    let report = organize(&fixture);

    assert_eq!(report.moved_count(), 0);
    assert!(fixture.dirs().is_empty());
    assert!(report.outcomes.iter().all(|o| matches!(
        o,
        EntryOutcome::Skipped {
            reason: SkipReason::NoExtension,
            ..
        }
    )));
}

#[test]
fn test_dotfiles_are_classified_by_suffix() {
    let fixture = TestFixture::new();
    fixture.create_files(&[".bashrc"]);

    organize(&fixture);

    fixture.assert_file_exists("bashrc/.bashrc");
}

#[test]
fn test_special_characters_in_filename() {
    let fixture = TestFixture::new();
    fixture.create_files(&["my file (1).PDF", "résumé.Docx"]);

    organize(&fixture);

    fixture.assert_file_exists("pdf/my file (1).PDF");
    fixture.assert_file_exists("docx/résumé.Docx");
}

/// Non-UTF-8 names are classified lossily but moved under their original bytes.
#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_name_keeps_original_bytes() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let fixture = TestFixture::new();
    let name = OsString::from_vec(b"bad\xff.TXT".to_vec());
    fs::write(fixture.path().join(&name), "raw").expect("Failed to write file");

    let report = organize(&fixture);

    assert_eq!(report.moved_count(), 1);
    assert!(matches!(
        &report.outcomes[0],
        EntryOutcome::Moved { name: moved, dest_dir } if moved == &name && dest_dir == "txt"
    ));
    assert!(fixture.path().join("txt").join(&name).is_file());
    assert!(!fixture.path().join(&name).exists());
    assert_eq!(fixture.dirs(), vec!["txt"]);
}

// ============================================================================
// Test Suite 3: Failure Isolation
// ============================================================================

#[test]
fn test_missing_directory_is_fatal() {
    let fixture = TestFixture::new();
    let missing = fixture.path().join("does-not-exist");

    let result = Organizer::new().run(&missing);

    assert!(matches!(result, Err(RunError::DirectoryRead { .. })));
    assert!(fixture.dirs().is_empty());
    fixture.assert_not_exists("does-not-exist");
}

#[test]
fn test_regular_file_as_target_is_fatal() {
    let fixture = TestFixture::new();
    fixture.create_text_file("file.txt", "x");

    let result = Organizer::new().run(&fixture.path().join("file.txt"));

    assert!(matches!(result, Err(RunError::DirectoryRead { .. })));
    fixture.assert_file_exists("file.txt");
}

#[test]
fn test_occupied_destination_does_not_stop_the_run() {
    let fixture = TestFixture::new();
    fixture.create_subdir("txt");
    fixture.create_text_file("txt/a.txt", "already here");
    fixture.create_text_file("a.txt", "newcomer");
    fixture.create_files(&["b.txt", "c.jpg"]);

    let report = organize(&fixture);

    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.moved_count(), 2);
    assert!(matches!(
        report.warnings().next(),
        Some(FileWarning::Move { .. })
    ));

    fixture.assert_file_exists("a.txt");
    assert_eq!(
        fs::read_to_string(fixture.path().join("txt/a.txt")).unwrap(),
        "already here"
    );
    fixture.assert_file_exists("txt/b.txt");
    fixture.assert_file_exists("jpg/c.jpg");
}

#[test]
fn test_destination_blocked_by_file_is_isolated() {
    let fixture = TestFixture::new();
    // "pdf" has no extension, so it stays and blocks the directory name.
    fixture.create_text_file("pdf", "not a directory");
    fixture.create_files(&["doc.pdf", "song.mp3"]);

    let report = organize(&fixture);

    assert_eq!(report.failed_count(), 1);
    assert!(matches!(
        report.warnings().next(),
        Some(FileWarning::DirectoryCreate { .. })
    ));
    fixture.assert_file_exists("doc.pdf");
    fixture.assert_file_exists("pdf");
    fixture.assert_file_exists("mp3/song.mp3");
}

// ============================================================================
// Test Suite 4: Dry Run and Filtering
// ============================================================================

#[test]
fn test_dry_run_doesnt_move_files() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "b.jpg"]);

    let report = Organizer::new()
        .dry_run(true)
        .run(fixture.path())
        .expect("Dry run should succeed");

    assert_eq!(report.planned_count(), 2);
    assert_eq!(report.moved_count(), 0);
    assert!(fixture.dirs().is_empty());
    fixture.assert_file_exists("a.txt");
    fixture.assert_file_exists("b.jpg");
}

#[test]
fn test_dry_run_vs_actual_organization() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "b.jpg", "c"]);

    let planned = Organizer::new().dry_run(true).run(fixture.path()).unwrap();
    let actual = organize(&fixture);

    assert_eq!(planned.destination_counts(), actual.destination_counts());
}

#[test]
fn test_organize_with_exclude_rules() {
    let fixture = TestFixture::new();
    fixture.create_files(&["movie.part", "movie.mkv", "Thumbs.db", "scratch.tmp"]);

    let filters = Config::from_toml(
        r#"
        [filters.exclude]
        extensions = ["part"]
        filenames = ["Thumbs.db"]
        patterns = ["*.tmp"]
        "#,
    )
    .unwrap()
    .compile()
    .unwrap();

    let report = Organizer::new().filters(filters).run(fixture.path()).unwrap();

    assert_eq!(report.moved_count(), 1);
    assert_eq!(report.skipped_count(), 3);
    fixture.assert_file_exists("mkv/movie.mkv");
    fixture.assert_file_exists("movie.part");
    fixture.assert_file_exists("Thumbs.db");
    fixture.assert_file_exists("scratch.tmp");
}

#[test]
fn test_run_cli_with_config_file() {
    let fixture = TestFixture::new();
    fixture.create_files(&[".hidden.txt", "shown.txt"]);

    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("tidyext.toml");
    fs::write(&config_path, "[filters]\nenable_hidden_files = false\n").unwrap();

    let args = CliArgs::parse_from([
        OsStr::new("tidyext"),
        fixture.path().as_os_str(),
        OsStr::new("--config"),
        config_path.as_os_str(),
    ]);
    let report = run_cli(&args).expect("CLI run should succeed");

    assert_eq!(report.moved_count(), 1);
    fixture.assert_file_exists(".hidden.txt");
    fixture.assert_file_exists("txt/shown.txt");
}

#[test]
fn test_run_cli_reports_missing_directory() {
    let fixture = TestFixture::new();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("tidyext.toml");
    fs::write(&config_path, "").unwrap();

    let missing = fixture.path().join("missing");
    let args = CliArgs::parse_from([
        OsStr::new("tidyext"),
        missing.as_os_str(),
        OsStr::new("--config"),
        config_path.as_os_str(),
    ]);

    let err = run_cli(&args).unwrap_err();
    assert!(err.to_string().contains("Failed to organize directory"));
}
