use std::io::{self, Write};
use std::path::PathBuf;

use itertools::Itertools;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::checker::{FileReport, Linter};
use crate::errors::LintResult;

pub const RECIPE_FILE_NAME: &str = "conanfile.py";

const TEST_PACKAGE_DIRS: &[&str] = &["test_package", "test_v1_package"];

fn is_test_package_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| TEST_PACKAGE_DIRS.contains(&name))
            .unwrap_or(false)
}

fn is_recipe_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && entry.file_name() == RECIPE_FILE_NAME
}

/// Expand `paths` into recipe files. Files are taken as given; directories are searched for
/// `conanfile.py`, in file name order. Test package directories below a searched directory are
/// skipped unless `include_test_packages` is set.
pub fn collect_recipe_files(
    paths: &[PathBuf],
    include_test_packages: bool,
) -> LintResult<Vec<PathBuf>> {
    let mut files = vec![];

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0 || include_test_packages || !is_test_package_dir(entry)
            });

        for entry in walker {
            let entry = entry?;
            if is_recipe_file(&entry) {
                files.push(entry.into_path());
            }
        }
    }

    debug!(count = files.len(), "collected recipe files");
    Ok(files.into_iter().unique().collect())
}

/// Write one line per diagnostic. Returns how many were written.
pub fn write_diagnostics<W: Write>(out: &mut W, report: &FileReport) -> io::Result<usize> {
    for diagnostic in &report.diagnostics {
        writeln!(out, "{diagnostic}")?;
    }

    Ok(report.diagnostics.len())
}

/// Human readable list of every registered message, grouped by checker.
pub fn describe_messages(linter: &Linter) -> String {
    linter
        .checkers()
        .map(|checker| {
            let messages = checker
                .messages()
                .iter()
                .map(|m| format!(":{} ({}): *{}*\n  {}", m.symbol, m.msgid, m.msg, m.description))
                .join("\n");
            format!("{}\n{}\n", checker.name(), messages)
        })
        .join("\n")
}

/// Lint every file, stopping at the first one that cannot be read.
pub fn lint_files(linter: &Linter, files: &[PathBuf]) -> LintResult<Vec<FileReport>> {
    files
        .iter()
        .map(|file| linter.lint_path(file))
        .collect()
}
