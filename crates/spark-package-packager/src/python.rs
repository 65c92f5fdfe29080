//! Python module collection.
//!
//! Python code is placed at the root of the release jar so that it is
//! importable once the jar is on the `PYTHONPATH`. Collection follows the
//! usual rules for zipped modules:
//!
//! - top-level `.py` files of the `python/` directory go to the jar root;
//! - `requirements.txt` goes to the jar root;
//! - a subdirectory containing `__init__.py` is a package and keeps its
//!   name as a path prefix, recursing into nested packages;
//! - any other subdirectory contributes its top-level `.py` files to the jar root;
//! - subdirectories whose name contains `bin`, `doc`, `.git` or `lib` are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PackagerError, Result};

const PACKAGE_MARKER: &str = "__init__.py";
const REQUIREMENTS_FILE: &str = "requirements.txt";
const EXCLUDED_DIR_PARTS: [&str; 4] = ["bin", "doc", ".git", "lib"];

/// A file to be stored in the jar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonEntry {
    /// Entry name inside the jar, `/`-separated.
    pub archive_name: String,
    /// File on disk.
    pub source: PathBuf,
}

/// Collects the entries contributed by a package's `python/` directory.
///
/// Entries are returned in a stable order (directory listings are sorted).
///
/// # Errors
///
/// Returns an error if a directory cannot be listed.
pub fn collect_python_entries(python_dir: &Path) -> Result<Vec<PythonEntry>> {
    let mut entries = Vec::new();

    add_top_level_modules(python_dir, &mut entries)?;

    let requirements = python_dir.join(REQUIREMENTS_FILE);
    if requirements.is_file() {
        entries.push(PythonEntry {
            archive_name: REQUIREMENTS_FILE.to_string(),
            source: requirements,
        });
    }

    for dir in sorted_children(python_dir)?.into_iter().filter(|p| p.is_dir()) {
        let name = file_name(&dir);
        if EXCLUDED_DIR_PARTS.iter().any(|part| name.contains(part)) {
            debug!(dir = %dir.display(), "Skipping python directory");
            continue;
        }

        if is_package(&dir) {
            add_package(&dir, &name, &mut entries)?;
        } else {
            add_top_level_modules(&dir, &mut entries)?;
        }
    }

    Ok(entries)
}

fn add_top_level_modules(dir: &Path, entries: &mut Vec<PythonEntry>) -> Result<()> {
    for path in sorted_children(dir)? {
        if is_module(&path) {
            entries.push(PythonEntry {
                archive_name: file_name(&path),
                source: path,
            });
        }
    }
    Ok(())
}

fn add_package(dir: &Path, prefix: &str, entries: &mut Vec<PythonEntry>) -> Result<()> {
    for path in sorted_children(dir)? {
        let name = file_name(&path);
        if is_module(&path) {
            entries.push(PythonEntry {
                archive_name: format!("{prefix}/{name}"),
                source: path,
            });
        } else if path.is_dir() && is_package(&path) {
            add_package(&path, &format!("{prefix}/{name}"), entries)?;
        }
    }
    Ok(())
}

fn is_package(dir: &Path) -> bool {
    dir.join(PACKAGE_MARKER).is_file()
}

fn is_module(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "py")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| PackagerError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PackagerError::io(dir, e))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# python\n").unwrap();
    }

    fn names(entries: &[PythonEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.archive_name.as_str()).collect()
    }

    #[test]
    fn test_top_level_files_and_requirements() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "setup.py");
        touch(dir.path(), "tests.py");
        touch(dir.path(), "requirements.txt");
        touch(dir.path(), "MANIFEST.in");

        let entries = collect_python_entries(dir.path()).unwrap();
        assert_eq!(names(&entries), vec!["setup.py", "tests.py", "requirements.txt"]);
    }

    #[test]
    fn test_packages_keep_their_prefix() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "mypkg/__init__.py");
        touch(dir.path(), "mypkg/core.py");
        touch(dir.path(), "mypkg/sub/__init__.py");
        touch(dir.path(), "mypkg/sub/util.py");
        touch(dir.path(), "mypkg/data/not_a_package.py");

        let entries = collect_python_entries(dir.path()).unwrap();
        assert_eq!(
            names(&entries),
            vec![
                "mypkg/__init__.py",
                "mypkg/core.py",
                "mypkg/sub/__init__.py",
                "mypkg/sub/util.py",
            ]
        );
    }

    #[test]
    fn test_plain_directories_flatten_to_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "scripts/helper.py");
        touch(dir.path(), "scripts/nested/deep.py");

        let entries = collect_python_entries(dir.path()).unwrap();
        assert_eq!(names(&entries), vec!["helper.py"]);
    }

    #[test]
    fn test_excluded_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "bin/run.py");
        touch(dir.path(), "docs/conf.py");
        touch(dir.path(), "mylib/__init__.py");
        touch(dir.path(), ".git/hook.py");
        touch(dir.path(), "kept/__init__.py");

        let entries = collect_python_entries(dir.path()).unwrap();
        assert_eq!(names(&entries), vec!["kept/__init__.py"]);
    }
}
