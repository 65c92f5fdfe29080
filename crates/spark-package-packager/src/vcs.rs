//! Git commit resolution for releases.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{PackagerError, Result};

/// Resolves `HEAD` of the git checkout at `folder` to a commit hash.
///
/// # Errors
///
/// Returns [`PackagerError::GitCommit`] if git cannot be run or prints no
/// commit (the folder is not a repository checkout).
pub fn resolve_commit(folder: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(folder)
        .output()
        .map_err(|e| PackagerError::GitCommit {
            folder: folder.to_path_buf(),
            source: Some(e),
        })?;

    let commit = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if commit.is_empty() {
        debug!(
            folder = %folder.display(),
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "git rev-parse printed no commit"
        );
        return Err(PackagerError::GitCommit {
            folder: folder.to_path_buf(),
            source: None,
        });
    }

    debug!(folder = %folder.display(), %commit, "Resolved git commit");
    Ok(commit)
}
