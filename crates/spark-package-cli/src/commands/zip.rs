//! Zip command implementation.
//!
//! Builds the release zip of a package.

use anyhow::{Context, Result};
use spark_package_core::PackageName;
use spark_package_packager::{ReleaseArtifact, ReleaseAssembler};
use tracing::info;

use super::{PackageArgs, UsageError};
use crate::prompt::Prompter;

/// Runs the zip command.
///
/// # Errors
///
/// Returns a [`UsageError`] if the folder or version is missing, and an
/// error if the release cannot be assembled.
pub fn run(args: &PackageArgs, name: &PackageName, prompter: &mut dyn Prompter) -> Result<()> {
    let folder = match &args.folder {
        Some(folder) if folder.is_dir() => folder,
        _ => {
            return Err(UsageError::new("Please specify the folder of the spark package").into());
        }
    };
    let version = release_version(args)?;

    build_release(folder, name, version, args, prompter)?;
    Ok(())
}

/// Returns the non-blank release version.
///
/// # Errors
///
/// Returns a [`UsageError`] when no version was given.
pub fn release_version(args: &PackageArgs) -> Result<&str> {
    args.version
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| UsageError::new("Please specify a version for the release").into())
}

/// Assembles the release zip and reports where it was written.
///
/// # Errors
///
/// Returns an error if the release cannot be assembled.
pub fn build_release(
    folder: &std::path::Path,
    name: &PackageName,
    version: &str,
    args: &PackageArgs,
    prompter: &mut dyn Prompter,
) -> Result<ReleaseArtifact> {
    let artifact = ReleaseAssembler::new(folder, name.clone(), version)
        .output_dir(&args.out)
        .assemble()
        .with_context(|| format!("Failed to build the release zip of {name} {version}"))?;

    let coordinates = &artifact.coordinates;
    info!(
        group_id = %coordinates.group_id,
        artifact_id = %coordinates.artifact_id,
        version = %coordinates.version,
        "Release assembled"
    );
    prompter.say(&format!("Zip File created at: {}", artifact.path.display()));
    Ok(artifact)
}
