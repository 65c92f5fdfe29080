//! Init command implementation.
//!
//! Sets up an empty package from the standard template.

use anyhow::{Context, Result};
use spark_package_core::PackageName;
use spark_package_packager::{Languages, ProjectScaffold};
use tracing::info;

use super::PackageArgs;
use crate::prompt::{select_license, Prompter};

/// Runs the init command.
///
/// # Errors
///
/// Returns an error if:
/// - The package directory already exists
/// - The license prompt runs out of input
/// - The skeleton cannot be written
pub fn run(args: &PackageArgs, name: PackageName, prompter: &mut dyn Prompter) -> Result<()> {
    let languages = Languages {
        scala: args.scala,
        java: args.java,
        python: args.python,
        r: args.r,
    };
    let scaffold = ProjectScaffold::new(&args.out, name, languages);

    // Fail before asking anything.
    scaffold.check_available()?;

    let license = select_license(prompter)?;
    let dir = scaffold
        .create(license)
        .context("Failed to create the package skeleton")?;

    info!(dir = %dir.display(), license = license.id(), "Package initialized");
    Ok(())
}
