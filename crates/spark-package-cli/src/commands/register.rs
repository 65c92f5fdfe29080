//! Register command implementation.
//!
//! Registers a package on Spark Packages. The package must exist as a
//! github repository, whose page is the default homepage.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use spark_package_core::PackageName;
use spark_package_registry::PackageSubmission;
use tracing::info;

use super::{registry_client, report, resolve_credentials, PackageArgs};
use crate::prompt::Prompter;

const SHORT_DESCRIPTION_PROMPT: &str = "Please supply a short (one line) description of your \
     package. You may also provide a file containing the short description:\n";

const LONG_DESCRIPTION_PROMPT: &str = "Please supply a long description of your package. You \
     may also provide a file containing the long description:\n";

/// Runs the register command.
///
/// # Errors
///
/// Returns an error if:
/// - Credentials or descriptions are missing
/// - The homepage does not answer with a success status
/// - The registry cannot be reached
pub fn run(args: &PackageArgs, name: PackageName, prompter: &mut dyn Prompter) -> Result<()> {
    let credentials = resolve_credentials(args, prompter)?;

    let short_description = read_description(prompter, SHORT_DESCRIPTION_PROMPT)?;
    let description = read_description(prompter, LONG_DESCRIPTION_PROMPT)?;

    let default_homepage = format!("https://github.com/{name}");
    let answer = prompter.line(&format!("Homepage of your package ({default_homepage}): "))?;
    let homepage = match answer.trim() {
        "" => default_homepage,
        custom => custom.to_string(),
    };

    let submission = PackageSubmission {
        name,
        homepage,
        short_description,
        description,
    };
    let client = registry_client(args, credentials)?;

    info!(package = %submission.name, homepage = %submission.homepage, "Registering package");
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    let response = rt.block_on(async {
        client.check_homepage(&submission.homepage).await?;
        client
            .submit_package(&submission)
            .await
            .context("Failed to register the package")
    })?;

    report(prompter, &response);
    Ok(())
}

/// Reads a description, either typed in or as the path of a file holding it.
fn read_description(prompter: &mut dyn Prompter, prompt: &str) -> Result<String> {
    let answer = prompter.line(prompt)?;
    let answer = answer.trim();
    if answer.is_empty() {
        bail!("Please supply a proper description or the path to a file:");
    }

    let path = Path::new(answer);
    if !path.is_file() {
        return Ok(answer.to_string());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read description from {}", path.display()))?;
    if contents.trim().is_empty() {
        bail!("The file you submitted is empty. Please supply a description of your package:");
    }
    Ok(contents)
}
