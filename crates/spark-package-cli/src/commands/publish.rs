//! Publish command implementation.
//!
//! Publishes a release on Spark Packages, building the release zip first
//! unless one is given.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use spark_package_core::PackageName;
use spark_package_packager::resolve_commit;
use spark_package_registry::ReleaseSubmission;
use tracing::info;

use super::zip::{build_release, release_version};
use super::{registry_client, report, resolve_credentials, PackageArgs, UsageError};
use crate::prompt::{select_license, Prompter};

const MISSING_SOURCE: &str =
    "Please specify the folder of the spark package or the path to the zip file.";

enum ReleaseSource<'a> {
    Build(&'a Path),
    Prebuilt(&'a Path),
}

/// Runs the publish command.
///
/// # Errors
///
/// Returns an error if:
/// - Credentials, the package folder or zip, or the version are missing
/// - The git commit cannot be resolved
/// - The release zip cannot be built or read
/// - The registry cannot be reached
pub fn run(args: &PackageArgs, name: PackageName, prompter: &mut dyn Prompter) -> Result<()> {
    let credentials = resolve_credentials(args, prompter)?;

    let folder = args.folder.as_deref().filter(|f| f.is_dir());
    let source = match (args.zip.as_deref().filter(|z| z.is_file()), folder) {
        (Some(zip), _) => ReleaseSource::Prebuilt(zip),
        (None, Some(folder)) => ReleaseSource::Build(folder),
        (None, None) => return Err(UsageError::new(MISSING_SOURCE).into()),
    };
    let version = release_version(args)?;

    let git_commit = resolve_commit(folder.unwrap_or_else(|| Path::new(".")))?;
    let license = select_license(prompter)?;

    let zip_path = match source {
        ReleaseSource::Prebuilt(zip) => zip.to_path_buf(),
        ReleaseSource::Build(folder) => build_release(folder, &name, version, args, prompter)?.path,
    };
    let artifact = fs::read(&zip_path)
        .with_context(|| format!("Failed to read release zip {}", zip_path.display()))?;

    let submission = ReleaseSubmission {
        name,
        version: version.to_string(),
        git_commit,
        license,
        artifact,
    };
    let client = registry_client(args, credentials)?;

    info!(zip = %zip_path.display(), "Uploading release");
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    let response = rt
        .block_on(client.submit_release(&submission))
        .context("Failed to publish the release")?;

    report(prompter, &response);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::process::Command;

    use mockito::{Matcher, Server};
    use tempfile::TempDir;

    use super::super::tests::parse;
    use super::super::{dispatch, UsageError};
    use super::*;
    use crate::prompt::ScriptedPrompter;

    fn git(dir: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
            .args(args)
            .current_dir(dir)
            .output()
            .is_ok_and(|out| out.status.success())
    }

    #[test]
    fn test_credentials_are_resolved_first() {
        let cli = parse(&["publish", "-n", "test/pkg"]);
        let err = dispatch(&cli, &mut ScriptedPrompter::new([""])).unwrap_err();
        assert_eq!(err.to_string(), "Empty username provided!");
    }

    #[test]
    fn test_requires_folder_or_zip() {
        let cli = parse(&["publish", "-n", "test/pkg", "-u", "u", "-t", "t", "-v", "1.0"]);
        let err = dispatch(&cli, &mut ScriptedPrompter::default()).unwrap_err();
        assert!(err.downcast_ref::<UsageError>().is_some());
        assert_eq!(err.to_string(), MISSING_SOURCE);

        // A directory is not a zip file.
        let dir = TempDir::new().unwrap();
        let cli = parse(&[
            "publish", "-n", "test/pkg", "-u", "u", "-t", "t", "-v", "1.0", "-z",
            dir.path().to_str().unwrap(),
        ]);
        let err = dispatch(&cli, &mut ScriptedPrompter::default()).unwrap_err();
        assert_eq!(err.to_string(), MISSING_SOURCE);
    }

    #[test]
    fn test_requires_version() {
        let dir = TempDir::new().unwrap();
        let cli = parse(&[
            "publish", "-n", "test/pkg", "-u", "u", "-t", "t", "-f",
            dir.path().to_str().unwrap(),
        ]);
        let err = dispatch(&cli, &mut ScriptedPrompter::default()).unwrap_err();
        assert_eq!(err.to_string(), "Please specify a version for the release");
    }

    #[test]
    fn test_folder_must_be_a_checkout() {
        let dir = TempDir::new().unwrap();
        let cli = parse(&[
            "publish", "-n", "test/pkg", "-u", "u", "-t", "t", "-v", "1.0", "-f",
            dir.path().to_str().unwrap(),
        ]);
        let err = dispatch(&cli, &mut ScriptedPrompter::default()).unwrap_err();
        assert!(err.to_string().contains("Problem while accessing git commit sha"));
    }

    #[test]
    fn test_publish_builds_and_uploads() {
        let root = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        if !git(root.path(), &["init", "-q"])
            || !git(root.path(), &["commit", "-q", "--allow-empty", "-m", "init"])
        {
            eprintln!("git unavailable, skipping");
            return;
        }
        fs::write(root.path().join("README.md"), "# pkg\n").unwrap();
        fs::write(root.path().join("LICENSE"), "MIT\n").unwrap();

        let mut server = Server::new();
        let submit = server
            .mock("POST", "/api/submit-release")
            .match_header("authorization", "Basic dXNlcjp0b2tlbg==")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="version"\r\n\r\n1\.0\r\n"#.into()),
                Matcher::Regex(r#"name="license_id"\r\n\r\n7\r\n"#.into()),
                Matcher::Regex(r#"name="git_commit_sha1"\r\n\r\n[0-9a-f]{40}\r\n"#.into()),
                Matcher::Regex(r#"name="artifact_zip"; filename="artifact_zip""#.into()),
            ]))
            .with_status(201)
            .with_body("published")
            .create();

        let url = server.url();
        let cli = parse(&[
            "publish",
            "-n",
            "test/pkg",
            "-u",
            "user",
            "-t",
            "token",
            "-v",
            "1.0",
            "-f",
            root.path().to_str().unwrap(),
            "-o",
            out.path().to_str().unwrap(),
            "--registry",
            &url,
        ]);
        let mut prompter = ScriptedPrompter::new(["8"]);
        dispatch(&cli, &mut prompter).unwrap();

        submit.assert();
        assert!(out.path().join("pkg-1.0.zip").is_file());
        let output = prompter.output();
        assert!(output.contains("Zip File created at: "));
        assert!(output.ends_with("\nSUCCESS: published"));
    }
}
