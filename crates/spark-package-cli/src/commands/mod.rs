//! CLI commands and argument parsing.

pub mod init;
pub mod publish;
pub mod register;
pub mod zip;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use spark_package_core::PackageName;
use spark_package_registry::{
    Credentials, RegistryClient, RegistryConfig, SubmissionResponse, DEFAULT_REGISTRY_URL,
};
use thiserror::Error;
use tracing::warn;

use crate::prompt::Prompter;

const MISSING_ACTION: &str =
    "Please specify an action, such as 'init', 'zip', 'register' or 'publish'";

/// Create, package, register and publish Spark Packages
#[derive(Parser, Debug)]
#[command(name = "spark-package")]
#[command(author, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub action: Option<Action>,

    #[command(flatten)]
    pub args: PackageArgs,
}

/// Available actions.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Set up an empty package from the standard template
    Init,

    /// Build the release zip of a package
    Zip,

    /// Register the package on Spark Packages
    Register,

    /// Publish a release on Spark Packages
    Publish,
}

/// Options shared by every action.
#[derive(Args, Debug, Clone)]
pub struct PackageArgs {
    /// Name of the package, as :org_name/:repo_name of its github repository
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// Output directory for the package or release zip
    #[arg(short, long, global = true, default_value = ".")]
    pub out: PathBuf,

    /// Version of the release, for zip and publish
    #[arg(short, long, global = true)]
    pub version: Option<String>,

    /// Root folder of the package to prepare for release
    #[arg(short, long, global = true)]
    pub folder: Option<PathBuf>,

    /// Release zip generated beforehand, for publish
    #[arg(short, long, global = true)]
    pub zip: Option<PathBuf>,

    /// Include scala code (the default when no language is chosen)
    #[arg(short, long, global = true)]
    pub scala: bool,

    /// Include java code
    #[arg(short, long, global = true)]
    pub java: bool,

    /// Include python code
    #[arg(short, long, global = true)]
    pub python: bool,

    /// Include R code
    #[arg(short = 'r', long = "R", global = true)]
    pub r: bool,

    /// Github username
    #[arg(short, long, global = true, env = "SPARK_PACKAGES_USER")]
    pub user: Option<String>,

    /// Github personal access token with read:org permission
    #[arg(
        short,
        long,
        global = true,
        env = "SPARK_PACKAGES_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// File with `user=` and `password=` lines holding the github credentials
    #[arg(short = 'c', long = "cred", global = true)]
    pub cred_file: Option<PathBuf>,

    /// Registry URL
    #[arg(long, global = true, env = "SPARK_PACKAGES_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry: String,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Invalid command line. The help text is shown after the message.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

impl UsageError {
    /// Creates a usage error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Validates the action and package name, then runs the action.
///
/// # Errors
///
/// Returns a [`UsageError`] for an invalid command line and any other error
/// the action fails with.
pub fn dispatch(cli: &Cli, prompter: &mut dyn Prompter) -> Result<()> {
    let action = cli.action.ok_or_else(|| UsageError::new(MISSING_ACTION))?;
    let name = PackageName::parse(cli.args.name.as_deref().unwrap_or_default())
        .map_err(|e| UsageError::new(e.to_string()))?;

    match action {
        Action::Init => init::run(&cli.args, name, prompter),
        Action::Zip => zip::run(&cli.args, &name, prompter),
        Action::Register => register::run(&cli.args, name, prompter),
        Action::Publish => publish::run(&cli.args, name, prompter),
    }
}

/// Resolves credentials from the credentials file, then flags, then prompts.
///
/// # Errors
///
/// Returns an error if the file is incomplete or a prompted value is blank.
pub fn resolve_credentials(args: &PackageArgs, prompter: &mut dyn Prompter) -> Result<Credentials> {
    if let Some(path) = &args.cred_file {
        if path.is_file() {
            return Ok(Credentials::from_file(path)?);
        }
        warn!(path = %path.display(), "Credentials file not found, falling back to flags");
    }

    let username = match non_blank(args.user.as_deref()) {
        Some(user) => user.to_string(),
        None => prompter
            .line("Please enter your Github username: ")?
            .trim()
            .to_string(),
    };
    if username.is_empty() {
        bail!("Empty username provided!");
    }

    let token = match non_blank(args.token.as_deref()) {
        Some(token) => token.to_string(),
        None => prompter
            .secret("Please enter your Github Personal access token with read:org permissions: ")?
            .trim()
            .to_string(),
    };
    if token.is_empty() {
        bail!("Empty token provided!");
    }

    Ok(Credentials::new(username, token))
}

/// Builds a registry client from the shared flags.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub fn registry_client(args: &PackageArgs, credentials: Credentials) -> Result<RegistryClient> {
    let mut config = RegistryConfig::new(&args.registry).with_auth(credentials);
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    RegistryClient::new(config).context("Failed to create registry client")
}

/// Prints the registry's answer. Rejections are reported, not raised.
pub fn report(prompter: &mut dyn Prompter, response: &SubmissionResponse) {
    if response.is_created() {
        prompter.say(&format!("\nSUCCESS: {}", response.body));
    } else {
        prompter.say(&format!("\nERROR: {}", response.body));
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use tempfile::TempDir;

    pub(crate) fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("spark-package").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap()
    }

    fn usage_message(result: Result<()>) -> String {
        let err = result.unwrap_err();
        err.downcast_ref::<UsageError>()
            .map(ToString::to_string)
            .unwrap_or_else(|| panic!("expected a usage error, got: {err:#}"))
    }

    #[test]
    fn test_flags_after_action() {
        let cli = parse(&["init", "-n", "test/pkg", "-p", "--R", "-o", "out"]);
        assert_eq!(cli.action, Some(Action::Init));
        assert_eq!(cli.args.name.as_deref(), Some("test/pkg"));
        assert!(cli.args.python && cli.args.r && !cli.args.scala);
        assert_eq!(cli.args.out, PathBuf::from("out"));
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["zip"]);
        assert_eq!(cli.args.out, PathBuf::from("."));
        assert!(cli.args.timeout.is_none());
    }

    #[test]
    fn test_missing_action() {
        let cli = parse(&["-n", "test/pkg"]);
        let message = usage_message(dispatch(&cli, &mut ScriptedPrompter::default()));
        assert_eq!(message, MISSING_ACTION);
    }

    #[test]
    fn test_name_is_checked_before_action_flags() {
        let cli = parse(&["zip"]);
        let message = usage_message(dispatch(&cli, &mut ScriptedPrompter::default()));
        assert!(message.starts_with("Please specify the name of the package using -n or --name."));

        let cli = parse(&["zip", "-n", "test"]);
        let message = usage_message(dispatch(&cli, &mut ScriptedPrompter::default()));
        assert!(message.starts_with("The name of the package must contain exactly one slash."));

        let cli = parse(&["publish", "-n", "te$t/pkg"]);
        let message = usage_message(dispatch(&cli, &mut ScriptedPrompter::default()));
        assert!(message.starts_with("The name of the package can only contain letters"));
    }

    fn args(extra: &[&str]) -> PackageArgs {
        let mut argv = vec!["register"];
        argv.extend_from_slice(extra);
        parse(&argv).args
    }

    #[test]
    fn test_credentials_from_file_win() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("creds");
        std::fs::write(&file, "user=from-file\npassword=file-token\n").unwrap();

        let args = args(&["-u", "flag", "-t", "flag", "-c", file.to_str().unwrap()]);
        let creds = resolve_credentials(&args, &mut ScriptedPrompter::default()).unwrap();
        assert_eq!(creds, Credentials::new("from-file", "file-token"));
    }

    #[test]
    fn test_credentials_file_long_flag() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("creds");
        std::fs::write(&file, "user=octocat\npassword=secret\n").unwrap();

        let cli = parse(&["publish", "--cred", file.to_str().unwrap()]);
        assert_eq!(cli.args.cred_file.as_deref(), Some(file.as_path()));
        let creds = resolve_credentials(&cli.args, &mut ScriptedPrompter::default()).unwrap();
        assert_eq!(creds, Credentials::new("octocat", "secret"));
    }

    #[test]
    fn test_credentials_from_flags() {
        let args = args(&["-u", "octocat", "-t", "secret", "-c", "/no/such/file"]);
        let creds = resolve_credentials(&args, &mut ScriptedPrompter::default()).unwrap();
        assert_eq!(creds, Credentials::new("octocat", "secret"));
    }

    #[test]
    fn test_credentials_prompted() {
        let args = args(&["-u", "  "]);
        let mut prompter = ScriptedPrompter::new([" octocat ", "secret"]);
        let creds = resolve_credentials(&args, &mut prompter).unwrap();
        assert_eq!(creds, Credentials::new("octocat", "secret"));
        assert_eq!(prompter.transcript[0], "Please enter your Github username: ");
    }

    #[test]
    fn test_blank_prompted_credentials() {
        let args = args(&[]);
        let err = resolve_credentials(&args, &mut ScriptedPrompter::new([""])).unwrap_err();
        assert_eq!(err.to_string(), "Empty username provided!");

        let err = resolve_credentials(&args, &mut ScriptedPrompter::new(["octocat", " "]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Empty token provided!");
    }
}
