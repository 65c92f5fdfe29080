//! Error types for Spark Packages core operations.
//!
//! This module defines the error types used throughout the `spark-package-core` crate.

use thiserror::Error;

use crate::name::NAME_TEMPLATE;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Spark Packages core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No package name was supplied.
    #[error("Please specify the name of the package using -n or --name.{}", NAME_TEMPLATE)]
    MissingName,

    /// The package name does not split into exactly two segments.
    #[error("The name of the package must contain exactly one slash.{}", NAME_TEMPLATE)]
    NameSlashCount {
        /// The rejected name.
        name: String,
    },

    /// A segment of the package name contains forbidden characters or is empty.
    #[error(
        "The name of the package can only contain letters, numbers, dashes, underscores, \
         and must contain a single slash.{}",
        NAME_TEMPLATE
    )]
    NameCharacters {
        /// The rejected name.
        name: String,
    },

    /// A dependency line is missing its `==version` part.
    #[error(
        "Spark Package dependencies must be supplied as: `:package_name==:version` in \
         spark-package-deps.txt. Found: {line}"
    )]
    DependencyFormat {
        /// The offending line.
        line: String,
    },

    /// The package part of a dependency line is not `owner/repo`.
    #[error(
        "Spark Package names must be supplied as: `:repo_owner_name/:repo_name` in \
         spark-package-deps.txt. Found: {package}"
    )]
    DependencyName {
        /// The offending package part.
        package: String,
    },

    /// An existing descriptor could not be parsed.
    #[error("Failed to parse pom: {reason}")]
    PomParse {
        /// Reason for the parse failure.
        reason: String,
    },

    /// The root element of an existing descriptor is not a `project`.
    #[error("The root node of the pom file should be <project>, not: {tag}")]
    PomRoot {
        /// Qualified name of the root element found.
        tag: String,
    },

    /// The descriptor could not be serialized.
    #[error("Failed to write pom: {reason}")]
    PomWrite {
        /// Reason for the failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_name() {
        let err = Error::MissingName;
        assert!(err
            .to_string()
            .starts_with("Please specify the name of the package using -n or --name."));
    }

    #[test]
    fn test_error_display_dependency_format() {
        let err = Error::DependencyFormat {
            line: "wrong/format".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("`:package_name==:version` in spark-package-deps.txt"));
        assert!(msg.ends_with("Found: wrong/format"));
    }

    #[test]
    fn test_error_display_pom_root() {
        let err = Error::PomRoot {
            tag: "settings".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The root node of the pom file should be <project>, not: settings"
        );
    }
}
