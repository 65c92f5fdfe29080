//! Package identity.
//!
//! A Spark Package is identified by the GitHub repository that hosts it:
//! `<organization>/<repository>`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Explanation appended to every name validation message.
pub const NAME_TEMPLATE: &str = "
The name consists of two parts: :org_name/:repo_name.
It is required that this name be the name of the
github repository of this package.";

/// The unique `organization/repository` name of a package.
///
/// # Examples
///
/// ```
/// use spark_package_core::PackageName;
///
/// let name: PackageName = "databricks/spark-avro".parse().unwrap();
/// assert_eq!(name.organization(), "databricks");
/// assert_eq!(name.repository(), "spark-avro");
/// assert_eq!(name.to_string(), "databricks/spark-avro");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName {
    organization: String,
    repository: String,
}

impl PackageName {
    /// Validates and parses a package name.
    ///
    /// Surrounding whitespace is ignored. Each segment must be a non-empty
    /// run of ASCII letters, digits, `-` or `_`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingName`] for a blank name,
    /// [`Error::NameSlashCount`] when the name does not contain exactly one
    /// slash, and [`Error::NameCharacters`] when a segment is empty or has
    /// characters outside the allowed set.
    pub fn parse(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::MissingName);
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        let [organization, repository] = segments.as_slice() else {
            return Err(Error::NameSlashCount {
                name: trimmed.to_string(),
            });
        };

        if !is_valid_segment(organization) || !is_valid_segment(repository) {
            return Err(Error::NameCharacters {
                name: trimmed.to_string(),
            });
        }

        Ok(Self {
            organization: (*organization).to_string(),
            repository: (*repository).to_string(),
        })
    }

    /// Returns the organization (GitHub owner), used as the Maven `groupId`.
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Returns the repository name, used as the Maven `artifactId`.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the base name of release artifacts: `<repository>-<version>`.
    #[must_use]
    pub fn artifact_name(&self, version: &str) -> String {
        format!("{}-{version}", self.repository)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}

impl FromStr for PackageName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
