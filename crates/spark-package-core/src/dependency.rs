//! Spark Package dependency declarations.
//!
//! Python packages list the Spark Packages they depend on in
//! `python/spark-package-deps.txt`, one `owner/repo==version` per line.

use std::fmt;

use crate::error::{Error, Result};

/// Location of the dependency file relative to the package root.
pub const DEPENDENCY_FILE: &str = "python/spark-package-deps.txt";

/// A single Spark Package dependency: `owner/repo==version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencySpec {
    /// Repository owner, used as the Maven `groupId`.
    pub group_id: String,
    /// Repository name, used as the Maven `artifactId`.
    pub artifact_id: String,
    /// Released version.
    pub version: String,
}

impl DependencySpec {
    /// Creates a dependency from its parts.
    #[must_use]
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Parses one `owner/repo==version` line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DependencyFormat`] unless the line contains exactly one
    /// `==`, and [`Error::DependencyName`] unless the package part contains
    /// exactly one `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use spark_package_core::DependencySpec;
    ///
    /// let dep = DependencySpec::parse("databricks/spark-avro==3.2.0").unwrap();
    /// assert_eq!(dep.group_id, "databricks");
    /// assert_eq!(dep.artifact_id, "spark-avro");
    /// assert_eq!(dep.version, "3.2.0");
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let parts: Vec<&str> = line.split("==").collect();
        let [package, version] = parts.as_slice() else {
            return Err(Error::DependencyFormat {
                line: line.to_string(),
            });
        };

        let segments: Vec<&str> = package.split('/').collect();
        let [group_id, artifact_id] = segments.as_slice() else {
            return Err(Error::DependencyName {
                package: (*package).to_string(),
            });
        };

        Ok(Self::new(*group_id, *artifact_id, *version))
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}=={}", self.group_id, self.artifact_id, self.version)
    }
}

/// Parses the contents of a dependency file.
///
/// Lines starting with `#` and blank lines are skipped. Parsing stops at the
/// first malformed line.
///
/// # Errors
///
/// Returns the error of the first malformed line.
pub fn parse_dependency_file(contents: &str) -> Result<Vec<DependencySpec>> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(DependencySpec::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let dep = DependencySpec::parse("right/format==3").unwrap();
        assert_eq!(dep, DependencySpec::new("right", "format", "3"));
        assert_eq!(dep.to_string(), "right/format==3");
    }

    #[test]
    fn test_parse_missing_version() {
        let err = DependencySpec::parse("wrong/format").unwrap_err();
        assert_eq!(
            err,
            Error::DependencyFormat {
                line: "wrong/format".to_string()
            }
        );
    }

    #[test]
    fn test_parse_double_equals_twice() {
        assert!(matches!(
            DependencySpec::parse("a/b==1==2"),
            Err(Error::DependencyFormat { .. })
        ));
    }

    #[test]
    fn test_parse_bad_package() {
        let err = DependencySpec::parse("wrong:format==2").unwrap_err();
        assert!(err
            .to_string()
            .contains("supplied as: `:repo_owner_name/:repo_name` in"));
    }

    #[test]
    fn test_parse_file_skips_comments_and_blanks() {
        let contents = "# deps\n\nright/format==3\n  # indented comment\nother/pkg==0.1\n";
        let deps = parse_dependency_file(contents).unwrap();
        assert_eq!(
            deps,
            vec![
                DependencySpec::new("right", "format", "3"),
                DependencySpec::new("other", "pkg", "0.1"),
            ]
        );
    }

    #[test]
    fn test_parse_file_fails_on_bad_line() {
        let contents = "right/format==3\nwrong/format\n";
        assert!(parse_dependency_file(contents).is_err());
    }
}
