//! Empty project generation.
//!
//! [`ProjectScaffold`] lays out a new package directory from the embedded
//! templates. The license is chosen interactively by the caller, so the
//! target directory can be checked with [`ProjectScaffold::check_available`]
//! before prompting.

use std::fs;
use std::path::{Path, PathBuf};

use spark_package_core::{License, PackageName};
use tracing::{debug, info};

use crate::error::{PackagerError, Result};
use crate::templates::{
    self, Template, DATE_PLACEHOLDER, LICENSE_PLACEHOLDER, PACKAGE_NAME_PLACEHOLDER,
    PYTHON_TEMPLATES, R_TEMPLATES, SBT_TEMPLATES,
};

const R_DIRECTORIES: [&str; 4] = ["R/pkg/R", "R/pkg/man", "R/pkg/data", "R/pkg/src"];

/// Languages a new package is set up for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Languages {
    /// Scala sources and sbt build.
    pub scala: bool,
    /// Java sources and sbt build.
    pub java: bool,
    /// Python stubs.
    pub python: bool,
    /// R package stubs.
    pub r: bool,
}

impl Languages {
    /// Falls back to Scala when no language was requested.
    #[must_use]
    pub const fn or_default_scala(self) -> Self {
        if self.scala || self.java || self.python || self.r {
            self
        } else {
            Self {
                scala: true,
                ..self
            }
        }
    }

    /// Whether the package is built with sbt.
    #[must_use]
    pub const fn uses_sbt(self) -> bool {
        self.scala || self.java
    }
}

/// Creates the skeleton of a new package under `<out_dir>/<repository>`.
///
/// # Examples
///
/// ```rust,no_run
/// use spark_package_core::{License, PackageName};
/// use spark_package_packager::{Languages, ProjectScaffold};
///
/// let name = PackageName::parse("databricks/spark-avro").unwrap();
/// let languages = Languages { python: true, ..Languages::default() };
///
/// let scaffold = ProjectScaffold::new(".", name, languages);
/// scaffold.check_available().unwrap();
/// scaffold.create(License::Apache2).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ProjectScaffold {
    name: PackageName,
    package_dir: PathBuf,
    languages: Languages,
    date: String,
}

impl ProjectScaffold {
    /// Creates a scaffold for `name`, defaulting to Scala when no language is set.
    #[must_use]
    pub fn new(out_dir: impl AsRef<Path>, name: PackageName, languages: Languages) -> Self {
        let package_dir = out_dir.as_ref().join(name.repository());
        Self {
            name,
            package_dir,
            languages: languages.or_default_scala(),
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Overrides the date written into R metadata.
    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Fails if the package directory already exists.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::DirectoryExists`].
    pub fn check_available(&self) -> Result<()> {
        if self.package_dir.exists() {
            return Err(PackagerError::DirectoryExists {
                path: self.package_dir.clone(),
            });
        }
        Ok(())
    }

    /// Writes the skeleton and returns the package directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or any file cannot
    /// be written.
    pub fn create(&self, license: License) -> Result<PathBuf> {
        self.check_available()?;
        info!(
            package = %self.name,
            dir = %self.package_dir.display(),
            license = license.id(),
            "Creating package skeleton"
        );

        self.create_dir("")?;
        self.write_file("LICENSE", templates::license_text(license))?;
        self.write_template(Template::Readme, &[])?;
        self.write_template(Template::GitIgnore, &[])?;

        if self.languages.uses_sbt() {
            self.create_source_dirs("resources")?;
            self.create_sbt_files(license)?;
            if self.languages.java {
                self.create_source_dirs("java")?;
            }
            if self.languages.scala {
                self.create_source_dirs("scala")?;
            }
        }
        if self.languages.python {
            self.create_python_files()?;
        }
        if self.languages.r {
            self.create_r_files(license)?;
        }

        Ok(self.package_dir.clone())
    }

    fn create_source_dirs(&self, suffix: &str) -> Result<()> {
        self.create_dir(&format!("src/main/{suffix}"))?;
        self.create_dir(&format!("src/test/{suffix}"))
    }

    fn create_sbt_files(&self, license: License) -> Result<()> {
        let name = self.name.to_string();
        let license_setting = templates::sbt_license_setting(license);
        let replacements = [
            (PACKAGE_NAME_PLACEHOLDER, name.as_str()),
            (LICENSE_PLACEHOLDER, license_setting.as_str()),
        ];
        for template in SBT_TEMPLATES {
            self.write_template(template, &replacements)?;
        }
        Ok(())
    }

    fn create_python_files(&self) -> Result<()> {
        for template in PYTHON_TEMPLATES {
            self.write_template(template, &[])?;
        }
        Ok(())
    }

    fn create_r_files(&self, license: License) -> Result<()> {
        for dir in R_DIRECTORIES {
            self.create_dir(dir)?;
        }
        let replacements = [
            (PACKAGE_NAME_PLACEHOLDER, self.name.repository()),
            (DATE_PLACEHOLDER, self.date.as_str()),
            (LICENSE_PLACEHOLDER, templates::r_license_name(license)),
        ];
        for template in R_TEMPLATES {
            self.write_template(template, &replacements)?;
        }
        Ok(())
    }

    fn create_dir(&self, relative: &str) -> Result<()> {
        let path = self.package_dir.join(relative);
        fs::create_dir_all(&path).map_err(|e| PackagerError::io(&path, e))
    }

    fn write_template(&self, template: Template, replacements: &[(&str, &str)]) -> Result<()> {
        self.write_file(template.path(), &template.render(replacements))?;
        if template.is_executable() {
            self.make_executable(template.path())?;
        }
        Ok(())
    }

    fn write_file(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.package_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PackagerError::io(parent, e))?;
        }
        debug!(path = %path.display(), "Writing file");
        fs::write(&path, contents).map_err(|e| PackagerError::io(&path, e))
    }

    #[cfg(unix)]
    fn make_executable(&self, relative: &str) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let path = self.package_dir.join(relative);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .map_err(|e| PackagerError::io(&path, e))
    }

    #[cfg(not(unix))]
    fn make_executable(&self, _relative: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scaffold(dir: &TempDir, languages: Languages) -> ProjectScaffold {
        let name = PackageName::parse("test/pkg").unwrap();
        ProjectScaffold::new(dir.path(), name, languages).date("2016-01-02")
    }

    #[test]
    fn test_no_language_defaults_to_scala() {
        let languages = Languages::default().or_default_scala();
        assert!(languages.scala);
        assert!(!languages.java && !languages.python && !languages.r);

        let python = Languages {
            python: true,
            ..Languages::default()
        };
        assert_eq!(python.or_default_scala(), python);
    }

    #[test]
    fn test_existing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();

        let err = scaffold(&dir, Languages::default()).check_available().unwrap_err();
        assert!(matches!(err, PackagerError::DirectoryExists { .. }));
        assert!(err.to_string().ends_with("already exists"));
    }

    #[test]
    fn test_r_placeholders() {
        let dir = TempDir::new().unwrap();
        let languages = Languages {
            r: true,
            ..Languages::default()
        };
        let root = scaffold(&dir, languages).create(License::Undecided).unwrap();

        let description = fs::read_to_string(root.join("R/pkg/DESCRIPTION")).unwrap();
        assert!(description.contains("Package: pkg"));
        assert!(description.contains("Date: 2016-01-02"));
        assert!(description.contains("License: Please specify a license"));
        assert!(!root.join("build.sbt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_sbt_launcher_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = scaffold(&dir, Languages::default()).create(License::Mit).unwrap();

        let mode = fs::metadata(root.join("build/sbt")).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
