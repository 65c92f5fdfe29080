//! Template store for generated project skeletons.
//!
//! Templates are embedded at compile time via `include_str!` and rendered by
//! plain placeholder substitution.

use spark_package_core::License;

/// Placeholder replaced with the package name.
pub const PACKAGE_NAME_PLACEHOLDER: &str = "$$packageName$$";
/// Placeholder replaced with license information.
pub const LICENSE_PLACEHOLDER: &str = "$$license$$";
/// Placeholder replaced with today's date (`YYYY-MM-DD`).
pub const DATE_PLACEHOLDER: &str = "$$date$$";

/// Written as `LICENSE` when no license has been chosen yet.
const UNDECIDED_LICENSE: &str = include_str!("../resources/LICENSE");

const APACHE_2: &str = include_str!("../resources/licenses/Apache-2.0");
const BSD_3_CLAUSE: &str = include_str!("../resources/licenses/BSD-3-Clause");
const BSD_2_CLAUSE: &str = include_str!("../resources/licenses/BSD-2-Clause");
const GPL_2: &str = include_str!("../resources/licenses/GPL-2.0");
const GPL_3: &str = include_str!("../resources/licenses/GPL-3.0");
const LGPL_2_1: &str = include_str!("../resources/licenses/LGPL-2.1");
const LGPL_3: &str = include_str!("../resources/licenses/LGPL-3.0");
const MIT: &str = include_str!("../resources/licenses/MIT");
const MPL_2: &str = include_str!("../resources/licenses/MPL-2.0");
const EPL_1: &str = include_str!("../resources/licenses/EPL-1.0");

/// A static file of the project skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// `README.md`
    Readme,
    /// `.gitignore`
    GitIgnore,
    /// `build.sbt`
    BuildSbt,
    /// `project/build.properties`
    BuildProperties,
    /// `project/plugins.sbt`
    PluginsSbt,
    /// `build/sbt`
    SbtLauncher,
    /// `build/sbt-launch-lib.bash`
    SbtLaunchLib,
    /// `python/setup.py`
    SetupPy,
    /// `python/setup.cfg`
    SetupCfg,
    /// `python/MANIFEST.in`
    Manifest,
    /// `python/requirements.txt`
    Requirements,
    /// `python/spark-package-deps.txt`
    SparkPackageDeps,
    /// `python/tests.py`
    PythonTests,
    /// `R/pkg/DESCRIPTION`
    RDescription,
    /// `R/pkg/NAMESPACE`
    RNamespace,
    /// `R/pkg/man/documentation.Rd`
    RDocumentation,
    /// `R/pkg/Read-and-delete-me`
    RReadAndDeleteMe,
}

impl Template {
    /// Path of the generated file, relative to the package root.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Readme => "README.md",
            Self::GitIgnore => ".gitignore",
            Self::BuildSbt => "build.sbt",
            Self::BuildProperties => "project/build.properties",
            Self::PluginsSbt => "project/plugins.sbt",
            Self::SbtLauncher => "build/sbt",
            Self::SbtLaunchLib => "build/sbt-launch-lib.bash",
            Self::SetupPy => "python/setup.py",
            Self::SetupCfg => "python/setup.cfg",
            Self::Manifest => "python/MANIFEST.in",
            Self::Requirements => "python/requirements.txt",
            Self::SparkPackageDeps => "python/spark-package-deps.txt",
            Self::PythonTests => "python/tests.py",
            Self::RDescription => "R/pkg/DESCRIPTION",
            Self::RNamespace => "R/pkg/NAMESPACE",
            Self::RDocumentation => "R/pkg/man/documentation.Rd",
            Self::RReadAndDeleteMe => "R/pkg/Read-and-delete-me",
        }
    }

    /// Raw template contents, placeholders included.
    #[must_use]
    pub const fn contents(self) -> &'static str {
        match self {
            Self::Readme => include_str!("../resources/README.md"),
            Self::GitIgnore => include_str!("../resources/gitignore"),
            Self::BuildSbt => include_str!("../resources/build.sbt"),
            Self::BuildProperties => include_str!("../resources/build.properties"),
            Self::PluginsSbt => include_str!("../resources/plugins.sbt"),
            Self::SbtLauncher => include_str!("../resources/sbt"),
            Self::SbtLaunchLib => include_str!("../resources/sbt-launch-lib.bash"),
            Self::SetupPy => include_str!("../resources/setup.py"),
            Self::SetupCfg => include_str!("../resources/setup.cfg"),
            Self::Manifest => include_str!("../resources/MANIFEST.in"),
            Self::Requirements => include_str!("../resources/requirements.txt"),
            Self::SparkPackageDeps => include_str!("../resources/spark-package-deps.txt"),
            Self::PythonTests => include_str!("../resources/tests.py"),
            Self::RDescription => include_str!("../resources/DESCRIPTION"),
            Self::RNamespace => include_str!("../resources/NAMESPACE"),
            Self::RDocumentation => include_str!("../resources/documentation.Rd"),
            Self::RReadAndDeleteMe => include_str!("../resources/Read-and-delete-me"),
        }
    }

    /// Whether the generated file must be executable.
    #[must_use]
    pub const fn is_executable(self) -> bool {
        matches!(self, Self::SbtLauncher | Self::SbtLaunchLib)
    }

    /// Renders the template with the given `(placeholder, value)` pairs.
    #[must_use]
    pub fn render(self, replacements: &[(&str, &str)]) -> String {
        render(self.contents(), replacements)
    }
}

/// sbt build files.
pub const SBT_TEMPLATES: [Template; 5] = [
    Template::BuildSbt,
    Template::BuildProperties,
    Template::PluginsSbt,
    Template::SbtLauncher,
    Template::SbtLaunchLib,
];

/// Python stub files.
pub const PYTHON_TEMPLATES: [Template; 6] = [
    Template::SetupPy,
    Template::SetupCfg,
    Template::Manifest,
    Template::Requirements,
    Template::SparkPackageDeps,
    Template::PythonTests,
];

/// R stub files.
pub const R_TEMPLATES: [Template; 4] = [
    Template::RDescription,
    Template::RNamespace,
    Template::RDocumentation,
    Template::RReadAndDeleteMe,
];

/// Substitutes every `(placeholder, value)` pair in order.
#[must_use]
pub fn render(template: &str, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |text, (placeholder, value)| {
            text.replace(placeholder, value)
        })
}

/// Returns the `LICENSE` file body for a license.
#[must_use]
pub const fn license_text(license: License) -> &'static str {
    match license {
        License::Apache2 => APACHE_2,
        License::Bsd3Clause => BSD_3_CLAUSE,
        License::Bsd2Clause => BSD_2_CLAUSE,
        License::Gpl2 => GPL_2,
        License::Gpl3 => GPL_3,
        License::Lgpl21 => LGPL_2_1,
        License::Lgpl3 => LGPL_3,
        License::Mit => MIT,
        License::Mpl2 => MPL_2,
        License::Epl1 => EPL_1,
        License::Undecided => UNDECIDED_LICENSE,
    }
}

/// Returns the `licenses` setting written into `build.sbt`.
#[must_use]
pub fn sbt_license_setting(license: License) -> String {
    match license.url() {
        Some(url) => format!(
            "licenses := Seq(\"{}\" -> url(\"{url}\"))\n",
            license.display_name()
        ),
        None => "// format: licenses := Seq($LICENSE_NAME -> $LICENSE_URL)".to_string(),
    }
}

/// Returns the license name written into R package metadata.
#[must_use]
pub const fn r_license_name(license: License) -> &'static str {
    if license.is_undecided() {
        "Please specify a license"
    } else {
        license.display_name()
    }
}
