//! Error types for the Spark Packages packager.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packager operations.
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Errors that can occur while scaffolding or assembling a package.
#[derive(Error, Debug)]
pub enum PackagerError {
    /// The package root has no `README.md`.
    #[error("Cannot find README.md in the root directory of the package.")]
    MissingReadme {
        /// Package root that was searched.
        root: PathBuf,
    },

    /// The package root has none of the accepted license file names.
    #[error("Cannot find LICENSE in the root directory of the package.")]
    MissingLicense {
        /// Package root that was searched.
        root: PathBuf,
    },

    /// Java or Scala sources exist but no built jar was found.
    #[error(
        "Your directory contains java or scala code but a jar could not be found. Please build \
         your spark package before calling zip.\nIf the jar is in a directory like lib/, zip \
         omits those jars. Please move your jar elsewhere to use zip properly."
    )]
    NoJar {
        /// Package root that was searched.
        root: PathBuf,
    },

    /// More than one candidate jar was found.
    #[error(
        "Your directory contains multiple jars. We only need your package jar, not the assembly \
         jar, nor any jars that your package depends on.\nIf there are dependency jars in your \
         folder, please place them under lib/ and add them to your pom or sbt build file."
    )]
    MultipleJars {
        /// Every candidate found.
        candidates: Vec<PathBuf>,
    },

    /// The target directory of `init` already exists.
    #[error("Directory {} already exists", path.display())]
    DirectoryExists {
        /// The existing directory.
        path: PathBuf,
    },

    /// Resolving the git commit of the package failed.
    #[error(
        "Problem while accessing git commit sha. Is the folder also the local github repository?"
    )]
    GitCommit {
        /// Folder git was run in.
        folder: PathBuf,
        /// Underlying failure, if git could not be started at all.
        #[source]
        source: Option<std::io::Error>,
    },

    /// I/O error on a specific path.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path where error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing an archive failed.
    #[error("Archive error at {}: {source}", path.display())]
    Archive {
        /// Archive being read or written.
        path: PathBuf,
        /// Underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },

    /// Core library error.
    #[error(transparent)]
    CoreError(#[from] spark_package_core::Error),
}

impl PackagerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.into(),
            source,
        }
    }
}
