//! # Spark Package Packager
//!
//! File system side of the Spark Packages tooling.
//!
//! This crate provides functionality for:
//!
//! - Generating an empty package skeleton from embedded templates
//! - Assembling the release zip (jar plus release descriptor)
//! - Collecting python modules into the release jar
//! - Resolving the git commit a release is built from
//!
//! ## Example
//!
//! ```rust,no_run
//! use spark_package_core::PackageName;
//! use spark_package_packager::{resolve_commit, ReleaseAssembler};
//!
//! let name = PackageName::parse("databricks/spark-avro").unwrap();
//! let artifact = ReleaseAssembler::new("spark-avro", name, "1.0.0")
//!     .output_dir("dist")
//!     .assemble()?;
//! let commit = resolve_commit(std::path::Path::new("spark-avro"))?;
//! # Ok::<(), spark_package_packager::PackagerError>(())
//! ```

pub mod assembler;
pub mod error;
pub mod python;
pub mod scaffold;
pub mod templates;
pub mod vcs;

pub use assembler::{find_license_file, ReleaseArtifact, ReleaseAssembler, LICENSE_FILES};
pub use error::{PackagerError, Result};
pub use scaffold::{Languages, ProjectScaffold};
pub use vcs::resolve_commit;
