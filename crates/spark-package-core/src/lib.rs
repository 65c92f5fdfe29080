//! # Spark Package Core
//!
//! Core types shared by the Spark Packages command line tool.
//!
//! This crate provides the pieces of a release that do not touch the file
//! system or the network:
//!
//! - [`PackageName`] - Validated `organization/repository` package identity
//! - [`DependencySpec`] - Spark Package dependency from `spark-package-deps.txt`
//! - [`License`] - Built-in license catalogue and its registry identifiers
//! - [`pom`] - Release descriptor generation and merging
//!
//! ## Example
//!
//! ```rust
//! use spark_package_core::{PackageName, DependencySpec};
//! use spark_package_core::pom::{merge_descriptor, Coordinates, Repository};
//!
//! let name = PackageName::parse("databricks/spark-avro").unwrap();
//! let coordinates = Coordinates::new(name.organization(), name.repository(), "1.0.0");
//! let deps = vec![DependencySpec::parse("graphframes/graphframes==0.1.0").unwrap()];
//!
//! let xml = merge_descriptor(None, &coordinates, &deps, &Repository::spark_packages()).unwrap();
//! assert!(xml.contains("<groupId>databricks</groupId>"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dependency;
pub mod error;
pub mod license;
pub mod name;
pub mod pom;

#[cfg(test)]
mod proptest_tests;

// Re-export main types at crate root
pub use dependency::{parse_dependency_file, DependencySpec, DEPENDENCY_FILE};
pub use error::{Error, Result};
pub use license::License;
pub use name::PackageName;
pub use pom::{merge_descriptor, Coordinates, PomDocument, Repository};
