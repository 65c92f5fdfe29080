//! # Spark Package Registry
//!
//! Client for the Spark Packages registry API.
//!
//! The registry accepts two submissions, both authenticated with a GitHub
//! username and personal access token sent as HTTP basic auth:
//!
//! - **Package registration**: name, homepage and descriptions as a form post
//! - **Release upload**: commit, version, license and the base64 encoded
//!   release zip as a multipart post
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spark_package_core::PackageName;
//! use spark_package_registry::{Credentials, PackageSubmission, RegistryClient, RegistryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RegistryConfig::default().with_auth(Credentials::new("octocat", "token"));
//!     let client = RegistryClient::new(config)?;
//!
//!     let submission = PackageSubmission {
//!         name: PackageName::parse("octocat/spark-hello")?,
//!         homepage: "https://github.com/octocat/spark-hello".to_string(),
//!         short_description: "Hello from Spark".to_string(),
//!         description: "A longer description".to_string(),
//!     };
//!
//!     client.check_homepage(&submission.homepage).await?;
//!     let response = client.submit_package(&submission).await?;
//!     println!("{} {}", response.status, response.body);
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod client;
mod config;
mod credentials;
mod error;

pub use client::{
    PackageSubmission, RegistryClient, ReleaseSubmission, SubmissionResponse, ARTIFACT_FIELD,
};
pub use config::{RegistryConfig, DEFAULT_REGISTRY_URL, SUBMIT_PACKAGE_PATH, SUBMIT_RELEASE_PATH};
pub use credentials::Credentials;
pub use error::{RegistryError, Result};
