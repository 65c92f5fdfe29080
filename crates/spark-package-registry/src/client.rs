//! HTTP client for the registry submission API.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use spark_package_core::{License, PackageName};
use tracing::{debug, info};
use url::Url;

use crate::config::{RegistryConfig, SUBMIT_PACKAGE_PATH, SUBMIT_RELEASE_PATH};
use crate::error::{RegistryError, Result};

/// Multipart field carrying the release archive.
pub const ARTIFACT_FIELD: &str = "artifact_zip";

/// Metadata sent when registering a new package.
#[derive(Debug, Clone)]
pub struct PackageSubmission {
    /// Package name.
    pub name: PackageName,
    /// Package homepage.
    pub homepage: String,
    /// One line description.
    pub short_description: String,
    /// Full description.
    pub description: String,
}

/// A release upload.
#[derive(Debug, Clone)]
pub struct ReleaseSubmission {
    /// Package name.
    pub name: PackageName,
    /// Release version.
    pub version: String,
    /// Commit the release was built from.
    pub git_commit: String,
    /// License of the release.
    pub license: License,
    /// Raw bytes of the release zip.
    pub artifact: Vec<u8>,
}

#[derive(Serialize)]
struct PackageForm<'a> {
    name: String,
    homepage: &'a str,
    short_description: &'a str,
    description: &'a str,
}

/// Status and body of a submission.
///
/// The registry answers `201 Created` on success. Any other status is a
/// rejection whose body explains why; it is reported, not raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl SubmissionResponse {
    /// Whether the registry accepted the submission.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        self.status == 201
    }
}

/// Client for the package registry.
#[derive(Debug)]
pub struct RegistryClient {
    config: RegistryConfig,
    http: reqwest::Client,
}

impl RegistryClient {
    /// Creates a new registry client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use spark_package_registry::{RegistryClient, RegistryConfig};
    ///
    /// let client = RegistryClient::new(RegistryConfig::default())?;
    /// # Ok::<(), spark_package_registry::RegistryError>(())
    /// ```
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let http = Self::build_http_client(&config)?;
        Ok(Self { config, http })
    }

    /// Checks that a homepage answers a GET with a success status.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::HomepageUnreachable`] on a transport failure
    /// or a non-2xx status.
    pub async fn check_homepage(&self, url: &str) -> Result<()> {
        debug!(url, "Checking homepage");
        self.http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| RegistryError::HomepageUnreachable {
                url: url.to_string(),
                source: e,
            })?;
        Ok(())
    }

    /// Registers a package.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent. A rejection by the
    /// registry is returned as a non-created [`SubmissionResponse`].
    pub async fn submit_package(
        &self,
        submission: &PackageSubmission,
    ) -> Result<SubmissionResponse> {
        let url = self.config.endpoint(SUBMIT_PACKAGE_PATH)?;
        info!(package = %submission.name, %url, "Registering package");

        let form = PackageForm {
            name: submission.name.to_string(),
            homepage: &submission.homepage,
            short_description: &submission.short_description,
            description: &submission.description,
        };

        let request = self
            .http
            .post(url.clone())
            .headers(self.auth_headers()?)
            .form(&form);
        Self::send(url, request).await
    }

    /// Uploads a release archive.
    ///
    /// The archive travels base64 encoded in the `artifact_zip` part, which
    /// is what the registry decodes on its side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent. A rejection by the
    /// registry is returned as a non-created [`SubmissionResponse`].
    pub async fn submit_release(
        &self,
        submission: &ReleaseSubmission,
    ) -> Result<SubmissionResponse> {
        let url = self.config.endpoint(SUBMIT_RELEASE_PATH)?;
        info!(
            package = %submission.name,
            version = %submission.version,
            commit = %submission.git_commit,
            license = submission.license.id(),
            bytes = submission.artifact.len(),
            "Publishing release"
        );

        let encoded = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            &submission.artifact,
        );
        let form = Form::new()
            .text("git_commit_sha1", submission.git_commit.clone())
            .text("version", submission.version.clone())
            .text("license_id", submission.license.registry_id().to_string())
            .text("name", submission.name.to_string())
            .part(ARTIFACT_FIELD, Part::text(encoded).file_name(ARTIFACT_FIELD));

        let request = self
            .http
            .post(url.clone())
            .headers(self.auth_headers()?)
            .multipart(form);
        Self::send(url, request).await
    }

    async fn send(url: Url, request: reqwest::RequestBuilder) -> Result<SubmissionResponse> {
        let failed = |e: reqwest::Error| RegistryError::RequestFailed {
            url: url.to_string(),
            source: e,
        };

        let response = request.send().await.map_err(failed)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(failed)?;

        debug!(%url, status, "Registry responded");
        Ok(SubmissionResponse { status, body })
    }

    /// Builds the HTTP client with proper configuration.
    fn build_http_client(config: &RegistryConfig) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| RegistryError::ClientBuild { source: e })
    }

    /// Creates authentication headers based on configuration.
    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if let Some(credentials) = &self.config.auth {
            let encoded = base64::Engine::encode(
                &base64::engine::general_purpose::STANDARD,
                format!("{}:{}", credentials.username, credentials.token),
            );
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Basic {encoded}")).map_err(|_| {
                    RegistryError::AuthenticationFailed {
                        message: "Invalid credentials".to_string(),
                    }
                })?,
            );
        }

        Ok(headers)
    }
}
