//! Configuration types for the registry client.

use std::time::Duration;

use url::Url;

use crate::credentials::Credentials;
use crate::error::{RegistryError, Result};

/// Registry used when no other URL is configured.
pub const DEFAULT_REGISTRY_URL: &str = "http://spark-packages.org";

/// Path of the package registration endpoint.
pub const SUBMIT_PACKAGE_PATH: &str = "/api/submit-package";

/// Path of the release upload endpoint.
pub const SUBMIT_RELEASE_PATH: &str = "/api/submit-release";

/// Configuration for the registry client.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Registry base URL (e.g., "<http://spark-packages.org>").
    pub url: String,

    /// Credentials sent as HTTP basic auth on submissions.
    pub auth: Option<Credentials>,

    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,

    /// User agent string.
    pub user_agent: String,
}

impl RegistryConfig {
    /// Creates a new registry configuration with the given base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use spark_package_registry::RegistryConfig;
    ///
    /// let config = RegistryConfig::new("http://localhost:8080");
    /// assert_eq!(config.url, "http://localhost:8080");
    /// assert!(config.auth.is_none());
    /// ```
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth: None,
            timeout: None,
            user_agent: format!("spark-package/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the credentials.
    #[must_use]
    pub fn with_auth(mut self, auth: Credentials) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Joins an endpoint path onto the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidUrl`] if the result is not a valid URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use spark_package_registry::{RegistryConfig, SUBMIT_RELEASE_PATH};
    ///
    /// let config = RegistryConfig::new("http://spark-packages.org/");
    /// let url = config.endpoint(SUBMIT_RELEASE_PATH).unwrap();
    /// assert_eq!(url.as_str(), "http://spark-packages.org/api/submit-release");
    /// ```
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!("{}{path}", self.url.trim_end_matches('/'));
        Url::parse(&joined).map_err(|e| RegistryError::InvalidUrl {
            url: joined,
            source: e,
        })
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL)
    }
}
