//! Error types for registry operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {source}")]
    ClientBuild {
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// A request could not be sent or its response could not be read.
    #[error("Request to {url} failed: {source}")]
    RequestFailed {
        /// Requested URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The package homepage did not answer with a success status.
    #[error("Could not validate homepage {url}: {source}")]
    HomepageUnreachable {
        /// Homepage URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// Invalid URL.
    #[error("Invalid URL: {url}")]
    InvalidUrl {
        /// URL string.
        url: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// Credentials could not be turned into an `Authorization` header.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Error message.
        message: String,
    },

    /// The credentials file could not be read.
    #[error("Failed to read credentials file {}: {source}", path.display())]
    CredentialsFile {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The credentials file has no `user=` line.
    #[error(
        "Could not resolve github username from the file: {}. Please make sure that it's \
         supplied in its own line as,\nuser= $USERNAME",
        path.display()
    )]
    MissingUsername {
        /// File path.
        path: PathBuf,
    },

    /// The credentials file has no `password=` line.
    #[error(
        "Could not resolve github token from the file: {}. Please make sure that it's \
         supplied in its own line as,\npassword= $TOKEN",
        path.display()
    )]
    MissingToken {
        /// File path.
        path: PathBuf,
    },
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_username_display() {
        let err = RegistryError::MissingUsername {
            path: PathBuf::from("creds.txt"),
        };
        assert_eq!(
            err.to_string(),
            "Could not resolve github username from the file: creds.txt. Please make sure that \
             it's supplied in its own line as,\nuser= $USERNAME"
        );
    }

    #[test]
    fn test_missing_token_display() {
        let err = RegistryError::MissingToken {
            path: PathBuf::from("creds.txt"),
        };
        assert!(err.to_string().ends_with("password= $TOKEN"));
    }
}
