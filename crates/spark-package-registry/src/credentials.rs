//! GitHub credentials used to authenticate against the registry.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{RegistryError, Result};

const USER_KEY: &str = "user=";
const TOKEN_KEY: &str = "password=";

/// A GitHub username and personal access token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// GitHub username.
    pub username: String,
    /// Personal access token with `read:org` permission.
    pub token: String,
}

impl Credentials {
    /// Creates credentials from a username and token.
    #[must_use]
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Reads credentials from a file of `user=` and `password=` lines.
    ///
    /// Lines may appear in any order; other lines are ignored and surrounding
    /// whitespace is trimmed. When a key is repeated the last line wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or lacks either value.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use spark_package_registry::Credentials;
    ///
    /// let creds = Credentials::from_file(Path::new("spark-packages-credentials"))?;
    /// # Ok::<(), spark_package_registry::RegistryError>(())
    /// ```
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::CredentialsFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        let mut username = String::new();
        let mut token = String::new();

        for line in contents.lines().map(str::trim) {
            if let Some(value) = line.strip_prefix(USER_KEY) {
                username = value.trim().to_string();
            } else if let Some(value) = line.strip_prefix(TOKEN_KEY) {
                token = value.trim().to_string();
            }
        }

        if username.is_empty() {
            return Err(RegistryError::MissingUsername {
                path: path.to_path_buf(),
            });
        }
        if token.is_empty() {
            return Err(RegistryError::MissingToken {
                path: path.to_path_buf(),
            });
        }

        Ok(Self { username, token })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}
