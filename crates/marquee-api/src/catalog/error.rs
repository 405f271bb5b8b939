//! Catalog error taxonomy.

use thiserror::Error;

/// Errors returned by catalog operations.
///
/// Every failure of a catalog call is surfaced as one of these variants;
/// callers convert them into a user-visible message.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum CatalogError {
    /// No API credential was configured.
    #[error("API key is missing: set TMDB_API_TOKEN or catalog.api_token in config.toml")]
    MissingCredential,

    /// The request never produced an HTTP response (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `status_message` from the body, or the status's reason phrase.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        /// Request path.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CatalogError {
    /// Returns the HTTP status for `Api` errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status_and_message() {
        // Arrange
        let err = CatalogError::Api {
            status: 401,
            message: String::from("Invalid API key: You must be granted a valid key."),
        };

        // Act
        let text = err.to_string();

        // Assert
        assert_eq!(
            text,
            "API error 401: Invalid API key: You must be granted a valid key."
        );
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_missing_credential_mentions_env_var() {
        // Arrange & Act
        let text = CatalogError::MissingCredential.to_string();

        // Assert
        assert!(text.contains("TMDB_API_TOKEN"));
        assert_eq!(CatalogError::MissingCredential.status(), None);
    }
}
