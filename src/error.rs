//! Error types for secret and parameter fetches.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching or decoding a source.
///
/// Every variant is reported per source: it goes to standard error and the
/// source contributes no output lines. None of them aborts the sibling fetch.
#[derive(Debug, Error)]
pub enum Error {
    /// The service call failed (network, auth, not found, throttling).
    #[error("{service}: {operation} {target}: {detail}")]
    Service {
        /// Service name ("secretsmanager", "ssm", ...)
        service: String,
        /// API operation name
        operation: String,
        /// Secret id or parameter path the call was made for
        target: String,
        /// Full error context as reported by the client
        detail: String,
    },

    /// The secret string is not valid JSON.
    #[error(
        "error parsing secrets manager response, perhaps SecretString is not valid JSON. \
         body: {body:?}, error: {source}"
    )]
    MalformedSecret {
        /// The literal body returned by the service
        body: String,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },

    /// The parameter store returned a continuation token a second time.
    #[error("parameter store returned continuation token {token:?} twice for {path}")]
    RepeatedPageToken {
        /// Path being listed
        path: String,
        /// The repeated token
        token: String,
    },

    /// Other error (catch-all).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a service error with context.
    ///
    /// # Example
    ///
    /// ```
    /// use secrets_to_env::Error;
    ///
    /// let err = Error::service("ssm", "GetParametersByPath", "/app/", "AccessDenied");
    /// assert_eq!(err.to_string(), "ssm: GetParametersByPath /app/: AccessDenied");
    /// ```
    pub fn service(
        service: impl Into<String>,
        operation: impl Into<String>,
        target: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Service {
            service: service.into(),
            operation: operation.into(),
            target: target.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_service_error_display() {
        let err = Error::service(
            "secretsmanager",
            "GetSecretValue",
            "/app/x",
            "ResourceNotFoundException",
        );
        let msg = err.to_string();
        assert!(msg.contains("secretsmanager"));
        assert!(msg.contains("GetSecretValue"));
        assert!(msg.contains("/app/x"));
        assert!(msg.contains("ResourceNotFoundException"));
    }

    #[test]
    fn test_malformed_secret_keeps_body_and_cause() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::MalformedSecret {
            body: "not json".to_string(),
            source,
        };

        assert!(err.to_string().contains("\"not json\""));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_repeated_token_display() {
        let err = Error::RepeatedPageToken {
            path: "/app/".to_string(),
            token: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"abc\""));
        assert!(msg.contains("/app/"));
    }
}
