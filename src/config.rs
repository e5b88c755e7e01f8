//! Client configuration shared by the secret and parameter clients.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Region used when neither `--region` nor the SDK provider chain has one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration for creating the service clients.
///
/// Known fields are typed; any other pass-through option lands in
/// `options` unchanged. Both adapters receive the same value.
///
/// The `Debug` output redacts the secret access key and session token, so
/// it is safe to echo in debug logs.
///
/// ```
/// use secrets_to_env::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_region("eu-west-1")
///     .with_option("endpoint", "http://localhost:4566")
///     .with_option("secretAccessKey", "hunter2");
///
/// assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
/// assert!(!format!("{:?}", config).contains("hunter2"));
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct ClientConfig {
    /// AWS region (e.g., "us-west-2")
    pub region: Option<String>,

    /// Named profile from the shared config/credentials files
    pub profile: Option<String>,

    /// Custom endpoint URL (for LocalStack testing)
    pub endpoint: Option<String>,

    /// Static access key id
    pub access_key_id: Option<String>,

    /// Static secret access key
    pub secret_access_key: Option<String>,

    /// Static session token
    pub session_token: Option<String>,

    /// Timeout applied to every SDK operation
    pub operation_timeout: Option<Duration>,

    /// Pass-through options with no typed counterpart
    pub options: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from pass-through options.
    pub fn from_options<I, K, V>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        options
            .into_iter()
            .fold(Self::new(), |config, (k, v)| config.with_option(k, v))
    }

    /// Sets the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Selects a named credential profile instead of ambient credentials.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Sets the per-operation timeout.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Adds a pass-through option.
    ///
    /// Recognized keys, in either spelling:
    /// - `endpoint`, `endpoint-url`
    /// - `accessKeyId`, `access-key-id`
    /// - `secretAccessKey`, `secret-access-key`
    /// - `sessionToken`, `session-token`
    ///
    /// Anything else is stored in `options`.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "endpoint" | "endpoint-url" => self.endpoint = Some(value),
            "accessKeyId" | "access-key-id" => self.access_key_id = Some(value),
            "secretAccessKey" | "secret-access-key" => self.secret_access_key = Some(value),
            "sessionToken" | "session-token" => self.session_token = Some(value),
            _ => {
                self.options.insert(key, value);
            }
        }
        self
    }

    /// Gets a residual pass-through option value.
    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }

    /// Returns the static key pair if both halves were supplied.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> Option<&'static str> {
            value.as_ref().map(|_| "** redacted **")
        }

        f.debug_struct("ClientConfig")
            .field("region", &self.region)
            .field("profile", &self.profile)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &redact(&self.secret_access_key))
            .field("session_token", &redact(&self.session_token))
            .field("operation_timeout", &self.operation_timeout)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new()
            .with_region("us-west-2")
            .with_profile("staging")
            .with_operation_timeout(Duration::from_secs(5))
            .with_option("maxRetries", "3");

        assert_eq!(config.region.as_deref(), Some("us-west-2"));
        assert_eq!(config.profile.as_deref(), Some("staging"));
        assert_eq!(config.operation_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.get_option("maxRetries"), Some(&"3".to_string()));
    }

    #[test]
    fn test_known_options_are_typed() {
        let config = ClientConfig::from_options([
            ("endpoint", "http://localhost:4566"),
            ("access-key-id", "AKIA"),
            ("secretAccessKey", "shh"),
            ("session-token", "tok"),
        ]);

        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.static_credentials(), Some(("AKIA", "shh")));
        assert_eq!(config.session_token.as_deref(), Some("tok"));
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_static_credentials_need_both_halves() {
        let config = ClientConfig::new().with_option("accessKeyId", "AKIA");
        assert_eq!(config.static_credentials(), None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ClientConfig::new()
            .with_option("accessKeyId", "AKIAVISIBLE")
            .with_option("secretAccessKey", "very-secret")
            .with_option("sessionToken", "also-secret");

        let debug = format!("{:?}", config);
        assert!(debug.contains("AKIAVISIBLE"));
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("also-secret"));
        assert!(debug.contains("redacted"));
    }
}
