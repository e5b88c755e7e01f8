//! Source traits for the secret store and the parameter store.
//!
//! The fetch logic in [`crate::fetch`] is written against these traits only.
//! The AWS SDK adapters live in [`crate::backends::aws`]; tests use the
//! in-memory [`crate::backends::mock`] backend.

use crate::Result;
use async_trait::async_trait;
use serde::Serialize;

/// The parts of a secret value response this tool consumes.
///
/// Serializes with the service's field names, as echoed by `--debug`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecretPayload {
    /// Friendly name of the secret, when the service reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// String-encoded secret body (expected to hold a JSON object)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_string: Option<String>,
}

impl SecretPayload {
    /// Creates a payload carrying a secret string.
    pub fn with_string(body: impl Into<String>) -> Self {
        Self {
            name: None,
            secret_string: Some(body.into()),
        }
    }
}

/// One hierarchical parameter with its decrypted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    /// Full path, e.g. `/app/config/db_host`
    pub name: String,

    /// Decrypted value
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One page of a by-path query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterPage {
    /// Parameters on this page
    pub parameters: Vec<Parameter>,

    /// Continuation token; `None` on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// A key-addressed secret store.
///
/// Implementations must be `Send + Sync` so both sources can be polled
/// concurrently.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Returns the source name (e.g., "secretsmanager").
    fn name(&self) -> &str;

    /// Fetches the current value of a secret.
    ///
    /// Issues exactly one request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`](crate::Error::Service) on any transport or
    /// service failure.
    async fn get_secret_value(&self, id: &str) -> Result<SecretPayload>;
}

/// A hierarchical parameter store with paginated path queries.
#[async_trait]
pub trait ParameterSource: Send + Sync {
    /// Returns the source name (e.g., "ssm").
    fn name(&self) -> &str;

    /// Fetches one page of parameters under `path`, descendants included,
    /// with values decrypted.
    ///
    /// `next_token` is the continuation token of the previous page, or
    /// `None` for the first page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`](crate::Error::Service) on any transport or
    /// service failure.
    async fn get_parameters_by_path(
        &self,
        path: &str,
        next_token: Option<String>,
    ) -> Result<ParameterPage>;
}
