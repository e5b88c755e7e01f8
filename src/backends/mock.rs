//! Mock backend for testing.
//!
//! This backend provides an in-memory secret store and parameter store with
//! pagination, latency and error injection, for testing code that uses the
//! source traits.

use crate::backend::{Parameter, ParameterPage, ParameterSource, SecretPayload, SecretSource};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// Mock backend for testing.
///
/// Implements both [`SecretSource`] and [`ParameterSource`].
///
/// # Example
///
/// ```
/// use secrets_to_env::backends::mock::MockBackend;
/// use secrets_to_env::backend::{Parameter, ParameterSource};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> secrets_to_env::Result<()> {
///     let backend = MockBackend::new().with_page_size(1);
///     backend
///         .set_parameters("/app/", vec![Parameter::new("/app/A", "1"), Parameter::new("/app/B", "2")])
///         .await;
///
///     let first = backend.get_parameters_by_path("/app/", None).await?;
///     assert_eq!(first.parameters.len(), 1);
///     assert!(first.next_token.is_some());
///     Ok(())
/// }
/// ```
pub struct MockBackend {
    secrets: RwLock<HashMap<String, SecretPayload>>,
    pages: RwLock<HashMap<String, Vec<ParameterPage>>>,
    page_size: usize,
    secret_calls: AtomicUsize,
    parameter_calls: AtomicUsize,

    /// Error to return from `get_secret_value()`
    pub secret_error: Option<Error>,
    /// Error to return from `get_parameters_by_path()`
    pub parameter_error: Option<Error>,
    /// Fail every parameter page request after this many have succeeded
    pub fail_parameters_after: Option<usize>,
    /// Delay before answering a secret request
    pub secret_latency: Option<Duration>,
    /// Delay before answering each parameter page request
    pub parameter_latency: Option<Duration>,
}

impl MockBackend {
    /// Creates a new mock backend with empty storage and a page size of 10.
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
            pages: RwLock::new(HashMap::new()),
            page_size: 10,
            secret_calls: AtomicUsize::new(0),
            parameter_calls: AtomicUsize::new(0),
            secret_error: None,
            parameter_error: None,
            fail_parameters_after: None,
            secret_latency: None,
            parameter_latency: None,
        }
    }

    /// Sets how many parameters `set_parameters` puts on each page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Pre-populates a secret with a string body.
    pub async fn set_secret(&self, id: impl Into<String>, body: impl Into<String>) {
        self.set_payload(id, SecretPayload::with_string(body)).await;
    }

    /// Pre-populates a secret with a full payload.
    pub async fn set_payload(&self, id: impl Into<String>, payload: SecretPayload) {
        let mut secrets = self.secrets.write().await;
        secrets.insert(id.into(), payload);
    }

    /// Pre-populates a path with parameters, split into pages.
    pub async fn set_parameters(&self, path: impl Into<String>, parameters: Vec<Parameter>) {
        let chunks: Vec<Vec<Parameter>> = parameters
            .chunks(self.page_size)
            .map(|c| c.to_vec())
            .collect();
        let last = chunks.len().saturating_sub(1);

        let pages = chunks
            .into_iter()
            .enumerate()
            .map(|(i, parameters)| ParameterPage {
                parameters,
                next_token: (i < last).then(|| format!("token-{}", i + 1)),
            })
            .collect();

        self.set_pages(path, pages).await;
    }

    /// Pre-populates a path with explicit pages.
    ///
    /// Page `n` is served for the token carried by page `n - 1`.
    pub async fn set_pages(&self, path: impl Into<String>, pages: Vec<ParameterPage>) {
        let mut stored = self.pages.write().await;
        stored.insert(path.into(), pages);
    }

    /// Number of secret requests served so far.
    pub fn secret_calls(&self) -> usize {
        self.secret_calls.load(Ordering::SeqCst)
    }

    /// Number of parameter page requests served so far.
    pub fn parameter_calls(&self) -> usize {
        self.parameter_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretSource for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_secret_value(&self, id: &str) -> Result<SecretPayload> {
        self.secret_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.secret_latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(ref err) = self.secret_error {
            return Err(Error::service("mock", "GetSecretValue", id, err.to_string()));
        }

        let secrets = self.secrets.read().await;
        secrets.get(id).cloned().ok_or_else(|| {
            Error::service(
                "mock",
                "GetSecretValue",
                id,
                "ResourceNotFoundException: Secrets Manager can't find the specified secret.",
            )
        })
    }
}

#[async_trait]
impl ParameterSource for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_parameters_by_path(
        &self,
        path: &str,
        next_token: Option<String>,
    ) -> Result<ParameterPage> {
        let served = self.parameter_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.parameter_latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(ref err) = self.parameter_error {
            return Err(Error::service("mock", "GetParametersByPath", path, err.to_string()));
        }
        if self.fail_parameters_after.is_some_and(|limit| served >= limit) {
            return Err(Error::service(
                "mock",
                "GetParametersByPath",
                path,
                "ThrottlingException: Rate exceeded",
            ));
        }

        let stored = self.pages.read().await;
        let Some(pages) = stored.get(path) else {
            return Ok(ParameterPage::default());
        };

        let index = match next_token {
            None => 0,
            Some(token) => pages
                .iter()
                .position(|p| p.next_token.as_deref() == Some(token.as_str()))
                .map(|i| i + 1)
                .ok_or_else(|| {
                    Error::service(
                        "mock",
                        "GetParametersByPath",
                        path,
                        format!("InvalidNextToken: {}", token),
                    )
                })?,
        };

        Ok(pages.get(index).cloned().unwrap_or_default())
    }
}
