//! AWS Systems Manager Parameter Store source.

use crate::backend::{Parameter, ParameterPage, ParameterSource};
use crate::{Error, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::Client;

/// Reads parameters with `GetParametersByPath`, recursively and decrypted.
///
/// The service returns at most 10 parameters per call; callers page through
/// with [`crate::fetch::fetch_parameters_recursive`].
#[derive(Debug, Clone)]
pub struct ParameterStoreSource {
    client: Client,
}

impl ParameterStoreSource {
    /// Creates a source from a loaded SDK configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    /// Wraps an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterSource for ParameterStoreSource {
    fn name(&self) -> &str {
        "ssm"
    }

    async fn get_parameters_by_path(
        &self,
        path: &str,
        next_token: Option<String>,
    ) -> Result<ParameterPage> {
        let response = self
            .client
            .get_parameters_by_path()
            .path(path)
            .recursive(true)
            .with_decryption(true)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                Error::service(
                    self.name(),
                    "GetParametersByPath",
                    path,
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        let parameters = response
            .parameters()
            .iter()
            .filter_map(|p| {
                let name = p.name()?;
                Some(Parameter::new(name, p.value().unwrap_or_default()))
            })
            .collect();

        Ok(ParameterPage {
            parameters,
            next_token: response.next_token().map(str::to_string),
        })
    }
}
