//! AWS Secrets Manager source.

use crate::backend::{SecretPayload, SecretSource};
use crate::{Error, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;

/// Reads secrets with `GetSecretValue`.
#[derive(Debug, Clone)]
pub struct SecretsManagerSource {
    client: Client,
}

impl SecretsManagerSource {
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
impl SecretSource for SecretsManagerSource {
    fn name(&self) -> &str {
        "secretsmanager"
    }

    async fn get_secret_value(&self, id: &str) -> Result<SecretPayload> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(id)
            .send()
            .await
            .map_err(|e| {
                Error::service(
                    self.name(),
                    "GetSecretValue",
                    id,
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        Ok(SecretPayload {
            name: response.name().map(str::to_string),
            secret_string: response.secret_string().map(str::to_string),
        })
    }
}
