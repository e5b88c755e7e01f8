//! AWS Secrets Manager and Systems Manager Parameter Store sources.
//!
//! Both clients are built from one [`SdkConfig`] loaded by
//! [`load_sdk_config`], so they share region, credentials, endpoint and
//! timeouts.
//!
//! # Requirements
//!
//! - AWS credentials available via one of:
//!   - Environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`)
//!   - Shared credentials file (`~/.aws/credentials`), optionally a named
//!     profile
//!   - IAM instance or task role
//!   - Static keys passed as `--accessKeyId` / `--secretAccessKey`
//!
//! # Example
//!
//! ```no_run
//! use secrets_to_env::backends::aws::{load_sdk_config, ParameterStoreSource};
//! use secrets_to_env::fetch::fetch_parameters_recursive;
//! use secrets_to_env::ClientConfig;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> secrets_to_env::Result<()> {
//!     let config = ClientConfig::new().with_region("us-west-2");
//!     let sdk = load_sdk_config(&config).await;
//!
//!     let ssm = ParameterStoreSource::new(&sdk);
//!     for p in fetch_parameters_recursive(&ssm, "/myapp/").await? {
//!         println!("{} = {}", p.name, p.value);
//!     }
//!     Ok(())
//! }
//! ```

mod parameter_store;
mod secrets_manager;

pub use parameter_store::ParameterStoreSource;
pub use secrets_manager::SecretsManagerSource;

use crate::config::{ClientConfig, DEFAULT_REGION};
use aws_config::meta::region::RegionProviderChain;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_secretsmanager::config::Credentials;
use tracing::warn;

/// Provider name attached to static credentials.
const STATIC_CREDENTIALS_PROVIDER: &str = "secrets-to-env";

/// Loads the shared SDK configuration.
///
/// Region resolution order: `config.region`, then the SDK default provider
/// chain (environment, profile), then [`DEFAULT_REGION`].
pub async fn load_sdk_config(config: &ClientConfig) -> SdkConfig {
    let region = RegionProviderChain::first_try(config.region.clone().map(Region::new))
        .or_default_provider()
        .or_else(Region::new(DEFAULT_REGION));

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

    if let Some(ref profile) = config.profile {
        loader = loader.profile_name(profile);
    }

    // Use custom endpoint if provided (for LocalStack testing)
    if let Some(ref endpoint) = config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    if let Some((key_id, secret)) = config.static_credentials() {
        loader = loader.credentials_provider(Credentials::new(
            key_id,
            secret,
            config.session_token.clone(),
            None,
            STATIC_CREDENTIALS_PROVIDER,
        ));
    } else if config.access_key_id.is_some() || config.secret_access_key.is_some() {
        warn!("ignoring incomplete static credentials: both accessKeyId and secretAccessKey are required");
    }

    if let Some(timeout) = config.operation_timeout {
        loader = loader.timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
    }

    for key in config.options.keys() {
        warn!(option = %key, "client option is not supported and was ignored");
    }

    loader.load().await
}
