//! secrets-to-env - print cloud secrets as shell-exportable assignments.
//!
//! Reads a JSON secret from AWS Secrets Manager and/or every parameter under
//! a path in AWS Systems Manager Parameter Store, and prints them as
//! `KEY=value` (or `export KEY=value`) lines, so another process can load
//! centrally managed configuration into its environment before it starts:
//!
//! ```sh
//! eval "$(secrets-to-env --secretid=/app/prod --ssmpath=/app/prod/ --useexport)"
//! ```
//!
//! # Features
//!
//! - **Two sources, one pass**: both fetches run concurrently; each prints
//!   its own block as soon as it completes
//! - **Isolated failures**: a failed source reports on standard error and
//!   never suppresses the other
//! - **Complete pagination**: parameter pages are followed to the end before
//!   anything is printed
//! - **Pass-through client options**: unknown `--key=value` flags configure
//!   the AWS client (endpoint, static credentials)
//!
//! # Library use
//!
//! The fetch and format steps work against the [`SecretSource`] and
//! [`ParameterSource`] traits:
//!
//! ```
//! use secrets_to_env::backends::mock::MockBackend;
//! use secrets_to_env::emit::CapturedStreams;
//! use secrets_to_env::cli::Invocation;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let backend = MockBackend::new();
//!     backend.set_secret("/app/x", r#"{"DB_HOST":"db.internal","PORT":5432}"#).await;
//!
//!     let inv = Invocation::parse(["secrets-to-env", "--secretid=/app/x"]).unwrap();
//!     let out = CapturedStreams::new();
//!     secrets_to_env::run(&inv.options, &backend, &backend, &out).await;
//!
//!     assert_eq!(out.stdout_lines(), vec![r#"DB_HOST="db.internal""#, "PORT=5432"]);
//! }
//! ```
//!
//! # Feature Flags
//!
//! | Flag | Default | Purpose |
//! |------|---------|---------|
//! | `aws` | yes | AWS SDK sources and the binary |
//! | `mock` | yes | In-memory backend for tests |

pub mod backend;
pub mod backends;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod format;
pub mod logging;
pub mod run;

pub use backend::{Parameter, ParameterPage, ParameterSource, SecretPayload, SecretSource};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use format::EnvValue;
pub use run::{run, Outcome, SourceStatus};
