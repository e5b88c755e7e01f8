//! Drives both sources and writes their output.

use crate::backend::{ParameterSource, SecretSource};
use crate::cli::Options;
use crate::emit::Emitter;
use crate::fetch::{fetch_parameters_recursive, fetch_secret};
use crate::format::{format_line, strip_segment, EnvValue};
use std::process::ExitCode;
use tracing::debug;

/// What happened to one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceStatus {
    /// Not requested
    #[default]
    Skipped,
    /// Fetched; this many lines were written
    Emitted(usize),
    /// Fetch or decode failed; the error went to standard error
    Failed,
}

/// Per-source result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Secret store fetch (`--secretid`)
    pub secret: SourceStatus,
    /// Parameter store fetch (`--ssmpath`)
    pub parameters: SourceStatus,
}

impl Outcome {
    /// Whether any requested source failed.
    pub fn any_failed(&self) -> bool {
        self.secret == SourceStatus::Failed || self.parameters == SourceStatus::Failed
    }

    /// Process exit status. Failures only change it when `strict` is set.
    pub fn exit_status(&self, strict: bool) -> u8 {
        if strict && self.any_failed() {
            1
        } else {
            0
        }
    }

    /// [`Outcome::exit_status`] as an [`ExitCode`].
    pub fn exit_code(&self, strict: bool) -> ExitCode {
        ExitCode::from(self.exit_status(strict))
    }
}

/// Fetches every requested source and writes one block per source.
///
/// The secret fetch and the parameter fetch are polled together; each writes
/// its block as soon as it completes, so their relative order is not fixed.
/// A failing source reports to standard error and does not affect the other.
pub async fn run(
    options: &Options,
    secrets: &dyn SecretSource,
    parameters: &dyn ParameterSource,
    out: &dyn Emitter,
) -> Outcome {
    let use_export = options.use_export;

    let secret_task = async {
        match options.secret_id.as_deref() {
            Some(id) => export_secret(secrets, id, use_export, out).await,
            None => SourceStatus::Skipped,
        }
    };
    let parameter_task = async {
        match options.ssm_path.as_deref() {
            Some(path) => export_parameters(parameters, path, use_export, out).await,
            None => SourceStatus::Skipped,
        }
    };

    let (secret, parameters) = tokio::join!(secret_task, parameter_task);
    let outcome = Outcome { secret, parameters };
    debug!(?outcome, "run finished");
    outcome
}

async fn export_secret(
    source: &dyn SecretSource,
    id: &str,
    use_export: bool,
    out: &dyn Emitter,
) -> SourceStatus {
    match fetch_secret(source, id).await {
        Ok(pairs) => {
            let lines: Vec<String> = pairs
                .iter()
                .map(|(key, value)| format_line(key, value, use_export))
                .collect();
            out.emit_block(&lines.join("\n"));
            SourceStatus::Emitted(lines.len())
        }
        Err(err) => {
            out.report(&err.to_string());
            SourceStatus::Failed
        }
    }
}

async fn export_parameters(
    source: &dyn ParameterSource,
    path: &str,
    use_export: bool,
    out: &dyn Emitter,
) -> SourceStatus {
    match fetch_parameters_recursive(source, path).await {
        Ok(params) => {
            let lines: Vec<String> = params
                .iter()
                .map(|p| {
                    format_line(
                        strip_segment(&p.name),
                        &EnvValue::Text(p.value.clone()),
                        use_export,
                    )
                })
                .collect();
            out.emit_block(&lines.join("\n"));
            SourceStatus::Emitted(lines.len())
        }
        Err(err) => {
            out.report(&err.to_string());
            SourceStatus::Failed
        }
    }
}
