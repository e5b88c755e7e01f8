use secrets_to_env::backends::aws::{load_sdk_config, ParameterStoreSource, SecretsManagerSource};
use secrets_to_env::cli::Invocation;
use secrets_to_env::emit::StdStreams;
use secrets_to_env::logging::init_logging;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let invocation = match Invocation::parse(std::env::args_os()) {
        Ok(inv) => inv,
        Err(e) => e.exit(),
    };
    let options = &invocation.options;

    if let Some(message) = options.gate().message() {
        eprintln!("{}", message);
        return ExitCode::SUCCESS;
    }

    init_logging(options.debug);

    let config = invocation.client_config();
    debug!(secretid = ?options.secret_id, ssmpath = ?options.ssm_path, "targets");
    debug!(?config, "client config");
    if !invocation.ignored.is_empty() {
        debug!(ignored = ?invocation.ignored, "positional arguments ignored");
    }

    let sdk = load_sdk_config(&config).await;
    let secrets = SecretsManagerSource::new(&sdk);
    let parameters = ParameterStoreSource::new(&sdk);

    let outcome = secrets_to_env::run(options, &secrets, &parameters, &StdStreams).await;
    outcome.exit_code(options.strict)
}
