//! Command-line options.
//!
//! Recognized flags are declared once, on [`Options`]. Every other
//! `--key[=value]` token is a pass-through option: it is collected verbatim
//! and handed to [`ClientConfig`].
//!
//! Pass-through rules:
//! - `--key=value` sets `key` to `value`
//! - `--key value` sets `key` to `value` when `value` does not start with `-`
//! - `--key` alone sets `key` to `"true"`, `--no-key` sets it to `"false"`
//! - `-k` is read like `--k`
//!
//! Recognized switches also accept an inline value: `--debug=true` turns
//! the switch on, `--debug=false` (or `=0`, or `=`) leaves it off.
//!
//! Positional arguments, and everything after a bare `--`, are ignored.

use crate::config::ClientConfig;
use clap::{CommandFactory, Parser};
use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::time::Duration;

/// Recognized options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "secrets-to-env",
    version,
    about = "Print AWS secrets and SSM parameters as shell-exportable KEY=value lines",
    disable_help_flag = true,
    disable_version_flag = true,
    after_long_help = PASS_THROUGH_HELP
)]
pub struct Options {
    /// Print this help and the version, then exit
    #[arg(long)]
    pub help: bool,

    /// Echo raw responses and internal state to standard error
    #[arg(long)]
    pub debug: bool,

    /// Prefix each line with `export `
    #[arg(long = "useexport")]
    pub use_export: bool,

    /// Secrets Manager secret id or ARN; its JSON body is flattened into lines
    #[arg(long = "secretid", value_name = "ID")]
    pub secret_id: Option<String>,

    /// Parameter Store path; every parameter below it is printed by its last segment
    #[arg(long = "ssmpath", value_name = "PATH")]
    pub ssm_path: Option<String>,

    /// Named profile from the shared AWS config and credentials files
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// AWS region (default: SDK provider chain, then us-east-1)
    #[arg(long, value_name = "NAME")]
    pub region: Option<String>,

    /// Timeout for each AWS operation
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Exit with status 1 when any requested source failed
    #[arg(long)]
    pub strict: bool,
}

const PASS_THROUGH_HELP: &str = "\
Any other --key=value flag is passed to the AWS client configuration:
  --endpoint=<url>             custom endpoint (e.g. LocalStack)
  --accessKeyId=<id>           static access key id
  --secretAccessKey=<secret>   static secret access key
  --sessionToken=<token>       static session token

Output goes to standard output, one KEY=value line per secret key or parameter.
Errors go to standard error; a failed source prints nothing on standard output.";

/// A parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// Recognized options
    pub options: Options,

    /// Unrecognized flags, forwarded to the client configuration
    pub pass_through: BTreeMap<String, String>,

    /// Positional arguments (accepted, not used)
    pub ignored: Vec<String>,
}

impl Invocation {
    /// Parses a full argument vector, program name first.
    ///
    /// # Errors
    ///
    /// Returns a clap error when a recognized flag is malformed, e.g.
    /// `--timeout=soon` or `--secretid` without a value.
    ///
    /// # Example
    ///
    /// ```
    /// use secrets_to_env::cli::Invocation;
    ///
    /// let inv = Invocation::parse([
    ///     "secrets-to-env",
    ///     "--secretid=/app/x",
    ///     "--endpoint=http://localhost:4566",
    ///     "--useexport",
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(inv.options.secret_id.as_deref(), Some("/app/x"));
    /// assert!(inv.options.use_export);
    /// assert_eq!(inv.pass_through["endpoint"], "http://localhost:4566");
    /// ```
    pub fn parse<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut tokens = args
            .into_iter()
            .map(|a| a.into().to_string_lossy().into_owned())
            .peekable();

        let program = tokens
            .next()
            .unwrap_or_else(|| "secrets-to-env".to_string());
        let schema = recognized_flags();

        let mut recognized = vec![program];
        let mut pass_through = BTreeMap::new();
        let mut ignored = Vec::new();

        while let Some(token) = tokens.next() {
            if token == "--" {
                ignored.extend(tokens.by_ref());
                break;
            }
            if !is_flag(&token) {
                ignored.push(token);
                continue;
            }

            let body = token.trim_start_matches('-');
            let (key, inline) = match body.split_once('=') {
                Some((k, v)) => (k, Some(v.to_string())),
                None => (body, None),
            };

            match schema.get(key).copied() {
                Some(false) => {
                    // `--debug=false` leaves the switch off.
                    if inline.as_deref().map_or(true, switch_on) {
                        recognized.push(format!("--{}", key));
                    }
                }
                Some(true) => {
                    recognized.push(format!("--{}", body));
                    if inline.is_none() {
                        if let Some(value) = tokens.next_if(|t| !t.starts_with('-')) {
                            recognized.push(value);
                        }
                    }
                }
                None => {
                    let (key, value) = match inline {
                        Some(v) => (key.to_string(), v),
                        None => match key.strip_prefix("no-") {
                            // Recognized switches already default to off.
                            Some(negated) if schema.contains_key(negated) => {
                                ignored.push(token.clone());
                                continue;
                            }
                            Some(negated) => (negated.to_string(), "false".to_string()),
                            None => {
                                let value = tokens
                                    .next_if(|t| !t.starts_with('-'))
                                    .unwrap_or_else(|| "true".to_string());
                                (key.to_string(), value)
                            }
                        },
                    };
                    pass_through.insert(key, value);
                }
            }
        }

        let mut options = Options::try_parse_from(recognized)?;
        options.secret_id = options.secret_id.filter(|s| !s.is_empty());
        options.ssm_path = options.ssm_path.filter(|s| !s.is_empty());

        Ok(Self {
            options,
            pass_through,
            ignored,
        })
    }

    /// Builds the client configuration from the options and pass-through flags.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_options(self.pass_through.clone());

        if let Some(ref region) = self.options.region {
            config = config.with_region(region);
        }
        if let Some(ref profile) = self.options.profile {
            config = config.with_profile(profile);
        }
        if let Some(secs) = self.options.timeout {
            config = config.with_operation_timeout(Duration::from_secs(secs));
        }

        config
    }
}

/// Long flag name → whether it takes a value.
fn recognized_flags() -> HashMap<String, bool> {
    let mut cmd = Options::command();
    cmd.build();
    cmd.get_arguments()
        .filter_map(|arg| {
            arg.get_long()
                .map(|long| (long.to_string(), arg.get_action().takes_values()))
        })
        .collect()
}

/// Reads an inline switch value; `false`, `0` and empty turn it off.
fn switch_on(value: &str) -> bool {
    !matches!(value, "" | "0" | "false")
}

fn is_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Invocation {
        let mut argv = vec!["secrets-to-env"];
        argv.extend_from_slice(args);
        Invocation::parse(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let inv = parse(&[]);
        assert_eq!(inv.options, Options::default());
        assert!(inv.pass_through.is_empty());
    }

    #[test]
    fn test_recognized_flags() {
        let inv = parse(&[
            "--secretid=/app/x",
            "--ssmpath",
            "/app/y/",
            "--useexport",
            "--debug",
            "--profile=dev",
            "--region",
            "eu-west-1",
            "--timeout=5",
            "--strict",
        ]);

        let o = &inv.options;
        assert_eq!(o.secret_id.as_deref(), Some("/app/x"));
        assert_eq!(o.ssm_path.as_deref(), Some("/app/y/"));
        assert!(o.use_export && o.debug && o.strict && !o.help);
        assert_eq!(o.profile.as_deref(), Some("dev"));
        assert_eq!(o.region.as_deref(), Some("eu-west-1"));
        assert_eq!(o.timeout, Some(5));
        assert!(inv.pass_through.is_empty());
    }

    #[test]
    fn test_pass_through_never_contains_recognized() {
        let inv = parse(&[
            "--endpoint=http://localhost:4566",
            "--secretid=/x",
            "--accessKeyId",
            "AKIA",
            "--sslEnabled",
            "--no-paramValidation",
            "--region=us-west-2",
        ]);

        assert_eq!(inv.pass_through.len(), 4);
        assert_eq!(inv.pass_through["endpoint"], "http://localhost:4566");
        assert_eq!(inv.pass_through["accessKeyId"], "AKIA");
        assert_eq!(inv.pass_through["sslEnabled"], "true");
        assert_eq!(inv.pass_through["paramValidation"], "false");
        assert!(!inv.pass_through.contains_key("secretid"));
        assert!(!inv.pass_through.contains_key("region"));
    }

    #[test]
    fn test_negated_recognized_flag_not_forwarded() {
        let inv = parse(&["--no-debug", "--ssmpath=/p"]);
        assert!(inv.pass_through.is_empty());
        assert!(!inv.options.debug);
    }

    #[test]
    fn test_switch_with_inline_value() {
        let inv = parse(&["--debug=true", "--useexport=1", "--strict=false", "--help=0"]);
        assert!(inv.options.debug);
        assert!(inv.options.use_export);
        assert!(!inv.options.strict);
        assert!(!inv.options.help);
        assert!(inv.pass_through.is_empty());
    }

    #[test]
    fn test_flag_followed_by_flag_is_boolean() {
        let inv = parse(&["--verbose", "--useexport"]);
        assert_eq!(inv.pass_through["verbose"], "true");
        assert!(inv.options.use_export);
    }

    #[test]
    fn test_positionals_ignored() {
        let inv = parse(&["stray", "--secretid=/x", "--", "--debug", "more"]);
        assert_eq!(inv.ignored, vec!["stray", "--debug", "more"]);
        assert!(!inv.options.debug);
        assert_eq!(inv.options.secret_id.as_deref(), Some("/x"));
    }

    #[test]
    fn test_single_dash_flag() {
        let inv = parse(&["-e=http://x", "-", "--ssmpath=/p"]);
        assert_eq!(inv.pass_through["e"], "http://x");
        assert_eq!(inv.ignored, vec!["-"]);
    }

    #[test]
    fn test_empty_targets_are_unset() {
        let inv = parse(&["--secretid=", "--ssmpath="]);
        assert!(inv.options.secret_id.is_none());
        assert!(inv.options.ssm_path.is_none());
    }

    #[test]
    fn test_malformed_recognized_flag() {
        let result = Invocation::parse(["secrets-to-env", "--timeout=soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_config() {
        let inv = parse(&[
            "--region=ap-southeast-2",
            "--profile=ops",
            "--timeout=3",
            "--endpoint=http://localhost:4566",
            "--secretAccessKey=shh",
            "--maxRetries=2",
        ]);

        let config = inv.client_config();
        assert_eq!(config.region.as_deref(), Some("ap-southeast-2"));
        assert_eq!(config.profile.as_deref(), Some("ops"));
        assert_eq!(config.operation_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.secret_access_key.as_deref(), Some("shh"));
        assert_eq!(config.get_option("maxRetries"), Some(&"2".to_string()));
    }

    #[test]
    fn test_command_definition() {
        Options::command().debug_assert();
    }
}
