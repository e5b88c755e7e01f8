//! Command-line front end: option parsing and the help/usage gate.
//!
//! The gate runs before anything else. When it does not return
//! [`Gate::Run`], the caller prints the matching text to standard error and
//! exits successfully without building any client.

pub mod args;

pub use args::{Invocation, Options};

use clap::CommandFactory;

/// Crate version, shown in help and usage messages.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the program should do with a parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// `--help` was given
    Help,
    /// Neither `--secretid` nor `--ssmpath` was given
    MissingTarget,
    /// At least one target is present
    Run,
}

impl Options {
    /// Decides whether the fetches may run.
    pub fn gate(&self) -> Gate {
        if self.help {
            Gate::Help
        } else if self.secret_id.is_none() && self.ssm_path.is_none() {
            Gate::MissingTarget
        } else {
            Gate::Run
        }
    }
}

impl Gate {
    /// Text to print on standard error, if this gate stops execution.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Help => Some(help_text()),
            Self::MissingTarget => Some(missing_target_text()),
            Self::Run => None,
        }
    }
}

/// Long usage text followed by the version.
pub fn help_text() -> String {
    format!(
        "{}\nVERSION: {}",
        Options::command().render_long_help(),
        VERSION
    )
}

/// Short notice shown when no target was given.
pub fn missing_target_text() -> String {
    format!(
        "Please specify --secretid or --ssmpath.\n--help for more details\nVERSION: {}",
        VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(args: &[&str]) -> Gate {
        let mut argv = vec!["secrets-to-env"];
        argv.extend_from_slice(args);
        Invocation::parse(argv).unwrap().options.gate()
    }

    #[test]
    fn test_gate() {
        assert_eq!(gate(&[]), Gate::MissingTarget);
        assert_eq!(gate(&["--region=us-east-1", "--useexport"]), Gate::MissingTarget);
        assert_eq!(gate(&["--secretid=/x"]), Gate::Run);
        assert_eq!(gate(&["--ssmpath=/y/"]), Gate::Run);
        assert_eq!(gate(&["--secretid=/x", "--help"]), Gate::Help);
    }

    #[test]
    fn test_gate_messages() {
        let help = Gate::Help.message().unwrap();
        assert!(help.contains("--secretid"));
        assert!(help.contains("--ssmpath"));
        assert!(help.contains(VERSION));

        let missing = Gate::MissingTarget.message().unwrap();
        assert!(missing.starts_with("Please specify --secretid or --ssmpath."));
        assert!(missing.contains(VERSION));

        assert!(Gate::Run.message().is_none());
    }
}
