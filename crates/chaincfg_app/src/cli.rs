use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Command-line arguments accepted by the `chaincfg` binary.
#[derive(Parser, Debug)]
#[command(
    name = "chaincfg",
    version,
    about = "Resolve compiler, network, verification and lint configuration for the contracts project"
)]
pub(crate) struct CliArgs {
    #[arg(
        long = "env-file",
        value_name = "FILE",
        default_value = ".env",
        env = "CHAINCFG_ENV_FILE",
        help = "Dotenv file layered under the process environment"
    )]
    pub(crate) env_file: PathBuf,
    #[arg(
        long,
        value_name = "FILE",
        default_value = chaincfg_core::settings::SETTINGS_FILE,
        env = "CHAINCFG_SETTINGS",
        help = "Project settings file"
    )]
    pub(crate) settings: PathBuf,
    #[arg(
        long = "log-dir",
        value_name = "DIR",
        help = "Also write logs to a daily rolling file in DIR (default: stderr only)"
    )]
    pub(crate) log_dir: Option<PathBuf>,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v debug, -vv trace)"
    )]
    pub(crate) verbose: u8,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print the complete resolved configuration.
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        #[arg(long, help = "Print private keys and API keys unmasked")]
        reveal_secrets: bool,
    },
    /// Print the resolved profile for one network.
    Network {
        name: String,
        #[arg(long, help = "Print private keys unmasked")]
        reveal_secrets: bool,
    },
    /// Fail unless contract verification on NAME has an API key.
    VerifyCheck { name: String },
    /// Show which lint commands run on the given staged paths.
    LintPlan {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Show whether each fully-qualified contract name gets an ABI export.
    ExportCheck {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Toml,
}

impl CliArgs {
    /// Log filter override derived from `-v` flags.
    pub(crate) fn verbosity_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info,chaincfg_core=debug,chaincfg_resolver=debug"),
            _ => Some("debug,chaincfg_core=trace,chaincfg_resolver=trace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_show_with_defaults() {
        let args = CliArgs::parse_from(["chaincfg", "show"]);
        assert_eq!(args.env_file, PathBuf::from(".env"));
        assert!(matches!(
            args.command,
            Command::Show {
                format: OutputFormat::Json,
                reveal_secrets: false
            }
        ));
        assert_eq!(args.verbosity_filter(), None);
    }

    #[test]
    fn parses_lint_plan_paths() {
        let args = CliArgs::parse_from(["chaincfg", "-vv", "lint-plan", "src/A.sol", "test/A.t.sol"]);
        assert_eq!(args.verbose, 2);
        match args.command {
            Command::LintPlan { paths } => assert_eq!(paths, vec!["src/A.sol", "test/A.t.sol"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn lint_plan_requires_paths() {
        assert!(CliArgs::try_parse_from(["chaincfg", "lint-plan"]).is_err());
    }
}
