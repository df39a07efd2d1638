mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;

use chaincfg_core::settings::DEFAULT_LOG_FILTER;
use chaincfg_core::{ChainCfgError, EnvSnapshot, Settings, logging};
use chaincfg_resolver::{ConfigResolver, lint_plan};

use cli::{CliArgs, Command, OutputFormat};

fn main() -> Result<()> {
    let cli = CliArgs::parse();

    // A broken settings file still gets logged, with the default filter.
    let settings = Settings::load_from_path(&cli.settings);
    let _guard = init_logging(&cli, settings.as_ref().ok())?;
    let settings = settings.map_err(report)?;
    if cli.settings.exists() {
        info!(
            path = %cli.settings.display(),
            rule_set = settings.lint.rule_set.as_str(),
            "loaded settings"
        );
    } else {
        debug!(path = %cli.settings.display(), "no settings file, using defaults");
    }

    let env = EnvSnapshot::from_process_with_dotenv(&cli.env_file).map_err(report)?;
    let resolver = ConfigResolver::with_settings(env, settings);

    run(&cli.command, &resolver)
}

/// `-v` flags win over the settings file, which wins over the default.
fn log_filter<'a>(cli: &CliArgs, settings: Option<&'a Settings>) -> &'a str {
    cli.verbosity_filter()
        .or_else(|| settings.map(|s| s.logging.filter.as_str()))
        .unwrap_or(DEFAULT_LOG_FILTER)
}

fn init_logging(cli: &CliArgs, settings: Option<&Settings>) -> Result<Option<WorkerGuard>> {
    let filter = log_filter(cli, settings);
    match &cli.log_dir {
        Some(dir) => logging::init_logging_to_dir(dir, filter)
            .with_context(|| format!("Failed to set up logging in {}", dir.display()))
            .map(Some),
        None => logging::init_logging(filter).map(|()| None),
    }
}

fn run(command: &Command, resolver: &ConfigResolver) -> Result<()> {
    match command {
        Command::Show {
            format,
            reveal_secrets,
        } => {
            let config = resolver.resolve().map_err(report)?;
            let config = if *reveal_secrets { config } else { config.redacted() };
            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&config)?,
                OutputFormat::Toml => toml::to_string_pretty(&config)?,
            };
            println!("{rendered}");
        }
        Command::Network {
            name,
            reveal_secrets,
        } => {
            let profile = resolver.resolve_network_profile(name).map_err(report)?;
            let profile = if *reveal_secrets { profile } else { profile.redacted() };
            let keyed = std::collections::BTreeMap::from([(profile.network, &profile)]);
            println!("{}", serde_json::to_string_pretty(&keyed)?);
        }
        Command::VerifyCheck { name } => {
            let mapping = resolver.resolve_explorer_mapping(name).map_err(report)?;
            mapping.require_api_key().map_err(report)?;
            info!(network = %mapping.network, "verification credentials present");
            println!(
                "{}: ready (api {}, browser {})",
                mapping.network, mapping.api_url, mapping.browser_url
            );
        }
        Command::LintPlan { paths } => {
            let rules = resolver.resolve_lint_rules();
            let tasks = lint_plan(&rules, paths.as_slice()).map_err(report)?;
            if tasks.is_empty() {
                println!("no lint rules match the given paths");
            }
            for task in tasks {
                println!("{}", task.glob);
                for command in &task.commands {
                    println!("  $ {command} {}", task.paths.join(" "));
                }
            }
        }
        Command::ExportCheck { names } => {
            let matcher = resolver.resolve_export_policy().matcher().map_err(report)?;
            for name in names {
                let verdict = if matcher.selects(name) { "exported" } else { "skipped" };
                println!("{name}: {verdict}");
            }
        }
    }
    Ok(())
}

/// Log a resolution failure and turn it into an operator-facing error.
fn report(err: impl Into<ChainCfgError>) -> anyhow::Error {
    let err = err.into();
    error!(category = ?err.category(), "{err}");
    anyhow::anyhow!(err.user_message())
}
