use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize console logging on stderr.
///
/// `RUST_LOG` takes precedence over `filter`. Stdout stays reserved for the
/// resolved configuration handed to external tooling.
pub fn init_logging(filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}

/// Initialize logging to a daily rolling file in `logs_dir` plus stderr.
/// Returns a guard that must be kept alive until the process exits.
pub fn init_logging_to_dir(logs_dir: &std::path::Path, filter: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, "chaincfg");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_to_dir_creates_directory() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let logs_dir = tmp.path().join("nested").join("logs");
        assert!(!logs_dir.exists());

        // Only one global subscriber per process; a second install fails but
        // the directory is created either way.
        let result = init_logging_to_dir(&logs_dir, "warn");
        assert!(logs_dir.exists());

        if let Err(e) = result {
            let msg = e.to_string();
            assert!(msg.contains("logging"), "unexpected error: {msg}");
        }
    }

    #[test]
    fn env_filter_accepts_default_directive() {
        let filters = [crate::settings::DEFAULT_LOG_FILTER, "debug", "chaincfg_resolver=trace"];
        for f in &filters {
            let filter = EnvFilter::try_new(f);
            assert!(filter.is_ok(), "rejected filter {f}");
        }
    }
}
