use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global subscriber writing to a timestamped file in `log_dir`.
///
/// `RUST_LOG` takes precedence over the default level. Returns the log file path.
pub fn init_logger(log_dir: &str, verbose: bool) -> Result<PathBuf> {
    let dir = Path::new(log_dir);
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir))?;
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_file = dir.join(format!("link_miner_{}.log", timestamp));
    let writer = fs::File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(verbose))
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    info!("Logger initialized at {}", log_file.display());

    Ok(log_file)
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
