use anyhow::{Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::Config;

/// Install the global subscriber writing to a daily rolling file.
///
/// Keep the returned guard alive for as long as logs should be flushed.
/// Fails if a global subscriber is already set.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let file_appender = rolling::daily(&config.log_dir, &config.log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::info!(log_dir = %config.log_dir, "Logging initialised");
    Ok(guard)
}
