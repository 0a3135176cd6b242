use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use tracing::Subscriber;
use tracing_subscriber::{fmt, EnvFilter};
use zephyr_store::paths;

const DEFAULT_FILTER: &str = "warn";

/// Sends logs to `zephyr-tui.log` beside the database so they never draw over the form.
/// RUST_LOG replaces the default `warn` filter.
pub fn init(db_path: &Path) -> Result<()> {
    let log_path = paths::log_path_for(db_path);
    let file = paths::open_log_file(&log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing::subscriber::set_global_default(file_subscriber(file, filter));
    Ok(())
}

fn file_subscriber(file: File, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .finish()
}
