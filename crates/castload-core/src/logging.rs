//! Logging init (file under XDG state dir, stderr fallback) and the
//! per-source span every pipeline event is recorded under.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Span;
use tracing_subscriber::EnvFilter;

use crate::locator::Target;

const DEFAULT_FILTER: &str = "info,castload=debug,castload_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize structured logging to `~/.local/state/castload/castload.log`.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("castload")?;
    let log_dir = xdg_dirs.get_state_home();

    fs::create_dir_all(&log_dir)?;
    let log_file_path: PathBuf = log_dir.join("castload.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!("castload logging initialized at {}", log_file_path.display());

    Ok(())
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

/// Span covering one resolve/fetch/detect run, so fetch and detection logs
/// carry the locator the user typed and what it resolved to.
pub fn source_span(locator: &str, target: &Target) -> Span {
    let (kind, location) = match target {
        Target::Stdin => ("stdin", "-".to_string()),
        Target::Url(url) => ("url", url.clone()),
        Target::Path(path) => ("path", path.display().to_string()),
    };
    tracing::info_span!("open_source", locator = %locator, kind, target = %location)
}
