//! Entry point: locator in, loaded recording out.

use crate::config::CastloadConfig;
use crate::detect::{detect_and_load_with, AsciicastLoader, Loader};
use crate::error::LoadError;
use crate::fetch::{fetch_target, FetchOptions};
use crate::locator::{resolve_target, DEFAULT_IPFS_GATEWAY};
use crate::logging::source_span;
use crate::recording::Recording;

/// Everything the pipeline can be tuned with.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Base URL that `ipfs:/` and `fs:/` locators are rewritten onto.
    pub gateway: String,
    pub fetch: FetchOptions,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            gateway: DEFAULT_IPFS_GATEWAY.to_string(),
            fetch: FetchOptions::default(),
        }
    }
}

impl SourceOptions {
    pub fn from_config(cfg: &CastloadConfig) -> Self {
        Self {
            gateway: cfg.ipfs_gateway.clone(),
            fetch: FetchOptions::from_config(cfg),
        }
    }
}

/// Opens the recording at `locator` with default options.
///
/// `locator` is `-` for stdin, an `ipfs:/` or `fs:/` reference, an
/// `http(s)` URL, or a local path. The source stream is closed on every
/// error path; on success it lives as long as the returned recording.
pub fn open_source(locator: &str) -> Result<Recording, LoadError> {
    open_source_with(locator, &SourceOptions::default())
}

pub fn open_source_with(locator: &str, opts: &SourceOptions) -> Result<Recording, LoadError> {
    open_source_using(locator, opts, &AsciicastLoader)
}

/// Runs resolve, fetch and detect, handing the content to `loader`.
pub fn open_source_using<L: Loader>(
    locator: &str,
    opts: &SourceOptions,
    loader: &L,
) -> Result<L::Output, LoadError> {
    let target = resolve_target(locator, &opts.gateway);
    let _span = source_span(locator, &target).entered();
    tracing::debug!("opening {:?}", target);
    let stream = fetch_target(target, &opts.fetch)?;
    detect_and_load_with(stream, loader)
}
