//! Locator normalization: stdin marker, content-addressed schemes, URLs, paths.

use std::path::PathBuf;

/// Gateway used for `ipfs:/` and `fs:/` locators.
pub const DEFAULT_IPFS_GATEWAY: &str = "https://gateway.ipfs.io/";

/// Locator that selects standard input.
pub const STDIN_MARKER: &str = "-";

/// Where the bytes of a recording come from, after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Stdin,
    Url(String),
    Path(PathBuf),
}

impl Target {
    /// Classifies an already-normalized target string.
    ///
    /// Only `-`, `http:` and `https:` are recognized; everything else is a
    /// local path taken verbatim.
    pub fn classify(target: &str) -> Target {
        if target == STDIN_MARKER {
            Target::Stdin
        } else if is_web_url(target) {
            Target::Url(target.to_string())
        } else {
            Target::Path(PathBuf::from(target))
        }
    }
}

/// Rewrites `ipfs:/` and `fs:/` locators onto the default gateway.
///
/// - `resolve("ipfs:/bafy/rec.cast")` → `"https://gateway.ipfs.io/bafy/rec.cast"`
/// - `resolve("-")` → `"-"`
pub fn resolve(locator: &str) -> String {
    resolve_with_gateway(locator, DEFAULT_IPFS_GATEWAY)
}

/// Like [`resolve`] with a custom gateway base. A missing trailing slash on
/// `gateway` is added.
pub fn resolve_with_gateway(locator: &str, gateway: &str) -> String {
    let rest = if let Some(rest) = locator.strip_prefix("ipfs:/") {
        rest
    } else if let Some(rest) = locator.strip_prefix("fs:/") {
        rest
    } else {
        return locator.to_string();
    };

    let mut url = String::with_capacity(gateway.len() + rest.len() + 1);
    url.push_str(gateway);
    if !gateway.ends_with('/') {
        url.push('/');
    }
    url.push_str(rest);
    tracing::debug!("rewrote {} to gateway url {}", locator, url);
    url
}

/// Resolves and classifies in one step.
pub fn resolve_target(locator: &str, gateway: &str) -> Target {
    Target::classify(&resolve_with_gateway(locator, gateway))
}

pub(crate) fn is_web_url(s: &str) -> bool {
    s.starts_with("http:") || s.starts_with("https:")
}
