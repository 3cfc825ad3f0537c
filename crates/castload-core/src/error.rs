//! Errors surfaced by the resolve / fetch / detect pipeline.

use thiserror::Error;

/// Fixed message for every content that is neither asciicast v1 nor v2.
pub const FORMAT_ERROR: &str = "only asciicast v1 and v2 formats can be opened";

/// Message used when an HTML page carries no asciicast discovery link.
pub const LINK_NOT_FOUND: &str = "<link rel=\"alternate\" type=\"application/asciicast+json\" href=\"...\"> not found in fetched HTML document";

/// Failure to open a recording source.
///
/// Transport covers everything that prevents obtaining the text (filesystem,
/// HTTP, decoding, missing discovery link) and keeps the underlying message.
/// Format is deliberately coarse: malformed JSON and an unknown version look
/// the same to the caller.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Transport(String),
    #[error("only asciicast v1 and v2 formats can be opened")]
    Format,
}

impl LoadError {
    pub fn is_transport(&self) -> bool {
        matches!(self, LoadError::Transport(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, LoadError::Format)
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Transport(e.to_string())
    }
}

impl From<curl::Error> for LoadError {
    fn from(e: curl::Error) -> Self {
        LoadError::Transport(e.to_string())
    }
}
