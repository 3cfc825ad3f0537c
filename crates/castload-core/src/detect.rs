//! Format detection: v2 header line first, whole-document v1 as fallback.

use std::io::{BufRead, Read};

use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::fetch::SourceStream;
use crate::recording::Recording;
use crate::{v1, v2};

/// Format-specific loaders the detector hands off to.
pub trait Loader {
    type Output;

    /// Called with the attributes of a whole v1 document.
    fn load_v1(&self, attributes: Map<String, Value>) -> Result<Self::Output, LoadError>;

    /// Called with the parsed header line and the stream positioned after it.
    fn load_v2(
        &self,
        header: Map<String, Value>,
        rest: SourceStream,
    ) -> Result<Self::Output, LoadError>;
}

/// The built-in v1/v2 loaders.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciicastLoader;

impl Loader for AsciicastLoader {
    type Output = Recording;

    fn load_v1(&self, attributes: Map<String, Value>) -> Result<Recording, LoadError> {
        v1::load(attributes).map(Recording::V1)
    }

    fn load_v2(&self, header: Map<String, Value>, rest: SourceStream) -> Result<Recording, LoadError> {
        v2::load(header, rest).map(Recording::V2)
    }
}

/// Detects the format of `stream` and loads it with the built-in loaders.
pub fn detect_and_load(stream: SourceStream) -> Result<Recording, LoadError> {
    detect_and_load_with(stream, &AsciicastLoader)
}

/// Detects the format of `stream` and dispatches to `loader`.
///
/// The first line is tried as a v2 header. Only if it is not valid JSON is
/// the whole content (that line plus the rest of the stream) tried as a v1
/// document. A valid JSON first line with any version other than 2 is a
/// format error, even when the document would be valid v1.
pub fn detect_and_load_with<L: Loader>(
    mut stream: SourceStream,
    loader: &L,
) -> Result<L::Output, LoadError> {
    let mut first_line = String::new();
    stream.read_line(&mut first_line)?;

    match serde_json::from_str::<Value>(&first_line) {
        Ok(Value::Object(header)) if version(&header) == Some(2.0) => {
            tracing::debug!("{}: asciicast v2", stream.origin());
            loader.load_v2(header, stream)
        }
        Ok(other) => {
            tracing::debug!(
                "{}: header line is JSON but not a v2 header (version {:?})",
                stream.origin(),
                other.get("version")
            );
            Err(LoadError::Format)
        }
        Err(e) => {
            tracing::debug!(
                "{}: header line is not JSON ({}), trying v1",
                stream.origin(),
                e
            );
            let mut content = first_line;
            stream.read_to_string(&mut content)?;
            let origin = stream.origin().to_string();
            drop(stream);

            match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(attributes)) if version(&attributes) == Some(1.0) => {
                    tracing::debug!("{}: asciicast v1", origin);
                    loader.load_v1(attributes)
                }
                Ok(_) => {
                    tracing::debug!("{}: document is JSON but not v1", origin);
                    Err(LoadError::Format)
                }
                Err(e) => {
                    tracing::debug!("{}: document is not JSON ({})", origin, e);
                    Err(LoadError::Format)
                }
            }
        }
    }
}

fn version(doc: &Map<String, Value>) -> Option<f64> {
    doc.get("version").and_then(Value::as_f64)
}
