//! Format-agnostic view of a loaded recording.

use std::collections::HashMap;

use crate::error::LoadError;
use crate::v1::V1Recording;
use crate::v2::V2Recording;

/// Recording metadata common to both formats.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Header {
    pub version: u8,
    /// Terminal width in columns.
    pub width: u32,
    /// Terminal height in rows.
    pub height: u32,
    /// Unix time of the recording start (v2 only).
    pub timestamp: Option<i64>,
    /// Total duration in seconds.
    pub duration: Option<f64>,
    pub idle_time_limit: Option<f64>,
    pub command: Option<String>,
    pub title: Option<String>,
    pub env: HashMap<String, String>,
}

/// Drops variables recorded as `null` (unset in the recording shell).
pub(crate) fn present_env(env: HashMap<String, Option<String>>) -> HashMap<String, String> {
    env.into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
}

/// One timed event. `time` is seconds since the start of the recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub time: f64,
    /// Event type: `o` (output), `i` (input), `m` (marker), `r` (resize).
    pub code: String,
    pub data: String,
}

impl Event {
    pub fn output(time: f64, data: impl Into<String>) -> Self {
        Self {
            time,
            code: "o".to_string(),
            data: data.into(),
        }
    }

    pub fn is_output(&self) -> bool {
        self.code == "o"
    }
}

/// A recording loaded from either supported format.
///
/// A v2 recording keeps the source stream open and reads events from it on
/// demand; dropping the recording closes the stream.
#[derive(Debug)]
pub enum Recording {
    V1(V1Recording),
    V2(V2Recording),
}

impl Recording {
    pub fn version(&self) -> u8 {
        self.header().version
    }

    pub fn header(&self) -> &Header {
        match self {
            Recording::V1(r) => r.header(),
            Recording::V2(r) => r.header(),
        }
    }

    /// Iterates the events in file order.
    ///
    /// For v2 this consumes the underlying stream: a second call resumes where
    /// the first one stopped.
    pub fn events(&mut self) -> Box<dyn Iterator<Item = Result<Event, LoadError>> + '_> {
        match self {
            Recording::V1(r) => Box::new(r.events().iter().cloned().map(Ok::<Event, LoadError>)),
            Recording::V2(r) => Box::new(r.events()),
        }
    }
}
