//! asciicast v1: one JSON document with all output frames inline.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::recording::{present_env, Event, Header};

#[derive(Debug, Deserialize)]
struct Attributes {
    width: u32,
    height: u32,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    env: HashMap<String, Option<String>>,
    /// `[delay, data]` pairs; delay is relative to the previous frame.
    stdout: Vec<(f64, String)>,
}

#[derive(Debug, Clone)]
pub struct V1Recording {
    header: Header,
    events: Vec<Event>,
}

impl V1Recording {
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Output events with absolute times.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

/// Builds a recording from parsed v1 attributes.
pub fn load(attributes: Map<String, Value>) -> Result<V1Recording, LoadError> {
    let attrs: Attributes = serde_json::from_value(Value::Object(attributes)).map_err(|e| {
        tracing::debug!("asciicast v1 attributes rejected: {}", e);
        LoadError::Format
    })?;

    let mut time = 0.0;
    let events: Vec<Event> = attrs
        .stdout
        .into_iter()
        .map(|(delay, data)| {
            time += delay;
            Event::output(time, data)
        })
        .collect();

    let header = Header {
        version: 1,
        width: attrs.width,
        height: attrs.height,
        timestamp: None,
        duration: attrs.duration.or(Some(time)),
        idle_time_limit: None,
        command: attrs.command,
        title: attrs.title,
        env: present_env(attrs.env),
    };

    Ok(V1Recording { header, events })
}
