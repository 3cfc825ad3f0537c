//! asciicast v2: a JSON header line followed by one JSON event per line.

use std::collections::HashMap;
use std::io::BufRead;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::fetch::SourceStream;
use crate::recording::{present_env, Event, Header};

#[derive(Debug, Deserialize)]
struct RawHeader {
    width: u32,
    height: u32,
    timestamp: Option<i64>,
    duration: Option<f64>,
    idle_time_limit: Option<f64>,
    command: Option<String>,
    title: Option<String>,
    #[serde(default)]
    env: HashMap<String, Option<String>>,
}

/// A v2 recording. Events are read lazily from the remaining stream.
#[derive(Debug)]
pub struct V2Recording {
    header: Header,
    stream: SourceStream,
}

impl V2Recording {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn events(&mut self) -> Events<'_> {
        Events {
            stream: &mut self.stream,
            line: String::new(),
        }
    }
}

/// Iterator over the event lines of a v2 stream. Blank lines are skipped.
pub struct Events<'a> {
    stream: &'a mut SourceStream,
    line: String,
}

impl Iterator for Events<'_> {
    type Item = Result<Event, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.stream.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }
            return Some(parse_event(line));
        }
    }
}

fn parse_event(line: &str) -> Result<Event, LoadError> {
    let (time, code, data): (f64, String, String) = serde_json::from_str(line).map_err(|e| {
        tracing::debug!("bad asciicast v2 event line {:?}: {}", line, e);
        LoadError::Format
    })?;
    Ok(Event { time, code, data })
}

/// Builds a recording from a parsed v2 header and the stream after it.
pub fn load(header: Map<String, Value>, rest: SourceStream) -> Result<V2Recording, LoadError> {
    let raw: RawHeader = serde_json::from_value(Value::Object(header)).map_err(|e| {
        tracing::debug!("asciicast v2 header rejected: {}", e);
        LoadError::Format
    })?;

    let header = Header {
        version: 2,
        width: raw.width,
        height: raw.height,
        timestamp: raw.timestamp,
        duration: raw.duration,
        idle_time_limit: raw.idle_time_limit,
        command: raw.command,
        title: raw.title,
        env: present_env(raw.env),
    };

    Ok(V2Recording {
        header,
        stream: rest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn load_reads_header_and_events() {
        let rest = SourceStream::from_text(
            "test",
            "[0.1, \"o\", \"hi\"]\n\n[0.2, \"i\", \"x\"]\n[1.0, \"m\", \"\"]\n",
        );
        let mut rec = load(
            header(json!({
                "version": 2, "width": 80, "height": 24,
                "timestamp": 1504467315, "idle_time_limit": 2.0,
                "env": {"TERM": "xterm"}, "theme": {"fg": "#fff"}
            })),
            rest,
        )
        .unwrap();

        assert_eq!(rec.header().version, 2);
        assert_eq!(rec.header().timestamp, Some(1504467315));
        assert_eq!(rec.header().idle_time_limit, Some(2.0));

        let events: Vec<Event> = rec.events().collect::<Result<_, _>>().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], Event::output(0.1, "hi"));
        assert_eq!(events[1].code, "i");
        assert_eq!(events[2].time, 1.0);
    }

    #[test]
    fn null_env_values_are_dropped() {
        let mut rec = load(
            header(json!({
                "version": 2, "width": 80, "height": 24,
                "env": {"SHELL": null, "TERM": "xterm"}
            })),
            SourceStream::from_text("t", "[0.1, \"o\", \"hi\"]\n"),
        )
        .unwrap();
        assert_eq!(rec.header().env.len(), 1);
        assert_eq!(rec.header().env.get("TERM").map(String::as_str), Some("xterm"));
        assert!(!rec.header().env.contains_key("SHELL"));
        assert_eq!(rec.events().count(), 1);
    }

    #[test]
    fn header_without_size_is_format_error() {
        let err = load(header(json!({"version": 2})), SourceStream::from_text("t", "")).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn malformed_event_line_is_format_error() {
        let mut rec = load(
            header(json!({"version": 2, "width": 1, "height": 1})),
            SourceStream::from_text("t", "[0.1, \"o\"]\n"),
        )
        .unwrap();
        let first = rec.events().next().unwrap();
        assert!(first.unwrap_err().is_format());
    }
}
