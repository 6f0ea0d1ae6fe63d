pub mod recorder;

pub use recorder::{Recorder, SenderFrame};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Identifier of a browsing context. `0` is the top-level page.
pub type FrameId = u32;

/// One recorded interaction, as written by the capture layer.
///
/// Only `action` is required. Everything else depends on the action:
/// `value` is typed text, a key name, a `{width, height}` pair or a
/// screenshot region; `href` only comes with `goto`; `tagName` only with
/// `change`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<FrameId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_url: Option<String>,
    /// Free-form marker the click handler echoes in its log line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
}

impl Event {
    /// Create an event with just an action tag.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Default::default()
        }
    }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = Some(tag.into());
        self
    }

    pub fn frame(mut self, id: FrameId, url: impl Into<String>) -> Self {
        self.frame_id = Some(id);
        self.frame_url = Some(url.into());
        self
    }

    pub fn mark(mut self, mark: impl Into<String>) -> Self {
        self.mark = Some(mark.into());
        self
    }

    /// The value as it would appear when spliced into a JS template:
    /// strings verbatim, missing values as `undefined`, anything else as JSON.
    pub fn value_text(&self) -> String {
        value_text(self.value.as_ref())
    }
}

/// Render an optional JSON value the way string interpolation would.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) => "null".to_string(),
        Some(other) => other.to_string(),
    }
}

/// A stored recording: the event list plus the captured network map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub recording: Vec<Event>,
    #[serde(default)]
    pub network: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordingFile {
    Full(Recording),
    Events(Vec<Event>),
}

impl Recording {
    /// Load a recording from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a recording. Accepts either `{"recording": [...], "network": ...}`
    /// or a bare array of events.
    pub fn parse(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() && !value.is_array() {
            return Err(Error::Recording(
                "expected an object or an array of events".into(),
            ));
        }
        let recording = match serde_json::from_value(value)? {
            RecordingFile::Full(r) => r,
            RecordingFile::Events(recording) => Recording {
                recording,
                network: Value::Null,
            },
        };
        Ok(recording)
    }

    /// Number of entries in the network map.
    pub fn network_entries(&self) -> usize {
        match &self.network {
            Value::Object(map) => map.values().map(network_entry_len).sum(),
            _ => 0,
        }
    }
}

fn network_entry_len(v: &Value) -> usize {
    v.as_array().map(|a| a.len()).unwrap_or(1)
}
