//! Admission rules for building a recording from raw capture callbacks.
//!
//! The capture layer (content scripts, navigation listeners, the network
//! debugger) lives outside this crate. `Recorder` holds the bookkeeping it
//! needs: pause state, single-shot `goto`/`viewport` flags, frame stamping
//! and the network map. The generator relies on these rules having been
//! applied upstream.

use super::{Event, FrameId, Recording};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Action tags the recorder itself synthesizes.
pub mod actions {
    pub const GOTO: &str = "goto";
    pub const VIEWPORT: &str = "viewport";
    pub const NAVIGATION: &str = "navigation";
    pub const SCREENSHOT: &str = "screenshot";
}

/// The frame a captured event was sent from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderFrame {
    pub frame_id: FrameId,
    pub url: String,
}

impl SenderFrame {
    pub fn new(frame_id: FrameId, url: impl Into<String>) -> Self {
        Self {
            frame_id,
            url: url.into(),
        }
    }
}

/// Builds a [`Recording`] one callback at a time.
#[derive(Debug, Default)]
pub struct Recorder {
    recording: Vec<Event>,
    network: Map<String, Value>,
    /// requestId -> (network key, index in that key's list)
    pending: HashMap<String, (String, usize)>,
    paused: bool,
    has_goto: bool,
    has_viewport: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh session, dropping anything recorded so far.
    pub fn start(&mut self) {
        debug!("start recording");
        *self = Self::default();
    }

    pub fn pause(&mut self) {
        debug!("pause");
        self.paused = true;
    }

    pub fn resume(&mut self) {
        debug!("resume");
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn len(&self) -> usize {
        self.recording.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recording.is_empty()
    }

    /// Record an event sent from `sender`. Events without a sender lose any
    /// frame information they carried and are attributed to the top frame.
    pub fn record(&mut self, mut event: Event, sender: Option<&SenderFrame>) {
        event.frame_id = sender.map(|s| s.frame_id);
        event.frame_url = sender.map(|s| s.url.clone());

        if self.paused {
            debug!("paused, dropping {}", event.action);
            return;
        }
        self.recording.push(event);
    }

    /// Record the initial page URL. Only the first call per session counts;
    /// the capture layer reports it again on every page load.
    pub fn record_current_url(&mut self, href: impl Into<String>) {
        if self.has_goto {
            return;
        }
        let href = href.into();
        debug!("recording goto for: {}", href);
        self.record(Event::new(actions::GOTO).href(href), None);
        self.has_goto = true;
    }

    /// Record the initial viewport size. Only the first call per session counts.
    pub fn record_viewport(&mut self, width: u32, height: u32) {
        if self.has_viewport {
            return;
        }
        self.record(
            Event::new(actions::VIEWPORT).value(json!({ "width": width, "height": height })),
            None,
        );
        self.has_viewport = true;
    }

    /// Record a completed navigation. Sub-frame navigations are ignored.
    pub fn record_navigation(&mut self, frame_id: FrameId) {
        if frame_id != 0 {
            return;
        }
        self.record(Event::new(actions::NAVIGATION), None);
    }

    /// Record a screenshot request. `region` is the clip rectangle for
    /// clipped screenshots, `None` for full page.
    pub fn record_screenshot(&mut self, region: Option<Value>) {
        let mut event = Event::new(actions::SCREENSHOT);
        event.value = region;
        self.record(event, None);
    }

    /// Record an outgoing request under `"<url>:[<METHOD>]"`.
    pub fn record_request(&mut self, request_id: &str, url: &str, method: &str, request: Value) {
        let key = network_key(url, method);
        let entries = self
            .network
            .entry(key.clone())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(list) = entries {
            list.push(json!({
                "requestId": request_id,
                "request": request,
                "response": Value::Null,
            }));
            self.pending
                .insert(request_id.to_string(), (key, list.len() - 1));
        }
    }

    /// Attach a response to a previously recorded request. Unknown request
    /// ids are ignored. Fields of `body` are merged over `response`.
    pub fn record_response(&mut self, request_id: &str, response: Value, body: Value) {
        let Some((key, index)) = self.pending.remove(request_id) else {
            debug!("response for unknown request {}", request_id);
            return;
        };
        let merged = merge_objects(response, body);
        if let Some(entry) = self
            .network
            .get_mut(&key)
            .and_then(|v| v.as_array_mut())
            .and_then(|list| list.get_mut(index))
        {
            entry["response"] = merged;
        }
    }

    /// Finish the session and hand back what was recorded. Responses
    /// arriving after this point are dropped.
    pub fn stop(&mut self) -> Recording {
        debug!("stop recording, {} events", self.recording.len());
        self.pending.clear();
        Recording {
            recording: std::mem::take(&mut self.recording),
            network: Value::Object(std::mem::take(&mut self.network)),
        }
    }
}

fn network_key(url: &str, method: &str) -> String {
    format!("{}:[{}]", url, method)
}

fn merge_objects(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut a), Value::Object(b)) => {
            a.extend(b);
            Value::Object(a)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}
