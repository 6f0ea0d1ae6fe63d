use crate::recording::FrameId;
use std::collections::BTreeMap;

/// Handle of the top-level page in generated scripts.
pub const PAGE: &str = "page";

/// Variable name bound to the frame with the given id.
pub fn frame_var(frame_id: FrameId) -> String {
    format!("frame_{}", frame_id)
}

/// Tracks which frame the current event runs in and every frame URL seen
/// so far in the run.
#[derive(Debug, Clone)]
pub struct FrameTracker {
    frame_id: FrameId,
    frame: String,
    registry: BTreeMap<FrameId, String>,
}

impl Default for FrameTracker {
    fn default() -> Self {
        Self {
            frame_id: 0,
            frame: PAGE.to_string(),
            registry: BTreeMap::new(),
        }
    }
}

impl FrameTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to the frame an event came from. A missing or zero id means
    /// the top page. Repeated ids keep the most recent URL.
    pub fn set_frame(&mut self, frame_id: Option<FrameId>, frame_url: Option<&str>) {
        match frame_id {
            Some(id) if id != 0 => {
                self.frame_id = id;
                self.frame = frame_var(id);
                self.registry
                    .insert(id, frame_url.unwrap_or("undefined").to_string());
            }
            _ => {
                self.frame_id = 0;
                self.frame = PAGE.to_string();
            }
        }
    }

    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    /// Expression statements for the current frame should be issued against.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn registry(&self) -> &BTreeMap<FrameId, String> {
        &self.registry
    }

    /// Hand the registry over to post-processing.
    pub fn take_registry(&mut self) -> BTreeMap<FrameId, String> {
        std::mem::take(&mut self.registry)
    }
}
