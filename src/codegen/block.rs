use super::action::ActionKind;
use crate::recording::FrameId;

/// One line of generated output. `kind` is `None` for structural lines
/// (blank spacing) that don't belong to any action. A line may hold a
/// short group of statements separated by `\n`, such as an action and the
/// pause that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: Option<ActionKind>,
    pub text: String,
}

impl Line {
    pub fn new(kind: ActionKind, text: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            text: text.into(),
        }
    }

    pub fn blank() -> Self {
        Self {
            kind: None,
            text: String::new(),
        }
    }
}

/// An ordered group of lines that run in the same frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    frame_id: FrameId,
    lines: Vec<Line>,
}

impl Block {
    pub fn new(frame_id: FrameId) -> Self {
        Self {
            frame_id,
            lines: Vec::new(),
        }
    }

    pub fn with_line(frame_id: FrameId, line: Line) -> Self {
        Self {
            frame_id,
            lines: vec![line],
        }
    }

    /// A spacer block holding a single blank line.
    pub fn blank() -> Self {
        Self::with_line(0, Line::blank())
    }

    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(|l| l.kind.is_none())
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn push_front(&mut self, line: Line) {
        self.lines.insert(0, line);
    }
}
