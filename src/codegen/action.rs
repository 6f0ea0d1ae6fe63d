use crate::recording::{value_text, Event};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Keys worth replaying as discrete key presses. Everything else typed
/// into a field is captured by the `input` event instead.
pub const REPLAYABLE_KEYS: &[&str] = &[
    "Tab",
    "Enter",
    "ArrowDown",
    "ArrowUp",
    "ArrowLeft",
    "ArrowRight",
    "Delete",
];

/// Tag name a `change` event must carry to be replayed as a select.
const SELECT_TAG: &str = "SELECT";

/// What a generated line was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Click,
    Input,
    KeyDown,
    Change,
    Goto,
    Viewport,
    Navigation,
    Screenshot,
    /// `const navigationPromise = ...` declaration.
    NavigationPromise,
    /// Frame lookup injected by post-processing.
    FrameSet,
}

impl ActionKind {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::KeyDown => "keydown",
            Self::Change => "change",
            Self::Goto => "goto*",
            Self::Viewport => "viewport*",
            Self::Navigation => "navigation*",
            Self::Screenshot => "screenshot*",
            Self::NavigationPromise => "navigation-promise*",
            Self::FrameSet => "frame-set*",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clip rectangle of a screenshot, unit suffixes already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRegion {
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
}

impl ClipRegion {
    /// Read a region from a recorded screenshot value. All four of
    /// `x`, `y`, `width` and `height` must be present and non-empty,
    /// otherwise the screenshot is taken full page.
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        let map = value?.as_object()?;
        let field = |name: &str| -> Option<String> {
            let v = map.get(name)?;
            if !is_truthy(v) {
                return None;
            }
            Some(strip_unit(&value_text(Some(v))))
        };
        Some(Self {
            x: field("x")?,
            y: field("y")?,
            width: field("width")?,
            height: field("height")?,
        })
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn unit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(-?(?:\d+\.?\d*|\.\d+))\s*[A-Za-z%]+\s*$").expect("valid unit regex")
    })
}

/// Drop a CSS unit suffix (`10px` -> `10`). Values that aren't a number
/// followed by a unit are returned unchanged.
pub fn strip_unit(raw: &str) -> String {
    match unit_re().captures(raw) {
        Some(caps) => caps[1].to_string(),
        None => raw.to_string(),
    }
}

/// A recorded event that will produce a statement block.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<'a> {
    Click {
        selector: &'a str,
        mark: Option<&'a str>,
    },
    Input {
        selector: &'a str,
        value: String,
    },
    KeyDown {
        key: &'a str,
    },
    Change {
        selector: &'a str,
        value: String,
    },
    Goto {
        href: &'a str,
    },
    Viewport {
        width: String,
        height: String,
    },
    Navigation,
    Screenshot(Option<ClipRegion>),
}

impl<'a> Action<'a> {
    /// Decide whether `event` yields a block. Unknown action tags, key
    /// presses outside [`REPLAYABLE_KEYS`] and `change` events on anything
    /// but a `<select>` give `None`.
    pub fn classify(event: &'a Event) -> Option<Self> {
        let selector = event.selector.as_deref().unwrap_or("undefined");
        let action = match event.action.as_str() {
            "click" => Action::Click {
                selector,
                mark: event.mark.as_deref(),
            },
            "input" => Action::Input {
                selector,
                value: event.value_text(),
            },
            "keydown" => {
                let key = event.value.as_ref().and_then(Value::as_str)?;
                if !REPLAYABLE_KEYS.contains(&key) {
                    return None;
                }
                Action::KeyDown { key }
            }
            "change" => {
                if event.tag_name.as_deref() != Some(SELECT_TAG) {
                    return None;
                }
                Action::Change {
                    selector,
                    value: event.value_text(),
                }
            }
            "goto" => Action::Goto {
                href: event.href.as_deref().unwrap_or("undefined"),
            },
            "viewport" => {
                let dims = event.value.as_ref();
                Action::Viewport {
                    width: value_text(dims.and_then(|v| v.get("width"))),
                    height: value_text(dims.and_then(|v| v.get("height"))),
                }
            }
            "navigation" => Action::Navigation,
            "screenshot" => Action::Screenshot(ClipRegion::from_value(event.value.as_ref())),
            _ => return None,
        };
        Some(action)
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Click { .. } => ActionKind::Click,
            Self::Input { .. } => ActionKind::Input,
            Self::KeyDown { .. } => ActionKind::KeyDown,
            Self::Change { .. } => ActionKind::Change,
            Self::Goto { .. } => ActionKind::Goto,
            Self::Viewport { .. } => ActionKind::Viewport,
            Self::Navigation => ActionKind::Navigation,
            Self::Screenshot(_) => ActionKind::Screenshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_action_dropped() {
        let event = Event::new("mouseover").selector("#menu");
        assert!(Action::classify(&event).is_none());
    }

    #[test]
    fn test_keydown_allow_list() {
        let enter = Event::new("keydown").value("Enter");
        assert!(matches!(
            Action::classify(&enter),
            Some(Action::KeyDown { key: "Enter" })
        ));

        let letter = Event::new("keydown").value("a");
        assert!(Action::classify(&letter).is_none());

        let missing = Event::new("keydown");
        assert!(Action::classify(&missing).is_none());
    }

    #[test]
    fn test_change_only_on_select() {
        let select = Event::new("change")
            .selector("#country")
            .value("US")
            .tag_name("SELECT");
        if let Some(Action::Change { selector, value }) = Action::classify(&select) {
            assert_eq!(selector, "#country");
            assert_eq!(value, "US");
        } else {
            panic!("Expected Change action");
        }

        let input = Event::new("change").selector("#name").tag_name("INPUT");
        assert!(Action::classify(&input).is_none());
        assert!(Action::classify(&Event::new("change")).is_none());
    }

    #[test]
    fn test_viewport_dimensions() {
        let event = Event::new("viewport").value(json!({ "width": 1280, "height": 720 }));
        if let Some(Action::Viewport { width, height }) = Action::classify(&event) {
            assert_eq!(width, "1280");
            assert_eq!(height, "720");
        } else {
            panic!("Expected Viewport action");
        }
    }

    #[test]
    fn test_clip_region_strips_units() {
        let value = json!({ "x": "10px", "y": "20px", "width": "30px", "height": "40px" });
        let region = ClipRegion::from_value(Some(&value)).unwrap();
        assert_eq!(region.x, "10");
        assert_eq!(region.y, "20");
        assert_eq!(region.width, "30");
        assert_eq!(region.height, "40");
    }

    #[test]
    fn test_clip_region_incomplete() {
        let value = json!({ "x": "10px", "y": "20px", "width": "30px" });
        assert!(ClipRegion::from_value(Some(&value)).is_none());

        let empty = json!({ "x": "", "y": "20px", "width": "30px", "height": "40px" });
        assert!(ClipRegion::from_value(Some(&empty)).is_none());

        assert!(ClipRegion::from_value(None).is_none());
    }

    #[test]
    fn test_clip_region_numeric_fields() {
        let value = json!({ "x": 5, "y": "7.5px", "width": 100, "height": "50%" });
        let region = ClipRegion::from_value(Some(&value)).unwrap();
        assert_eq!(region.x, "5");
        assert_eq!(region.y, "7.5");
        assert_eq!(region.width, "100");
        assert_eq!(region.height, "50");
    }

    #[test]
    fn test_strip_unit_leaves_other_text() {
        assert_eq!(strip_unit("12px"), "12");
        assert_eq!(strip_unit("12"), "12");
        assert_eq!(strip_unit("calc(1px)"), "calc(1px)");
    }
}
