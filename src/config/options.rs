use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_true() -> bool {
    true
}

/// Options controlling how a recording is turned into script text.
///
/// Key names follow the recorder's own option keys (`wrapAsync`,
/// `waitForNavigation`, ...) so an options file exported from the
/// recorder can be loaded as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerationOptions {
    /// Wrap the standalone program in an async IIFE and indent statements.
    #[serde(default = "default_true")]
    pub wrap_async: bool,

    /// Launch the browser headless. When false the launch call gets
    /// `{ headless: false }`.
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Declare a navigation promise and await it on every navigation event.
    #[serde(default = "default_true")]
    pub wait_for_navigation: bool,

    /// Wait for the target element before click, input and select actions.
    #[serde(default = "default_true")]
    pub wait_for_selector_on_click: bool,

    /// Separate statement blocks with blank lines.
    #[serde(default = "default_true")]
    pub blank_lines_between_blocks: bool,

    /// Attribute the capture layer prefers when building selectors.
    #[serde(default)]
    pub data_attribute: String,

    /// Escape recorded strings before splicing them into literals.
    #[serde(default)]
    pub escape_strings: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            wrap_async: true,
            headless: true,
            wait_for_navigation: true,
            wait_for_selector_on_click: true,
            blank_lines_between_blocks: true,
            data_attribute: String::new(),
            escape_strings: false,
        }
    }
}

impl GenerationOptions {
    /// Load options from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse options from a YAML string. Missing keys take their defaults.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        // A document holding only comments is a null value: all defaults.
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let options: GenerationOptions = if value.is_null() {
            Self::default()
        } else {
            serde_yaml::from_value(value)?
        };
        options.validate()?;
        Ok(options)
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<()> {
        if self
            .data_attribute
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '`'))
        {
            return Err(Error::Config(format!(
                "dataAttribute '{}' must be a bare attribute name",
                self.data_attribute
            )));
        }
        Ok(())
    }

    /// Indentation applied to every generated statement line.
    pub fn indent(&self) -> &'static str {
        if self.wrap_async {
            "  "
        } else {
            ""
        }
    }
}
