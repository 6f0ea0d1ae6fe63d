//! # eoka-codegen
//!
//! Turn recorded browser interactions into replayable puppeteer scripts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eoka_codegen::{GenerationOptions, Generator, Recording};
//!
//! # fn main() -> eoka_codegen::Result<()> {
//! let recording = Recording::load("recording.json")?;
//! let options = GenerationOptions::load("options.yaml")?;
//! let script = Generator::new(options).generate_recording(&recording);
//! println!("{}", script);
//! # Ok(())
//! # }
//! ```

mod codegen;
mod config;
mod recording;

pub use codegen::{
    Action, ActionKind, Block, ClipRegion, FrameTracker, Generator, Line, Session,
    REPLAYABLE_KEYS,
};
pub use config::GenerationOptions;
pub use recording::{Event, FrameId, Recorder, Recording, SenderFrame};

/// Result type for eoka-codegen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading options or recordings.
///
/// Generation itself never fails: unknown events are skipped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("recording error: {0}")]
    Recording(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
