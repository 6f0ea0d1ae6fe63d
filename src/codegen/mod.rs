//! Turns a recorded event list into puppeteer statements.
//!
//! Each event is classified into an [`Action`], handled into a [`Block`]
//! against the frame it was recorded in, and the block list is then
//! post-processed (frame lookups, spacing) and rendered into a template.

pub mod action;
pub mod block;
pub mod frames;
pub mod handlers;
pub mod literal;
pub mod postprocess;

pub use action::{Action, ActionKind, ClipRegion, REPLAYABLE_KEYS};
pub use block::{Block, Line};
pub use frames::FrameTracker;
pub use handlers::Session;

use crate::config::GenerationOptions;
use crate::recording::{Event, Recording};
use serde_json::Value;

const IMPORT_PUPPETEER: &str = "const puppeteer = require('puppeteer');\n";

const HEADER: &str = "const browser = await puppeteer.launch()
const page = await browser.newPage()
";

const FOOTER: &str = "await browser.close()\n";

const WRAPPED_HEADER: &str = "(async () => {
  const browser = await puppeteer.launch()
  const page = await browser.newPage()
";

const WRAPPED_FOOTER: &str = "  await browser.close()
})()
";

/// Generates replay scripts from recordings.
///
/// A generator only holds options; every call runs in a fresh
/// [`Session`], so the same inputs always give the same text.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GenerationOptions,
}

impl Generator {
    pub fn new(options: GenerationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Build the post-processed block list for `events`.
    pub fn blocks(&self, events: &[Event]) -> Vec<Block> {
        Session::new(&self.options).run(events)
    }

    /// Render blocks as indented text. Every statement in a line gets its
    /// own indented output line; blank lines stay bare.
    pub fn render(&self, blocks: &[Block]) -> String {
        let indent = self.options.indent();
        let mut out = String::new();
        for line in blocks.iter().flat_map(|b| b.lines()) {
            if line.kind.is_none() {
                out.push('\n');
                continue;
            }
            for statement in line.text.split('\n') {
                out.push_str(indent);
                out.push_str(statement);
                out.push('\n');
            }
        }
        out
    }

    /// Generate a test case function that replays `events` with the
    /// captured `network` traffic mocked.
    pub fn generate(&self, events: &[Event], network: &Value) -> String {
        let body = self.render(&self.blocks(events));
        test_case(&body, &network.to_string())
    }

    /// Generate a test case from a stored recording.
    pub fn generate_recording(&self, recording: &Recording) -> String {
        self.generate(&recording.recording, &recording.network)
    }

    /// Generate a standalone puppeteer program that launches its own browser.
    pub fn generate_program(&self, events: &[Event]) -> String {
        let body = self.render(&self.blocks(events));
        let mut out = String::from(IMPORT_PUPPETEER);
        out.push_str(&self.header());
        out.push_str(&body);
        out.push_str(self.footer());
        out
    }

    fn header(&self) -> String {
        let header = if self.options.wrap_async {
            WRAPPED_HEADER
        } else {
            HEADER
        };
        if self.options.headless {
            header.to_string()
        } else {
            header.replace("launch()", "launch({ headless: false })")
        }
    }

    fn footer(&self) -> &'static str {
        if self.options.wrap_async {
            WRAPPED_FOOTER
        } else {
            FOOTER
        }
    }
}

/// The test case template the replay harness loads. `openIntercepRequest`,
/// `waitElementVisiable`, `sleep`, `Speed` and `log` are provided by the
/// harness.
fn test_case(body: &str, network: &str) -> String {
    format!(
        "
async function testCaseXXXX(page) :Promise<VoidFunc> {{

  let clean = await openIntercepRequest(page,()=>neworkMock);
  async function TestCase () {{
    {body} \n    await clean();
  }}
  var neworkMock ={network};
  return TestCase;
  }}
    "
    )
}
