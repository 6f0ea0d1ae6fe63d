use super::action::{Action, ActionKind, ClipRegion};
use super::block::{Block, Line};
use super::frames::{FrameTracker, PAGE};
use super::literal::js_string;
use super::postprocess;
use crate::config::GenerationOptions;
use crate::recording::Event;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Per-run generation state. One session turns one event list into one
/// block list; nothing carries over between sessions.
pub struct Session<'o> {
    options: &'o GenerationOptions,
    frames: FrameTracker,
    blocks: Vec<Block>,
    screenshot_counter: u32,
    has_navigation: bool,
}

impl<'o> Session<'o> {
    pub fn new(options: &'o GenerationOptions) -> Self {
        Self {
            options,
            frames: FrameTracker::new(),
            blocks: Vec::new(),
            screenshot_counter: 1,
            has_navigation: false,
        }
    }

    /// Handle every event, then post-process. Returns the final block list.
    pub fn run(mut self, events: &[Event]) -> Vec<Block> {
        debug!("generating code for {} events", events.len());
        for event in events {
            self.handle(event);
        }
        self.finish()
    }

    /// Handle one event, appending its block if it produces one.
    pub fn handle(&mut self, event: &Event) {
        // Frame context is tracked even for events that end up dropped.
        self.frames.set_frame(event.frame_id, event.frame_url.as_deref());

        let Some(action) = Action::classify(event) else {
            debug!("dropping {} event", event.action);
            return;
        };
        trace!("handling {} in {}", action.kind(), self.frames.frame());

        let block = match action {
            Action::Click { selector, mark } => self.click(selector, mark),
            Action::Input { selector, value } => self.input(selector, &value),
            Action::KeyDown { key } => self.key_down(key),
            Action::Change { selector, value } => self.change(selector, &value),
            Action::Goto { href } => self.goto(href),
            Action::Viewport { width, height } => self.viewport(&width, &height),
            Action::Navigation => {
                self.has_navigation = true;
                self.wait_for_navigation()
            }
            Action::Screenshot(region) => self.screenshot(region.as_ref()),
        };
        self.blocks.push(block);
    }

    /// Add the navigation promise declaration and run the post-processing
    /// passes.
    pub fn finish(mut self) -> Vec<Block> {
        if self.has_navigation && self.options.wait_for_navigation {
            debug!("adding navigationPromise declaration");
            let declaration = self.block_with(
                ActionKind::NavigationPromise,
                format!("const navigationPromise = {}.waitForNavigation()", PAGE),
            );
            self.blocks.insert(0, declaration);
        }

        debug!("post processing {} blocks", self.blocks.len());
        let mut pending = self.frames.take_registry();
        if !pending.is_empty() {
            let escape = self.options.escape_strings;
            postprocess::inject_frames(&mut self.blocks, &mut pending, escape);
        }
        if self.options.blank_lines_between_blocks {
            postprocess::add_blank_lines(&mut self.blocks);
        }
        self.blocks
    }

    fn esc<'s>(&self, raw: &'s str) -> Cow<'s, str> {
        js_string(raw, self.options.escape_strings)
    }

    fn block(&self) -> Block {
        Block::new(self.frames.frame_id())
    }

    fn block_with(&self, kind: ActionKind, text: String) -> Block {
        Block::with_line(self.frames.frame_id(), Line::new(kind, text))
    }

    fn click(&self, selector: &str, mark: Option<&str>) -> Block {
        let frame = self.frames.frame();
        let selector = self.esc(selector);
        let mut block = self.block();
        if self.options.wait_for_selector_on_click {
            let mark = self.esc(mark.unwrap_or("undefined"));
            block.push(Line::new(
                ActionKind::Click,
                format!(
                    "log(`[clicking]{} `);\nawait waitElementVisiable({},'{}');",
                    mark, PAGE, selector
                ),
            ));
        }
        block.push(Line::new(
            ActionKind::Click,
            format!("await {}.click('{}');\nawait sleep(1*Speed)", frame, selector),
        ));
        block
    }

    fn input(&self, selector: &str, value: &str) -> Block {
        let frame = self.frames.frame();
        let selector = self.esc(selector);
        let mut block = self.block();
        if self.options.wait_for_selector_on_click {
            block.push(Line::new(
                ActionKind::Input,
                format!("await {}.waitForSelector('{}')", frame, selector),
            ));
        }
        block.push(Line::new(
            ActionKind::Input,
            format!("await {}.type('{}','{}')", frame, selector, self.esc(value)),
        ));
        block
    }

    fn key_down(&self, key: &str) -> Block {
        self.block_with(
            ActionKind::KeyDown,
            format!(
                "await {}.keyboard.press('{}');\nawait sleep(0.5*Speed)",
                self.frames.frame(),
                self.esc(key)
            ),
        )
    }

    fn change(&self, selector: &str, value: &str) -> Block {
        self.block_with(
            ActionKind::Change,
            format!(
                "await {}.select('{}', '{}')",
                self.frames.frame(),
                self.esc(selector),
                self.esc(value)
            ),
        )
    }

    // Navigation always goes through the test context on the top page.
    fn goto(&self, href: &str) -> Block {
        self.block_with(
            ActionKind::Goto,
            format!(
                "await {}.evaluate(`window.__testContext__.goto('{}')`)\nawait sleep(2);",
                PAGE,
                self.esc(href)
            ),
        )
    }

    fn viewport(&self, width: &str, height: &str) -> Block {
        self.block_with(
            ActionKind::Viewport,
            format!(
                "await {}.setViewport({{ width: {}, height: {} }})",
                self.frames.frame(),
                width,
                height
            ),
        )
    }

    fn wait_for_navigation(&self) -> Block {
        let mut block = self.block();
        if self.options.wait_for_navigation {
            block.push(Line::new(ActionKind::Navigation, "await navigationPromise"));
        }
        block
    }

    fn screenshot(&mut self, region: Option<&ClipRegion>) -> Block {
        let path = format!("screenshot_{}.png", self.screenshot_counter);
        self.screenshot_counter += 1;

        let frame = self.frames.frame();
        let text = match region {
            Some(clip) => format!(
                "await {}.screenshot({{ path: '{}', clip: {{ x: {}, y: {}, width: {}, height: {} }} }})",
                frame, path, clip.x, clip.y, clip.width, clip.height
            ),
            None => format!("await {}.screenshot({{ path: '{}' }})", frame, path),
        };
        self.block_with(ActionKind::Screenshot, text)
    }
}
