//! Passes over the assembled block list, run after every event is handled.

use super::action::ActionKind;
use super::block::{Block, Line};
use super::frames::{frame_var, PAGE};
use super::literal::js_string;
use crate::recording::FrameId;
use std::collections::BTreeMap;
use tracing::debug;

/// Declare each pending frame right before the first block that runs in it.
///
/// Every frame gets exactly one `frames` handle + binder pair; the entry is
/// removed from `pending` once injected. Frames that no non-empty block
/// runs in are left in `pending` and never declared.
pub fn inject_frames(blocks: &mut [Block], pending: &mut BTreeMap<FrameId, String>, escape: bool) {
    for block in blocks.iter_mut() {
        if pending.is_empty() {
            break;
        }
        if block.is_empty() {
            continue;
        }
        let frame_id = block.frame_id();
        let Some(url) = pending.remove(&frame_id) else {
            continue;
        };
        debug!("declaring {} before first use", frame_var(frame_id));
        block.push_front(Line::new(
            ActionKind::FrameSet,
            format!(
                "const {} = frames.find(f => f.url() === '{}')",
                frame_var(frame_id),
                js_string(&url, escape)
            ),
        ));
        block.push_front(Line::new(
            ActionKind::FrameSet,
            format!("let frames = await {}.frames()", PAGE),
        ));
    }
}

/// Interleave blank blocks: `blank, B0, blank, B1, ..., Bn, blank`.
/// An empty list stays empty.
pub fn add_blank_lines(blocks: &mut Vec<Block>) {
    if blocks.is_empty() {
        return;
    }
    let original = std::mem::take(blocks);
    blocks.reserve(original.len() * 2 + 1);
    blocks.push(Block::blank());
    for block in original {
        blocks.push(block);
        blocks.push(Block::blank());
    }
}
