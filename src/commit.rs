//! Commit coordinator - apply effects, swap buffers.
//!
//! The commit is the one point where the working tree becomes the
//! persistent tree. Until the swap, the committed tree is never touched;
//! after it, the old committed tree is the spare buffer for the next
//! render.

use crate::fiber::{FiberArena, FiberRoot};
use crate::host::HostConfig;
use crate::lanes::{Lanes, remove_lanes};
use crate::types::Flags;

/// Commit a finished working tree, if one is waiting.
///
/// Takes `finished_work` immediately (single-use handoff), runs the host's
/// mutation pass only when the finished root's own or subtree flags carry a
/// mutation-relevant bit, then swaps `current` unconditionally: a render
/// with no host mutations still produced new memoized input. The lanes the
/// render resolved are cleared from `pending_lanes` at the swap.
pub(crate) fn commit_root<H: HostConfig>(
    arena: &mut FiberArena<H::Props>,
    host: &mut H,
    root: &mut FiberRoot,
) {
    let Some(finished) = root.finished_work.take() else {
        return;
    };

    let node = arena.node(finished);
    let needs_mutation = (node.flags | node.subtree_flags).intersects(Flags::MUTATION_MASK);
    if needs_mutation {
        host.commit_mutation_effects(arena, finished);
    }

    root.current = finished;
    root.pending_lanes = remove_lanes(root.pending_lanes, root.finished_lanes);
    root.finished_lanes = Lanes::empty();
}
