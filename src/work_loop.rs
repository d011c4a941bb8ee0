//! Work loop - the depth-first render walk.
//!
//! One render attempt is one depth-first pass over the working tree,
//! alternating a top-down begin phase and a bottom-up complete phase:
//!
//! ```text
//! Idle ──prepare──▶ Descending ──begin returns child──▶ Descending
//!                        │ begin returns None
//!                        ▼
//!                   Ascending ──sibling──▶ Descending
//!                        │ no sibling: complete parent, keep ascending
//!                        ▼ past the root
//!                      Idle (tree exhausted)
//! ```
//!
//! The attempt's only state is the cursor: the next node to process. It
//! lives in a [`RenderAttempt`] scoped to a single perform-work call, so a
//! half-built walk can be discarded by dropping the value; nothing global
//! needs repair.

use crate::fiber::{FiberArena, FiberId, FiberRoot};
use crate::host::{HostConfig, WorkError};

// =============================================================================
// Render Attempt
// =============================================================================

/// State of one in-flight render attempt.
pub(crate) struct RenderAttempt {
    /// The next node to process, or `None` when the walk is exhausted.
    cursor: Option<FiberId>,
}

/// How a render attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenderOutcome {
    /// The walk ran to exhaustion; the working tree is complete.
    Finished,
    /// A handler failed. The working tree is abandoned, the committed tree
    /// untouched.
    Aborted,
}

/// Point the cursor at the working copy of the root fiber.
///
/// Called exactly once per render attempt, before the loop runs.
pub(crate) fn prepare_fresh_stack<P: Clone>(
    arena: &mut FiberArena<P>,
    root: &FiberRoot,
) -> RenderAttempt {
    let pending = arena.node(root.current).pending_props.clone();
    let work_in_progress = arena.create_work_in_progress(root.current, pending);
    RenderAttempt {
        cursor: Some(work_in_progress),
    }
}

/// Run one render attempt to completion or abandonment.
///
/// A handler failure discards the cursor and reports [`RenderOutcome::Aborted`];
/// the attempt is not retried. The caller only hands the working tree to the
/// commit coordinator on [`RenderOutcome::Finished`], so an abandoned walk can
/// never leak a partial tree.
pub(crate) fn render_root_sync<H: HostConfig>(
    arena: &mut FiberArena<H::Props>,
    host: &mut H,
    root: &FiberRoot,
) -> RenderOutcome {
    let mut attempt = prepare_fresh_stack(arena, root);
    match work_loop(arena, host, &mut attempt) {
        Ok(()) => RenderOutcome::Finished,
        Err(err) => {
            attempt.cursor = None;
            log::error!("render attempt abandoned: {err}");
            RenderOutcome::Aborted
        }
    }
}

// =============================================================================
// The Loop
// =============================================================================

fn work_loop<H: HostConfig>(
    arena: &mut FiberArena<H::Props>,
    host: &mut H,
    attempt: &mut RenderAttempt,
) -> Result<(), WorkError> {
    while let Some(unit) = attempt.cursor {
        attempt.cursor = perform_unit_of_work(arena, host, unit)?;
    }
    Ok(())
}

/// Begin-phase visit of one node. Returns the next cursor position.
fn perform_unit_of_work<H: HostConfig>(
    arena: &mut FiberArena<H::Props>,
    host: &mut H,
    unit: FiberId,
) -> Result<Option<FiberId>, WorkError> {
    let next = host.begin_work(arena, unit)?;

    // This node's input is consumed as soon as begin work returns, before
    // the descend/retreat branch is taken.
    let node = arena.node_mut(unit);
    node.memoized_props = Some(node.pending_props.clone());

    match next {
        Some(child) => Ok(Some(child)),
        None => complete_unit_of_work(arena, host, unit),
    }
}

/// Complete-phase retreat starting at a node with no more children.
///
/// Completes the node, then its ancestors, until a sibling resumes the
/// descent or the retreat moves past the root.
fn complete_unit_of_work<H: HostConfig>(
    arena: &mut FiberArena<H::Props>,
    host: &mut H,
    from: FiberId,
) -> Result<Option<FiberId>, WorkError> {
    let mut completed = from;
    loop {
        host.complete_work(arena, completed)?;

        let node = arena.node(completed);
        if let Some(sibling) = node.sibling {
            return Ok(Some(sibling));
        }
        match node.parent {
            Some(parent) => completed = parent,
            None => return Ok(None),
        }
    }
}
