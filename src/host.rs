//! Host interface - the capabilities the engine consumes.
//!
//! The engine owns walk order, priority bookkeeping, and the commit
//! handoff; everything that knows what a node *means* lives behind
//! [`HostConfig`]: how a node's children are diffed, what host mutations the
//! accumulated flags translate to, and how a callback reaches the host's
//! microtask/macrotask machinery.

use thiserror::Error;

use crate::fiber::{FiberArena, FiberId, RootId};
use crate::lanes::SchedulerPriority;

// =============================================================================
// Work Error
// =============================================================================

/// Failure raised by a host handler during a render attempt.
///
/// Aborts the attempt: the engine discards the in-progress cursor, leaves
/// the committed tree and the pending lanes untouched, and surfaces the
/// error as a diagnostic only. It never crosses the public scheduling
/// boundary.
#[derive(Debug, Clone, Error)]
#[error("work failed at fiber {fiber:?}: {reason}")]
pub struct WorkError {
    /// The node whose handler failed.
    pub fiber: FiberId,
    /// Host-supplied description.
    pub reason: String,
}

impl WorkError {
    /// A new handler failure for `fiber`.
    pub fn new(fiber: FiberId, reason: impl Into<String>) -> Self {
        WorkError {
            fiber,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Host Configuration
// =============================================================================

/// Externally supplied reconciliation logic and scheduling primitives.
///
/// Handlers receive the arena because reconciling a node means creating or
/// reusing its children there. They must confine mutation to the given node
/// and its descendants; the walk above the node is engine state.
pub trait HostConfig {
    /// The host's per-node input payload.
    type Props: Clone;

    /// Top-down visit of one node with fresh `pending_props`.
    ///
    /// Decides what children must exist for the new shape and returns the
    /// first child to descend into, or `None` if the node is a leaf for
    /// this pass.
    fn begin_work(
        &mut self,
        arena: &mut FiberArena<Self::Props>,
        fiber: FiberId,
    ) -> Result<Option<FiberId>, WorkError>;

    /// Bottom-up visit of one node after all its children completed.
    ///
    /// Expected to finalize the node's own effect flags and union the
    /// children's accumulated flags into its `subtree_flags`.
    fn complete_work(
        &mut self,
        arena: &mut FiberArena<Self::Props>,
        fiber: FiberId,
    ) -> Result<(), WorkError>;

    /// Apply every host-level structural mutation implied by the flags
    /// accumulated on the finished tree rooted at `finished`.
    fn commit_mutation_effects(&mut self, arena: &mut FiberArena<Self::Props>, finished: FiberId);

    /// Arrange for the engine's synchronous queue to be flushed at the next
    /// microtask-equivalent turn of the host's execution model: the host
    /// must call [`Reconciler::flush_sync_work`](crate::Reconciler::flush_sync_work)
    /// there. Requested at most once per boundary.
    fn schedule_microtask(&mut self);

    /// Arrange for deferred work on `root` through a yieldable scheduling
    /// primitive at the given priority: the host later calls
    /// [`Reconciler::perform_work_on_root`](crate::Reconciler::perform_work_on_root).
    fn schedule_task(&mut self, root: RootId, priority: SchedulerPriority);
}
