//! Reconciler - engine assembly and public entry points.
//!
//! Owns the arena, the root table, the synchronous task queue, and the
//! host. Everything here runs on one thread; every entry point takes
//! `&mut self`, so at most one walk is ever in flight and no locking
//! exists anywhere in the engine.
//!
//! # Data Flow
//!
//! ```text
//! schedule_update_on_fiber ── lanes merged onto the root
//!        └─▶ ensure_root_is_scheduled ── sync: queue + arm microtask
//!                                        other: hand task to the host
//! flush_sync_work / perform_work_on_root
//!        └─▶ perform_sync_work_on_root ── coalescing guard
//!                └─▶ render walk ──▶ commit ──▶ re-evaluate scheduling
//! ```

use crate::commit::commit_root;
use crate::fiber::{FiberArena, FiberId, FiberRoot, RootId};
use crate::host::HostConfig;
use crate::lanes::{Lanes, highest_priority_lane, lanes_to_priority, merge_lanes};
use crate::scheduler::{SyncQueue, SyncTask};
use crate::types::FiberTag;
use crate::work_loop::{RenderOutcome, render_root_sync};

// =============================================================================
// Options
// =============================================================================

/// Tunables for a [`Reconciler`].
#[derive(Debug, Clone)]
pub struct ReconcilerOptions {
    /// How many tasks beyond the queue length at flush start a single flush
    /// may drain before it assumes an update loop, drops the remainder, and
    /// logs an error.
    pub nested_update_limit: usize,
}

impl Default for ReconcilerOptions {
    fn default() -> Self {
        ReconcilerOptions {
            nested_update_limit: 50,
        }
    }
}

// =============================================================================
// Reconciler
// =============================================================================

/// The reconciliation engine.
///
/// Generic over the host configuration that supplies per-node begin and
/// complete handlers, the mutation pass, and the scheduling primitives.
pub struct Reconciler<H: HostConfig> {
    arena: FiberArena<H::Props>,
    roots: Vec<FiberRoot>,
    sync_queue: SyncQueue,
    options: ReconcilerOptions,
    host: H,
}

impl<H: HostConfig> Reconciler<H> {
    /// An engine with default options.
    pub fn new(host: H) -> Self {
        Self::with_options(host, ReconcilerOptions::default())
    }

    /// An engine with explicit options.
    pub fn with_options(host: H, options: ReconcilerOptions) -> Self {
        Reconciler {
            arena: FiberArena::new(),
            roots: Vec::new(),
            sync_queue: SyncQueue::new(),
            options,
            host,
        }
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    /// Mount a new tree: allocates the anchoring `HostRoot` fiber and its
    /// root ledger. The root lives for the tree's lifetime.
    pub fn create_root(&mut self, initial_props: H::Props) -> RootId {
        let root_id = RootId(self.roots.len());
        let fiber = self
            .arena
            .create_fiber(FiberTag::HostRoot, None, initial_props);
        self.arena.node_mut(fiber).root = Some(root_id);
        self.roots.push(FiberRoot::new(fiber));
        root_id
    }

    /// Stage new props on the root fiber and schedule a render for them.
    ///
    /// Several calls before the flush boundary overwrite each other's
    /// staged props; the single render that resolves them sees the last
    /// ones (merge-then-render).
    pub fn update_root(&mut self, root: RootId, props: H::Props, lanes: Lanes) {
        let current = self.roots[root.0].current;
        self.arena.node_mut(current).pending_props = props;
        self.schedule_update_on_fiber(current, lanes);
    }

    // =========================================================================
    // Scheduling Entry
    // =========================================================================

    /// Request work at `fiber` with the given priority.
    ///
    /// Walks up the tree to the anchoring root, merges the lanes there, and
    /// (re-)evaluates scheduling. A fiber that is not attached to a mounted
    /// tree has no scheduling target: the request is dropped without any
    /// signal to the caller.
    pub fn schedule_update_on_fiber(&mut self, fiber: FiberId, lanes: Lanes) {
        let Some(root) = self.mark_update_lane_from_fiber_to_root(fiber, lanes) else {
            log::debug!("update at {fiber:?} is not anchored at a mounted root; dropped");
            return;
        };
        let entry = &mut self.roots[root.0];
        entry.pending_lanes = merge_lanes(entry.pending_lanes, lanes);
        self.ensure_root_is_scheduled(root);
    }

    /// Tag the requesting fiber and resolve the root it hangs off, or
    /// `None` if the upward walk ends anywhere but a `HostRoot`.
    fn mark_update_lane_from_fiber_to_root(
        &mut self,
        fiber: FiberId,
        lanes: Lanes,
    ) -> Option<RootId> {
        let start = self.arena.try_node_mut(fiber)?;
        start.lanes = merge_lanes(start.lanes, lanes);

        let mut id = fiber;
        loop {
            let node = self.arena.try_node(id)?;
            match node.parent {
                Some(parent) => id = parent,
                None => {
                    return if node.tag == FiberTag::HostRoot {
                        node.root
                    } else {
                        None
                    };
                }
            }
        }
    }

    /// (Re-)evaluate how `root`'s pending work should reach a flush.
    ///
    /// Nothing pending is a no-op. Synchronous work is queued and the flush
    /// armed at the next microtask boundary; every call queues another
    /// entry, and the coalescing guard collapses them at flush time. Any
    /// other lane is handed to the host's yieldable primitive at the
    /// matching priority tier.
    pub fn ensure_root_is_scheduled(&mut self, root: RootId) {
        let next = highest_priority_lane(self.roots[root.0].pending_lanes);
        if next.is_empty() {
            return;
        }
        if next == Lanes::SYNC {
            self.sync_queue.push(SyncTask { root, lanes: next });
            if self.sync_queue.arm() {
                self.host.schedule_microtask();
            }
        } else {
            self.host.schedule_task(root, lanes_to_priority(next));
        }
    }

    // =========================================================================
    // Flush
    // =========================================================================

    /// Drain the synchronous task queue in FIFO order.
    ///
    /// The host calls this at the microtask boundary it was asked to arm.
    /// Entries appended while draining run in the same pass, up to the
    /// nested-update budget. Idempotent when the queue is empty.
    pub fn flush_sync_work(&mut self) {
        if self.sync_queue.is_empty() {
            self.sync_queue.disarm();
            return;
        }

        let budget = self.sync_queue.len() + self.options.nested_update_limit;
        let mut index = 0;
        while let Some(task) = self.sync_queue.get(index).copied() {
            if index >= budget {
                log::error!(
                    "sync queue kept growing while flushing ({} tasks drained); \
                     dropping {} remaining",
                    index,
                    self.sync_queue.len() - index
                );
                break;
            }
            index += 1;
            self.perform_sync_work_on_root(task.root, task.lanes);
        }

        self.sync_queue.clear();
        self.sync_queue.disarm();
    }

    /// Deferred-work entry point: the host calls this when a task handed to
    /// [`HostConfig::schedule_task`] fires. Renders at the then-highest
    /// pending lane.
    pub fn perform_work_on_root(&mut self, root: RootId) {
        let next = highest_priority_lane(self.roots[root.0].pending_lanes);
        if next.is_empty() {
            return;
        }
        self.render_and_commit(root, next);
    }

    /// Queued-task entry point for one synchronous render.
    ///
    /// Re-checks that `lanes` is still the highest pending priority. When a
    /// higher-priority render already consumed it (or nothing is pending at
    /// all) the call degrades to re-evaluating scheduling instead of
    /// rendering again; this is what keeps several same-turn requests at
    /// one observable render.
    pub fn perform_sync_work_on_root(&mut self, root: RootId, lanes: Lanes) {
        let next = highest_priority_lane(self.roots[root.0].pending_lanes);
        if next != lanes {
            self.ensure_root_is_scheduled(root);
            return;
        }
        self.render_and_commit(root, lanes);
    }

    fn render_and_commit(&mut self, root_id: RootId, lanes: Lanes) {
        let Self {
            arena, roots, host, ..
        } = self;
        let root = &mut roots[root_id.0];

        match render_root_sync(arena, host, root) {
            RenderOutcome::Finished => {
                // The finished working tree is the committed root's paired
                // buffer; hand it off and commit immediately.
                root.finished_work = Some(root.current.alternate());
                root.finished_lanes = lanes;
                commit_root(arena, host, root);
            }
            // Abandoned walk: committed tree and pending lanes are intact,
            // and no retry is scheduled.
            RenderOutcome::Aborted => return,
        }

        // Updates may have arrived (or lower lanes remained) while working.
        self.ensure_root_is_scheduled(root_id);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The ledger for `root`.
    pub fn root(&self, root: RootId) -> &FiberRoot {
        &self.roots[root.0]
    }

    /// The fiber arena.
    pub fn arena(&self) -> &FiberArena<H::Props> {
        &self.arena
    }

    /// Mutable access to the fiber arena, for hosts staging props or
    /// building detached fibers outside a walk.
    pub fn arena_mut(&mut self) -> &mut FiberArena<H::Props> {
        &mut self.arena
    }

    /// The host configuration.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host configuration.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Number of queued synchronous tasks awaiting the next flush.
    pub fn pending_sync_tasks(&self) -> usize {
        self.sync_queue.len()
    }
}
