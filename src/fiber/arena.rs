//! FiberArena - pair-slot storage for the dual-buffer tree.
//!
//! Manages the lifecycle of tree positions:
//! - One `FiberPair` per logical position, holding both time-step buffers
//! - Free pair pool for O(1) reuse after deletion
//! - Clone-or-reuse working copies (`create_work_in_progress`)
//!
//! Nodes are exclusively owned by their pair slot; `child`/`sibling`/
//! `parent` links are ids resolved through the arena, never aliasing
//! pointers.

use crate::types::{FiberTag, Flags};

use super::node::{FiberId, FiberNode};

/// One tree position: the committed buffer and the work-in-progress buffer.
#[derive(Debug)]
struct FiberPair<P> {
    buffers: [Option<FiberNode<P>>; 2],
}

/// Arena of fiber pairs referenced by stable [`FiberId`] handles.
#[derive(Debug)]
pub struct FiberArena<P> {
    pairs: Vec<FiberPair<P>>,
    free: Vec<usize>,
}

impl<P> FiberArena<P> {
    /// An empty arena.
    pub fn new() -> Self {
        FiberArena {
            pairs: Vec::new(),
            free: Vec::new(),
        }
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Allocate a fresh tree position and place its first node in buffer 0.
    ///
    /// Reuses a released pair if one is available.
    pub fn create_fiber(&mut self, tag: FiberTag, key: Option<String>, pending_props: P) -> FiberId {
        let node = FiberNode::new(tag, key, pending_props);
        let pair = match self.free.pop() {
            Some(pair) => {
                self.pairs[pair].buffers[0] = Some(node);
                pair
            }
            None => {
                self.pairs.push(FiberPair {
                    buffers: [Some(node), None],
                });
                self.pairs.len() - 1
            }
        };
        FiberId::new(pair, 0)
    }

    /// Return a position (both buffers) to the free pool.
    ///
    /// Callers detach the position from any live tree first; the arena does
    /// not chase links.
    pub fn release(&mut self, id: FiberId) {
        let pair = &mut self.pairs[id.pair()];
        if pair.buffers[0].is_none() && pair.buffers[1].is_none() {
            return;
        }
        pair.buffers = [None, None];
        self.free.push(id.pair());
    }

    // =========================================================================
    // Working Copies
    // =========================================================================

    /// The paired work-in-progress node for `current`, allocated on first
    /// use, otherwise reset in place.
    ///
    /// Reset preserves identity (`tag`, `key`, owning root) and carries the
    /// committed node's links and consumed input as the base the walk will
    /// rebuild from, while clearing both effect bitsets and installing the
    /// fresh `pending_props`.
    pub fn create_work_in_progress(&mut self, current: FiberId, pending_props: P) -> FiberId
    where
        P: Clone,
    {
        let pair = &mut self.pairs[current.pair()];
        let [first, second] = &mut pair.buffers;
        let (cur, wip) = if current.buffer() == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        };
        let cur = cur.as_ref().expect("current fiber slot is vacant");

        match wip {
            Some(node) => {
                node.pending_props = pending_props;
                node.memoized_props = cur.memoized_props.clone();
                node.flags = Flags::empty();
                node.subtree_flags = Flags::empty();
                node.lanes = cur.lanes;
                node.child = cur.child;
                node.sibling = cur.sibling;
                node.parent = cur.parent;
            }
            None => {
                *wip = Some(FiberNode {
                    tag: cur.tag,
                    key: cur.key.clone(),
                    pending_props,
                    memoized_props: cur.memoized_props.clone(),
                    flags: Flags::empty(),
                    subtree_flags: Flags::empty(),
                    lanes: cur.lanes,
                    child: cur.child,
                    sibling: cur.sibling,
                    parent: cur.parent,
                    root: cur.root,
                });
            }
        }

        current.alternate()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// The node behind `id`, if that buffer is occupied.
    pub fn try_node(&self, id: FiberId) -> Option<&FiberNode<P>> {
        self.pairs.get(id.pair())?.buffers[id.buffer()].as_ref()
    }

    /// Mutable access to the node behind `id`, if that buffer is occupied.
    pub fn try_node_mut(&mut self, id: FiberId) -> Option<&mut FiberNode<P>> {
        self.pairs.get_mut(id.pair())?.buffers[id.buffer()].as_mut()
    }

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is vacant; ids handed out by this arena stay
    /// valid until [`release`](Self::release).
    pub fn node(&self, id: FiberId) -> &FiberNode<P> {
        self.try_node(id).expect("fiber slot is vacant")
    }

    /// Mutable access to the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is vacant.
    pub fn node_mut(&mut self, id: FiberId) -> &mut FiberNode<P> {
        self.try_node_mut(id).expect("fiber slot is vacant")
    }

    /// The other time-step's node at the same position, if it has been
    /// allocated.
    pub fn alternate(&self, id: FiberId) -> Option<FiberId> {
        let alt = id.alternate();
        self.try_node(alt).map(|_| alt)
    }

    /// Number of positions currently holding at least one node.
    pub fn len(&self) -> usize {
        self.pairs.len() - self.free.len()
    }

    /// True if no positions are allocated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P> Default for FiberArena<P> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::Lanes;

    #[test]
    fn test_create_fiber_occupies_buffer_zero() {
        let mut arena: FiberArena<&str> = FiberArena::new();
        let a = arena.create_fiber(FiberTag::HostNode, None, "a");
        let b = arena.create_fiber(FiberTag::HostText, Some("b".into()), "b");

        assert_eq!(a.buffer(), 0);
        assert_eq!(b.buffer(), 0);
        assert_ne!(a.pair(), b.pair());
        assert_eq!(arena.len(), 2);
        assert!(arena.alternate(a).is_none());
    }

    #[test]
    fn test_release_and_reuse() {
        let mut arena: FiberArena<&str> = FiberArena::new();
        let a = arena.create_fiber(FiberTag::HostNode, None, "a");
        let _b = arena.create_fiber(FiberTag::HostNode, None, "b");

        arena.release(a);
        assert!(arena.try_node(a).is_none());
        assert_eq!(arena.len(), 1);

        // The freed pair is handed out again.
        let c = arena.create_fiber(FiberTag::HostNode, None, "c");
        assert_eq!(c.pair(), a.pair());
    }

    #[test]
    fn test_double_release_is_a_noop() {
        let mut arena: FiberArena<&str> = FiberArena::new();
        let a = arena.create_fiber(FiberTag::HostNode, None, "a");
        arena.release(a);
        arena.release(a);

        let b = arena.create_fiber(FiberTag::HostNode, None, "b");
        let c = arena.create_fiber(FiberTag::HostNode, None, "c");
        assert_ne!(b.pair(), c.pair());
    }

    #[test]
    fn test_work_in_progress_allocates_once() {
        let mut arena: FiberArena<&str> = FiberArena::new();
        let cur = arena.create_fiber(FiberTag::HostNode, Some("x".into()), "one");
        arena.node_mut(cur).memoized_props = Some("one");
        arena.node_mut(cur).lanes = Lanes::SYNC;

        let wip = arena.create_work_in_progress(cur, "two");
        assert_eq!(wip, cur.alternate());
        assert_eq!(arena.alternate(cur), Some(wip));
        assert_eq!(arena.node(wip).pending_props, "two");
        assert_eq!(arena.node(wip).memoized_props, Some("one"));
        assert_eq!(arena.node(wip).key.as_deref(), Some("x"));
        assert_eq!(arena.node(wip).lanes, Lanes::SYNC);

        // Second use resets the same buffer instead of allocating.
        arena.node_mut(wip).flags = Flags::PLACEMENT;
        arena.node_mut(wip).subtree_flags = Flags::UPDATE;
        let again = arena.create_work_in_progress(cur, "three");
        assert_eq!(again, wip);
        assert_eq!(arena.node(again).flags, Flags::empty());
        assert_eq!(arena.node(again).subtree_flags, Flags::empty());
        assert_eq!(arena.node(again).pending_props, "three");
    }

    #[test]
    fn test_work_in_progress_carries_links() {
        let mut arena: FiberArena<&str> = FiberArena::new();
        let parent = arena.create_fiber(FiberTag::HostNode, None, "p");
        let child = arena.create_fiber(FiberTag::HostText, None, "c");
        arena.node_mut(parent).child = Some(child);
        arena.node_mut(child).parent = Some(parent);

        let wip = arena.create_work_in_progress(parent, "p2");
        assert_eq!(arena.node(wip).child, Some(child));
        assert_eq!(arena.node(wip).parent, None);
    }
}
