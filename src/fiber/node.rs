//! FiberNode - one tree position's work unit at one time step.

use crate::lanes::Lanes;
use crate::types::{FiberTag, Flags};

use super::root::RootId;

// =============================================================================
// Fiber Identity
// =============================================================================

/// Handle to a node in a [`FiberArena`](super::FiberArena).
///
/// Packs a pair index and a buffer bit: `pair << 1 | buffer`. The node at
/// the same tree position in the other time step is therefore always
/// `id.alternate()`, which makes "at most two nodes per position, each the
/// other's alternate" structural rather than a convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FiberId(u32);

impl FiberId {
    pub(crate) fn new(pair: usize, buffer: usize) -> Self {
        FiberId(((pair as u32) << 1) | (buffer as u32 & 1))
    }

    /// Index of the tree position (the buffer pair) this node belongs to.
    pub fn pair(self) -> usize {
        (self.0 >> 1) as usize
    }

    /// Which of the position's two buffers this node occupies (0 or 1).
    pub fn buffer(self) -> usize {
        (self.0 & 1) as usize
    }

    /// The id of the other time-step's node at the same tree position.
    ///
    /// Always well-formed; whether a node actually exists there is answered
    /// by [`FiberArena::alternate`](super::FiberArena::alternate).
    pub fn alternate(self) -> FiberId {
        FiberId(self.0 ^ 1)
    }
}

// =============================================================================
// Fiber Node
// =============================================================================

/// One node of the fiber tree.
///
/// Tree links form a singly-linked child list per parent: `child` points at
/// the first child, `sibling` at the next child of the same parent, and
/// `parent` is a non-owning back-reference used only to pop back up during
/// the complete phase. Traversal order over children is therefore the list
/// order and nothing else.
#[derive(Debug, Clone)]
pub struct FiberNode<P> {
    /// Node kind.
    pub tag: FiberTag,

    /// Slot identity used by the host to match nodes across updates.
    pub key: Option<String>,

    /// Input for the in-progress render.
    pub pending_props: P,

    /// Input the last completed begin phase consumed. `None` until the node
    /// has been visited once.
    pub memoized_props: Option<P>,

    /// Host effects this node still owes.
    pub flags: Flags,

    /// Union of the effect flags of everything below this node.
    pub subtree_flags: Flags,

    /// Pending update priority tagged at this node.
    pub lanes: Lanes,

    /// First child.
    pub child: Option<FiberId>,

    /// Next sibling under the same parent.
    pub sibling: Option<FiberId>,

    /// Structural parent. Traversal-only; never implies ownership.
    pub parent: Option<FiberId>,

    /// For `HostRoot` nodes, the root entity this tree hangs off.
    pub root: Option<RootId>,
}

impl<P> FiberNode<P> {
    /// A fresh node with no links, no flags, and no consumed input.
    pub fn new(tag: FiberTag, key: Option<String>, pending_props: P) -> Self {
        FiberNode {
            tag,
            key,
            pending_props,
            memoized_props: None,
            flags: Flags::empty(),
            subtree_flags: Flags::empty(),
            lanes: Lanes::empty(),
            child: None,
            sibling: None,
            parent: None,
            root: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiber_id_packing() {
        let id = FiberId::new(7, 1);
        assert_eq!(id.pair(), 7);
        assert_eq!(id.buffer(), 1);
    }

    #[test]
    fn test_alternate_is_involution() {
        let id = FiberId::new(3, 0);
        assert_eq!(id.alternate().pair(), 3);
        assert_eq!(id.alternate().buffer(), 1);
        assert_eq!(id.alternate().alternate(), id);
    }

    #[test]
    fn test_new_node_is_blank() {
        let node: FiberNode<&str> = FiberNode::new(FiberTag::HostNode, None, "props");
        assert_eq!(node.flags, Flags::empty());
        assert_eq!(node.memoized_props, None);
        assert!(node.child.is_none() && node.sibling.is_none() && node.parent.is_none());
    }
}
