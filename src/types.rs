//! Core types shared across the engine.
//!
//! The engine manipulates an abstract node graph: it never materializes
//! anything itself. `FiberTag` tells the engine (and the host) what kind of
//! node a tree position holds, and `Flags` records which host effects a
//! completed node still owes.

// =============================================================================
// Node Kind
// =============================================================================

/// The kind of node occupying a tree position.
///
/// The engine only branches on `HostRoot` (to locate the scheduling target
/// when an update walks up the tree). The remaining kinds exist for the
/// host's begin/complete handlers to dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiberTag {
    /// The anchor node of a mounted tree. Owns a `FiberRoot`.
    HostRoot,
    /// A node the host materializes (a container in the host's node graph).
    HostNode,
    /// A text leaf the host materializes.
    HostText,
    /// A user component: produces children but no host node of its own.
    Component,
}

// =============================================================================
// Effect Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Pending host-effect kinds as a bitfield.
    ///
    /// Accumulated on a node during the walk and unioned up from children
    /// into `subtree_flags` as the walk retreats, so the commit coordinator
    /// can test a whole finished tree with two loads at the root.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Flags: u32 {
        const NONE = 0;
        /// Node must be inserted (or moved) in the host graph.
        const PLACEMENT = 1 << 0;
        /// Node's host payload must be updated in place.
        const UPDATE = 1 << 1;
        /// One or more of the node's previous children must be removed.
        const CHILD_DELETION = 1 << 2;

        /// Every flag the mutation pass responds to.
        const MUTATION_MASK = Self::PLACEMENT.bits()
            | Self::UPDATE.bits()
            | Self::CHILD_DELETION.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_mask_covers_structural_flags() {
        assert!(Flags::MUTATION_MASK.contains(Flags::PLACEMENT));
        assert!(Flags::MUTATION_MASK.contains(Flags::UPDATE));
        assert!(Flags::MUTATION_MASK.contains(Flags::CHILD_DELETION));
    }

    #[test]
    fn test_flags_union() {
        let flags = Flags::PLACEMENT | Flags::UPDATE;
        assert!(flags.intersects(Flags::MUTATION_MASK));
        assert!(!Flags::NONE.intersects(Flags::MUTATION_MASK));
    }
}
