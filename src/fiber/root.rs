//! FiberRoot - per-mounted-tree bookkeeping.

use crate::lanes::Lanes;

use super::node::FiberId;

/// Handle to a [`FiberRoot`] registered with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId(pub(crate) usize);

/// The per-mounted-tree entity.
///
/// Created once when a tree is mounted and alive for the tree's lifetime.
/// Distinct from the `HostRoot` fiber node that anchors the tree: the fiber
/// is a tree position, this is the ledger the scheduler reads.
#[derive(Debug)]
pub struct FiberRoot {
    /// The currently committed root fiber.
    pub current: FiberId,

    /// A fully walked working tree awaiting commit. Set only when a render
    /// attempt ran to exhaustion; an abandoned walk never sets it.
    pub finished_work: Option<FiberId>,

    /// The lanes the finished working tree resolved. Recorded at handoff so
    /// the commit clears exactly these out of `pending_lanes`.
    pub finished_lanes: Lanes,

    /// Every not-yet-committed update request anywhere in the tree,
    /// coarsened to the root.
    pub pending_lanes: Lanes,
}

impl FiberRoot {
    /// A fresh root anchored at `current` with nothing pending.
    pub fn new(current: FiberId) -> Self {
        FiberRoot {
            current,
            finished_work: None,
            finished_lanes: Lanes::empty(),
            pending_lanes: Lanes::empty(),
        }
    }
}
