//! Priority lanes - bitset encoding of pending update priority.
//!
//! A lane is a single bit; a lane set is the union of lanes. Lower bit
//! positions are more urgent, so "highest priority" selection is "lowest set
//! bit" and is total and deterministic. The empty set is the "no lane"
//! sentinel: it is never selected and never scheduled.

// =============================================================================
// Lane Set
// =============================================================================

bitflags::bitflags! {
    /// A set of priority lanes.
    ///
    /// Combine with bitwise OR: `Lanes::SYNC | Lanes::DEFAULT`. A value with
    /// exactly one bit set is a single lane.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Lanes: u32 {
        /// Synchronous priority. Outranks every other lane; flushed at the
        /// next microtask boundary rather than through a yieldable task.
        const SYNC = 1 << 0;
        /// Continuous user input (drag, scroll).
        const INPUT = 1 << 1;
        /// Ordinary updates.
        const DEFAULT = 1 << 4;
        /// Work that can wait for an idle period.
        const IDLE = 1 << 28;
    }
}

/// Union of two lane sets.
pub fn merge_lanes(a: Lanes, b: Lanes) -> Lanes {
    a | b
}

/// The most urgent lane in `set`, or the empty set if `set` is empty.
///
/// Lower bit positions are more urgent, so this is the lowest set bit.
pub fn highest_priority_lane(set: Lanes) -> Lanes {
    let bits = set.bits();
    Lanes::from_bits_retain(bits & bits.wrapping_neg())
}

/// `set` with every lane in `rm` cleared.
pub fn remove_lanes(set: Lanes, rm: Lanes) -> Lanes {
    set & !rm
}

// =============================================================================
// Scheduler Priority
// =============================================================================

/// Priority tier handed to the host's yieldable scheduling primitive for
/// non-synchronous lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchedulerPriority {
    /// Must run before yielding back to the host's event loop.
    Immediate,
    /// Should run ahead of ordinary work (tracks `Lanes::INPUT`).
    UserBlocking,
    /// Ordinary deferred work.
    Normal,
    /// Runs only when the host is otherwise idle.
    Idle,
}

/// Map a lane set to the scheduler tier of its most urgent lane.
pub fn lanes_to_priority(set: Lanes) -> SchedulerPriority {
    let highest = highest_priority_lane(set);
    if highest == Lanes::SYNC {
        SchedulerPriority::Immediate
    } else if highest == Lanes::INPUT {
        SchedulerPriority::UserBlocking
    } else if highest == Lanes::IDLE {
        SchedulerPriority::Idle
    } else {
        SchedulerPriority::Normal
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_union() {
        let merged = merge_lanes(Lanes::SYNC, Lanes::DEFAULT);
        assert!(merged.contains(Lanes::SYNC));
        assert!(merged.contains(Lanes::DEFAULT));
        assert_eq!(merge_lanes(merged, Lanes::SYNC), merged);
    }

    #[test]
    fn test_sync_outranks_everything() {
        let all = Lanes::SYNC | Lanes::INPUT | Lanes::DEFAULT | Lanes::IDLE;
        assert_eq!(highest_priority_lane(all), Lanes::SYNC);
    }

    #[test]
    fn test_highest_priority_is_lowest_bit() {
        assert_eq!(
            highest_priority_lane(Lanes::DEFAULT | Lanes::IDLE),
            Lanes::DEFAULT
        );
        assert_eq!(
            highest_priority_lane(Lanes::INPUT | Lanes::DEFAULT),
            Lanes::INPUT
        );
    }

    #[test]
    fn test_empty_set_selects_nothing() {
        assert_eq!(highest_priority_lane(Lanes::empty()), Lanes::empty());
    }

    #[test]
    fn test_remove_lanes() {
        let set = Lanes::SYNC | Lanes::DEFAULT;
        assert_eq!(remove_lanes(set, Lanes::SYNC), Lanes::DEFAULT);
        assert_eq!(remove_lanes(set, set), Lanes::empty());
        // Removing a lane that is not present is a no-op.
        assert_eq!(remove_lanes(Lanes::DEFAULT, Lanes::IDLE), Lanes::DEFAULT);
    }

    #[test]
    fn test_lanes_to_priority_tiers() {
        assert_eq!(
            lanes_to_priority(Lanes::SYNC | Lanes::IDLE),
            SchedulerPriority::Immediate
        );
        assert_eq!(lanes_to_priority(Lanes::INPUT), SchedulerPriority::UserBlocking);
        assert_eq!(lanes_to_priority(Lanes::DEFAULT), SchedulerPriority::Normal);
        assert_eq!(lanes_to_priority(Lanes::IDLE), SchedulerPriority::Idle);
    }
}
