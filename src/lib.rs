//! # weft
//!
//! Incremental tree-reconciliation engine with lane-based scheduling.
//!
//! weft computes the minimal set of host mutations needed to bring a
//! previously committed UI tree in line with a new description of the tree,
//! and schedules that computation so higher-priority updates can coalesce
//! with or precede lower-priority ones.
//!
//! ## Architecture
//!
//! The engine walks a dual-buffer fiber tree. Each tree position holds up to
//! two node buffers: the committed one and the work-in-progress one being
//! built for the next commit.
//!
//! ```text
//! update request → lanes merged at root → sync queue / deferred task
//!        → work loop (begin ↓ / complete ↑) → commit (swap buffers)
//! ```
//!
//! The host supplies the per-node reconciliation logic (what children a node
//! produces, what effect flags it accumulates) and the mutation primitives
//! through the [`HostConfig`] trait. The engine owns the walk order, the
//! priority bookkeeping, and the atomicity of the commit handoff.
//!
//! ## Modules
//!
//! - [`types`] - Node kinds and effect flags
//! - [`lanes`] - Priority lanes and lane-set operations
//! - [`fiber`] - Fiber nodes, the pair-slot arena, fiber roots
//! - [`scheduler`] - Synchronous task queue
//! - [`host`] - The host-supplied capability trait
//! - [`reconciler`] - Engine assembly and public entry points

pub mod fiber;
pub mod host;
pub mod lanes;
pub mod reconciler;
pub mod scheduler;
pub mod types;

mod commit;
mod work_loop;

// Re-export commonly used items
pub use types::{FiberTag, Flags};

pub use lanes::{
    Lanes, SchedulerPriority, highest_priority_lane, lanes_to_priority, merge_lanes, remove_lanes,
};

pub use fiber::{FiberArena, FiberId, FiberNode, FiberRoot, RootId};

pub use host::{HostConfig, WorkError};

pub use scheduler::{SyncQueue, SyncTask};

pub use reconciler::{Reconciler, ReconcilerOptions};
