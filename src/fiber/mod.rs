//! Fiber tree - the dual-buffer node graph the engine walks.
//!
//! A fiber is one tree position's work unit at one time step. Every logical
//! position owns up to two node buffers: the committed node ("current") and
//! the work-in-progress node being built for the next commit. The pair is
//! allocated once and reused across renders, flipping roles at each commit,
//! so steady-state re-renders allocate nothing for positions whose shape did
//! not change.
//!
//! # Layout
//!
//! ```text
//! FiberArena
//!   pair 0: [ current buffer | work-in-progress buffer ]   ← one tree position
//!   pair 1: [ current buffer | (not yet allocated)     ]
//!   ...
//! ```
//!
//! A `FiberId` packs (pair index, buffer bit), so a node's alternate is a
//! bit flip rather than a pointer that can dangle.

mod arena;
mod node;
mod root;

pub use arena::FiberArena;
pub use node::{FiberId, FiberNode};
pub use root::{FiberRoot, RootId};
