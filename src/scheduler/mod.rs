//! Scheduling - the synchronous task queue.
//!
//! Synchronous-priority work is not run where it is requested. Requests pile
//! up as queue entries, the flush is armed once per boundary through the
//! host's microtask primitive, and the whole queue drains in FIFO order when
//! the boundary fires. By then the root's pending lanes usually reflect
//! several merged requests, which is what lets the flush resolve them with a
//! single walk.

mod queue;

pub use queue::{SyncQueue, SyncTask};
