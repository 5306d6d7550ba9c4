//! Undo/redo history.
//!
//! Every committed change stores a full lossless snapshot of the surface in a
//! linear stack. Moving through the stack schedules an asynchronous decode;
//! only the newest decode is ever applied to the surface.

mod restore;
mod snapshot;
mod stack;

pub use restore::{RestoreCompletion, RestoreQueue};
pub use snapshot::{Snapshot, SnapshotError};
pub use stack::HistoryStack;
