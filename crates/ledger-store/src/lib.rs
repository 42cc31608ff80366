//! The authoritative asset working set, the transient status line and the
//! recompute state machine that mutates them.

pub mod messages;
pub mod recompute;
pub mod sequence;
pub mod status;
pub mod store;

pub use recompute::{RecomputeController, RecomputeState, TriggerOutcome};
pub use sequence::{RequestSequencer, RequestTicket};
pub use status::{StatusBoard, StatusKind, StatusMessage};
pub use store::{DataStore, LoadOutcome};
