pub mod arbiter;
pub mod drag;

pub use arbiter::{ArbiterState, InteractionArbiter, InteractionMode};
pub use drag::{DragBridge, ListenerId};
