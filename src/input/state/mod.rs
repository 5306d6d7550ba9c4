mod core;
mod mouse;
mod touch;
#[cfg(test)]
mod tests;

pub use core::{DrawingState, PointerAction, StrokeEngine};
pub use touch::pointer_action;
