//! Input handling and the stroke state machine.
//!
//! This module translates host UI events into drawing actions. It holds the
//! tool model (tool, color, width), the idle/drawing state machine that
//! renders freehand strokes, mouse/touch normalization, and the abstract
//! event sources a session can be driven from.

pub mod events;
pub mod source;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::InputEvent;
pub use source::{EventSource, ScriptSource};
pub use state::{DrawingState, PointerAction, StrokeEngine, pointer_action};
pub use tool::{CursorStyle, Tool, ToolState};
