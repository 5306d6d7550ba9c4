//! Library exports for embedding the inkboard whiteboard engine.
//!
//! A host UI creates a [`Whiteboard`] for its drawing container and forwards
//! pointer, touch, and control events to it. The configuration types are
//! exported as well so that external tools can share validation logic and
//! serialization code with the main binary.

pub mod config;
pub mod draw;
pub mod history;
pub mod input;
pub mod notification;
pub mod storage;
pub mod ui;
pub mod util;
pub mod viewport;
pub mod whiteboard;

pub use config::Config;
pub use whiteboard::{Whiteboard, WhiteboardError};
