//! Abstract input-event sources a whiteboard session can be driven from.

use super::events::InputEvent;
use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

/// Supplies input events one at a time, in the order the UI produced them.
pub trait EventSource {
    /// Returns the next event, or `None` when the source is exhausted.
    fn next_event(&mut self) -> Option<InputEvent>;
}

/// Replays a recorded list of events.
#[derive(Debug, Default, Clone)]
pub struct ScriptSource {
    events: VecDeque<InputEvent>,
}

impl ScriptSource {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Parses a JSON array of tagged events.
    pub fn from_json(json: &str) -> Result<Self> {
        let events: Vec<InputEvent> =
            serde_json::from_str(json).context("Failed to parse event script")?;
        Ok(Self::new(events))
    }

    /// Reads and parses an event script file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read event script {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid event script {}", path.display()))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptSource {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_source_yields_events_in_order() {
        let mut source = ScriptSource::from_json(
            r#"[{"type": "undo"}, {"type": "pointer-down", "x": 1.0, "y": 1.0}]"#,
        )
        .unwrap();
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_event(), Some(InputEvent::Undo));
        assert_eq!(
            source.next_event(),
            Some(InputEvent::PointerDown { x: 1.0, y: 1.0 })
        );
        assert_eq!(source.next_event(), None);
    }

    #[test]
    fn malformed_script_is_an_error() {
        assert!(ScriptSource::from_json(r#"[{"type": "teleport"}]"#).is_err());
        assert!(ScriptSource::from_json("not json").is_err());
    }

    #[test]
    fn from_file_reports_missing_path() {
        let temp = tempfile::tempdir().unwrap();
        let err = ScriptSource::from_file(&temp.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read event script"));
    }
}
