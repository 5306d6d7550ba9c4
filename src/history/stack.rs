//! Linear snapshot stack with a cursor.

use super::snapshot::Snapshot;
use std::sync::Arc;

/// Ordered snapshots plus the index of the one currently shown.
///
/// The stack is never empty: it is created with the initial blank snapshot,
/// and the cursor always points at a valid entry.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<Arc<Snapshot>>,
    cursor: usize,
}

impl HistoryStack {
    /// Creates a stack holding only the initial snapshot.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            entries: vec![Arc::new(initial)],
            cursor: 0,
        }
    }

    /// Appends a snapshot after the cursor and makes it current.
    ///
    /// Entries after the cursor (redo targets left behind by undo) are discarded first.
    pub fn push(&mut self, snapshot: Snapshot) {
        let discarded = self.entries.len() - (self.cursor + 1);
        if discarded > 0 {
            log::debug!("Discarding {} redo snapshot(s)", discarded);
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(Arc::new(snapshot));
        self.cursor = self.entries.len() - 1;
    }

    /// Moves the cursor one entry back and returns the snapshot to show.
    pub fn step_back(&mut self) -> Option<Arc<Snapshot>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Moves the cursor one entry forward and returns the snapshot to show.
    pub fn step_forward(&mut self) -> Option<Arc<Snapshot>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Points the cursor at an existing entry. Returns false for out-of-range indices.
    pub(crate) fn set_cursor(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> &Arc<Snapshot> {
        &self.entries[self.cursor]
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Snapshot>> {
        self.entries.get(index)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
