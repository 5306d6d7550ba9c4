use std::sync::Arc;

use crate::history::{RestoreCompletion, Snapshot, SnapshotError};

use super::{Whiteboard, WhiteboardError};

impl Whiteboard {
    /// Steps back one history entry. No-op at the oldest entry.
    ///
    /// The surface is redrawn asynchronously; see [`Self::poll_restores`].
    pub fn undo(&mut self) {
        match self.history.step_back() {
            Some(snapshot) => self.schedule_restore(snapshot),
            None => log::debug!("Nothing to undo"),
        }
    }

    /// Steps forward one history entry. No-op at the newest entry.
    pub fn redo(&mut self) {
        match self.history.step_forward() {
            Some(snapshot) => self.schedule_restore(snapshot),
            None => log::debug!("Nothing to redo"),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Index of the history entry the board is showing (or about to show).
    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    /// True while an undo/redo redraw has not been applied yet.
    pub fn is_restoring(&self) -> bool {
        self.restores.is_pending()
    }

    /// Applies a finished restore, if any, without blocking.
    ///
    /// Returns true when the surface was redrawn.
    pub fn poll_restores(&mut self) -> Result<bool, WhiteboardError> {
        match self.restores.poll() {
            Some(completion) => self.apply_restore(completion),
            None => Ok(false),
        }
    }

    /// Blocks until the most recent undo/redo has been applied.
    ///
    /// Returns true when the surface was redrawn. Must not be called from
    /// inside the async runtime.
    pub fn settle_restores(&mut self) -> Result<bool, WhiteboardError> {
        if !self.restores.is_pending() {
            return Ok(false);
        }
        match self.restores.settle() {
            Some(completion) => self.apply_restore(completion),
            None => Ok(false),
        }
    }

    fn schedule_restore(&mut self, snapshot: Arc<Snapshot>) {
        let index = self.history.cursor();
        match self.restores.submit(index, snapshot) {
            Ok(generation) => {
                log::debug!(
                    "Restore of entry {} scheduled (generation {})",
                    index,
                    generation
                );
            }
            Err(err) => self.restore_failed(err),
        }
    }

    fn apply_restore(&mut self, completion: RestoreCompletion) -> Result<bool, WhiteboardError> {
        let raster = match completion.result {
            Ok(raster) => raster,
            Err(err) => {
                self.restore_failed(err);
                return Ok(false);
            }
        };

        match self.surface.surface_mut().restore(&raster) {
            Ok(()) => {
                self.displayed = completion.index;
                log::debug!("Surface now shows history entry {}", self.displayed);
                Ok(true)
            }
            Err(err) => {
                self.restore_failed(SnapshotError::Surface(err));
                Ok(false)
            }
        }
    }

    /// Rolls the cursor back to the entry actually on screen and reports the failure.
    fn restore_failed(&mut self, err: SnapshotError) {
        log::error!(
            "Failed to restore history entry {}: {}",
            self.history.cursor(),
            err
        );
        if !self.history.set_cursor(self.displayed) {
            log::warn!(
                "Displayed entry {} no longer exists in history",
                self.displayed
            );
        }
        self.notifier.notify("Undo/redo failed", &err.to_string());
    }
}
