use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::storage::{BoardRecord, export_png};
use crate::ui::{STATUS_SAVE_FAILED, STATUS_SAVED};

use super::Whiteboard;

impl Whiteboard {
    /// Saves the board as a timestamped record in the local store.
    ///
    /// Returns the record key, or `None` after reporting a failure.
    pub fn save(&mut self) -> Option<String> {
        self.save_at(Instant::now(), Utc::now())
    }

    /// [`Self::save`] with explicit clocks: `now` drives the status indicator,
    /// `saved_at` the record key and timestamp.
    pub fn save_at(&mut self, now: Instant, saved_at: DateTime<Utc>) -> Option<String> {
        let result = self.write_record(saved_at);
        match result {
            Ok(key) => {
                self.status.flash(STATUS_SAVED, now);
                Some(key)
            }
            Err(err) => {
                log::error!("Save failed: {:#}", err);
                self.status.set(STATUS_SAVE_FAILED);
                self.notifier.notify("Save failed", &format!("{:#}", err));
                None
            }
        }
    }

    fn write_record(&mut self, saved_at: DateTime<Utc>) -> anyhow::Result<String> {
        self.settle_restores()
            .context("failed to apply pending undo/redo")?;
        let png = self
            .surface
            .surface()
            .encode_png()
            .context("failed to encode board as PNG")?;
        let record = BoardRecord::new(self.effective_board_name(), &png, saved_at);
        self.records.save(&record, saved_at)
    }

    /// Writes the board to `<export dir>/<board name>.png`.
    ///
    /// Returns the written path, or `None` after reporting a failure.
    pub fn export(&mut self) -> Option<PathBuf> {
        match self.write_export() {
            Ok(path) => Some(path),
            Err(err) => {
                log::error!("Export failed: {:#}", err);
                self.notifier.notify("Export failed", &format!("{:#}", err));
                None
            }
        }
    }

    fn write_export(&mut self) -> anyhow::Result<PathBuf> {
        self.settle_restores()
            .context("failed to apply pending undo/redo")?;
        let png = self
            .surface
            .surface()
            .encode_png()
            .context("failed to encode board as PNG")?;
        export_png(&png, &self.export_dir, self.effective_board_name())
    }
}
