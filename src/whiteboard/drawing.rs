use crate::draw::ContainerBox;

use super::{Whiteboard, WhiteboardError};

impl Whiteboard {
    /// Starts a stroke at a viewport position.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<(), WhiteboardError> {
        self.settle_restores()?;
        let pos = self.surface.map_input_to_surface(x, y);
        self.engine.on_pointer_down(pos, &self.tools);
        Ok(())
    }

    /// Extends the active stroke to a viewport position. No-op while idle.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<(), WhiteboardError> {
        if !self.engine.is_drawing() {
            return Ok(());
        }
        self.settle_restores()?;
        let pos = self.surface.map_input_to_surface(x, y);
        self.engine.on_pointer_move(pos, self.surface.surface())?;
        Ok(())
    }

    /// Ends the active stroke (pointer released or left the surface) and commits it.
    pub fn pointer_up(&mut self) -> Result<(), WhiteboardError> {
        if self.engine.on_pointer_up() {
            self.commit()?;
        } else {
            log::debug!("Pointer up while idle; nothing to commit");
        }
        Ok(())
    }

    /// Snapshots the surface as a new history entry, dropping any redo entries.
    pub fn commit(&mut self) -> Result<(), WhiteboardError> {
        self.settle_restores()?;
        let snapshot = crate::history::Snapshot::capture(
            self.surface.surface_mut(),
            self.config.history.compression_level,
        )?;
        log::debug!(
            "Committing history entry {} ({} bytes)",
            self.history.cursor() + 1,
            snapshot.encoded_len()
        );
        self.history.push(snapshot);
        self.displayed = self.history.cursor();
        Ok(())
    }

    /// Wipes the board after confirmation and records the wipe in history.
    ///
    /// Declining the confirmation changes nothing.
    pub fn clear(&mut self) -> Result<(), WhiteboardError> {
        self.settle_restores()?;
        if self.config.ui.confirm_clear && !self.prompt.confirm(crate::ui::CLEAR_PROMPT) {
            log::debug!("Clear declined");
            return Ok(());
        }
        self.surface.surface_mut().clear()?;
        log::info!("Board cleared");
        self.commit()
    }

    /// Re-sizes the surface to a new container.
    ///
    /// Contents are reset, any stroke in progress is abandoned, and the blank
    /// surface is pushed as a new history entry.
    pub fn resize(&mut self, container: ContainerBox) -> Result<(), WhiteboardError> {
        self.settle_restores()?;
        if self.engine.is_drawing() {
            log::debug!("Abandoning stroke in progress on resize");
            self.engine.cancel();
        }
        self.surface.resize(container)?;
        self.commit()
    }
}
