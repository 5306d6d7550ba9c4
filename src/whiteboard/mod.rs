//! The whiteboard session.
//!
//! [`Whiteboard`] is the single owner of every piece of session state: the
//! surface, tool model, stroke engine, snapshot history, zoom, save status,
//! and the UI collaborators. Hosts feed it [`InputEvent`]s, either one at a
//! time through [`Whiteboard::handle_event`] or from an [`EventSource`].

mod drawing;
mod history;
mod persist;


use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::Config;
use crate::draw::{ContainerBox, DrawingSurface, RasterData, SurfaceError, SurfaceManager};
use crate::history::{HistoryStack, RestoreQueue, Snapshot, SnapshotError};
use crate::input::{
    CursorStyle, EventSource, InputEvent, PointerAction, StrokeEngine, ToolState, pointer_action,
};
use crate::notification::{LogNotifier, Notifier};
use crate::storage::RecordStore;
use crate::ui::{ConfirmPrompt, FixedAnswer, StatusIndicator};
use crate::viewport::ViewportState;

/// Unrecoverable session failures.
///
/// Save, export, and restore problems are not errors at this level; they are
/// reported through the session's [`Notifier`] and leave the board usable.
#[derive(Debug, Error)]
pub enum WhiteboardError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// One open whiteboard.
pub struct Whiteboard {
    config: Config,
    surface: SurfaceManager,
    tools: ToolState,
    engine: StrokeEngine,
    history: HistoryStack,
    restores: RestoreQueue,
    /// History index whose raster is on the surface right now.
    displayed: usize,
    viewport: ViewportState,
    status: StatusIndicator,
    board_name: String,
    records: RecordStore,
    export_dir: PathBuf,
    prompt: Box<dyn ConfirmPrompt>,
    notifier: Box<dyn Notifier>,
}

impl std::fmt::Debug for Whiteboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Whiteboard")
            .field("surface", &self.surface)
            .field("tools", &self.tools)
            .field("history_len", &self.history.len())
            .field("cursor", &self.history.cursor())
            .field("displayed", &self.displayed)
            .field("scale", &self.viewport.scale())
            .field("board_name", &self.board_name)
            .finish()
    }
}

impl Whiteboard {
    /// Opens a blank board sized to `container`.
    ///
    /// Snapshot restores run on `runtime_handle`; the runtime must outlive the session.
    pub fn new(
        config: Config,
        container: ContainerBox,
        runtime_handle: &tokio::runtime::Handle,
    ) -> Result<Self, WhiteboardError> {
        let mut surface = SurfaceManager::initialize(container, &config.surface)?;
        let initial = Snapshot::capture(surface.surface_mut(), config.history.compression_level)?;

        log::info!(
            "Whiteboard ready: {}x{} surface",
            surface.surface().width(),
            surface.surface().height()
        );

        Ok(Self {
            tools: ToolState::from_config(&config.drawing),
            engine: StrokeEngine::new(),
            history: HistoryStack::new(initial),
            restores: RestoreQueue::new(runtime_handle),
            displayed: 0,
            viewport: ViewportState::from_config(&config.viewport),
            status: StatusIndicator::new(Duration::from_millis(config.ui.status_revert_ms)),
            board_name: String::new(),
            records: RecordStore::new(config.storage_directory(), config.storage.key_prefix.clone()),
            export_dir: config.export_directory(),
            prompt: Box::new(FixedAnswer(true)),
            notifier: Box::new(LogNotifier),
            surface,
            config,
        })
    }

    /// Replaces the clear-confirmation prompt (default: always confirm).
    pub fn with_prompt(mut self, prompt: Box<dyn ConfirmPrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Replaces the error notifier (default: log only).
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replaces the record store the save control writes to.
    pub fn with_record_store(mut self, records: RecordStore) -> Self {
        self.records = records;
        self
    }

    /// Replaces the directory exports are written to.
    pub fn with_export_dir(mut self, export_dir: impl Into<PathBuf>) -> Self {
        self.export_dir = export_dir.into();
        self
    }

    /// Dispatches one UI or input event.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), WhiteboardError> {
        if event.is_pointer() {
            return match pointer_action(&event) {
                Some(PointerAction::Down(pos)) => self.pointer_down(pos.x, pos.y),
                Some(PointerAction::Move(pos)) => self.pointer_move(pos.x, pos.y),
                Some(PointerAction::Up) | Some(PointerAction::Leave) => self.pointer_up(),
                None => {
                    log::debug!("Ignoring touch event without touch points");
                    Ok(())
                }
            };
        }

        match event {
            InputEvent::Resize {
                width,
                height,
                left,
                top,
            } => self.resize(ContainerBox {
                width,
                height,
                left,
                top,
            })?,
            InputEvent::SelectTool { tool } => {
                self.tools.set_tool(&tool);
            }
            InputEvent::SetColor { value } => {
                self.tools.set_color(&value);
            }
            InputEvent::SetWidth { value } => {
                self.tools.set_width(value);
            }
            InputEvent::SetBoardName { value } => self.set_board_name(value),
            InputEvent::Undo => self.undo(),
            InputEvent::Redo => self.redo(),
            InputEvent::Clear => self.clear()?,
            InputEvent::Save => {
                self.save();
            }
            InputEvent::Export => {
                self.export();
            }
            InputEvent::ZoomIn => {
                self.viewport.zoom_in();
            }
            InputEvent::ZoomOut => {
                self.viewport.zoom_out();
            }
            // Pointer and touch events are handled above.
            _ => {}
        }
        Ok(())
    }

    /// Replays every event from `source`, applying finished restores between events.
    ///
    /// Returns the number of events handled. Outstanding restores are settled
    /// before returning.
    pub fn run(&mut self, source: &mut dyn EventSource) -> Result<usize, WhiteboardError> {
        let mut handled = 0;
        while let Some(event) = source.next_event() {
            log::debug!("Event: {:?}", event);
            self.handle_event(event)?;
            self.poll_restores()?;
            handled += 1;
        }
        self.settle_restores()?;
        Ok(handled)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    pub fn cursor_style(&self) -> CursorStyle {
        self.tools.cursor()
    }

    pub fn is_drawing(&self) -> bool {
        self.engine.is_drawing()
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn surface_manager(&self) -> &SurfaceManager {
        &self.surface
    }

    /// The drawing surface, for hosts that composite it onto a window.
    pub fn surface(&self) -> &DrawingSurface {
        self.surface.surface()
    }

    /// Current pixels, after applying any outstanding restore.
    pub fn raster(&mut self) -> Result<RasterData, WhiteboardError> {
        self.settle_restores()?;
        Ok(self.surface.surface_mut().raster()?)
    }

    /// Premultiplied ARGB value of one surface pixel, after applying any outstanding restore.
    pub fn pixel(&mut self, x: i32, y: i32) -> Result<Option<u32>, WhiteboardError> {
        self.settle_restores()?;
        Ok(self.surface.surface_mut().pixel(x, y)?)
    }

    /// Text of the board-name field as last entered.
    pub fn board_name(&self) -> &str {
        &self.board_name
    }

    pub fn set_board_name(&mut self, name: impl Into<String>) {
        self.board_name = name.into();
    }

    /// Name used for save and export: the entered name, or the default when it is empty.
    pub fn effective_board_name(&self) -> &str {
        if self.board_name.is_empty() {
            &self.config.ui.default_board_name
        } else {
            &self.board_name
        }
    }

    /// Save status text as it should read at `now`.
    pub fn status_text(&self, now: Instant) -> &str {
        self.status.text(now)
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }
}
