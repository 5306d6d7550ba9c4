//! UI collaborators: the clear-confirmation prompt and the save status indicator.

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

/// Status shown when nothing has happened recently.
pub const STATUS_IDLE: &str = "All changes saved";
/// Transient status after a successful save.
pub const STATUS_SAVED: &str = "Saved successfully!";
/// Status after a failed save; stays until the next save attempt.
pub const STATUS_SAVE_FAILED: &str = "Save failed";

/// Question asked before wiping the board.
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear the entire canvas?";

// ============================================================================
// Confirmation
// ============================================================================

/// Asks the user a yes/no question.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Answers every prompt with the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmPrompt for FixedAnswer {
    fn confirm(&mut self, message: &str) -> bool {
        log::debug!("Auto-answering '{}' with {}", message, self.0);
        self.0
    }
}

/// Line-based prompt; only `y`/`yes` (any case) confirms.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> ConfirmPrompt for TerminalPrompt<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if let Err(e) = write!(self.output, "{} [y/N] ", message).and_then(|_| self.output.flush())
        {
            log::warn!("Failed to write prompt: {}", e);
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                log::warn!("Failed to read prompt answer: {}", e);
                false
            }
        }
    }
}

// ============================================================================
// Status indicator
// ============================================================================

/// Save status text with a lazily-expiring transient message.
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    message: Option<String>,
    expires_at: Option<Instant>,
    revert_after: Duration,
}

impl StatusIndicator {
    pub fn new(revert_after: Duration) -> Self {
        Self {
            message: None,
            expires_at: None,
            revert_after,
        }
    }

    /// Shows `message` until the revert delay has passed.
    pub fn flash(&mut self, message: &str, now: Instant) {
        self.message = Some(message.to_string());
        self.expires_at = Some(now + self.revert_after);
    }

    /// Shows `message` until another message replaces it.
    pub fn set(&mut self, message: &str) {
        self.message = Some(message.to_string());
        self.expires_at = None;
    }

    /// Text to display at `now`.
    pub fn text(&self, now: Instant) -> &str {
        match (&self.message, self.expires_at) {
            (Some(_), Some(expires_at)) if now >= expires_at => STATUS_IDLE,
            (Some(message), _) => message.as_str(),
            (None, _) => STATUS_IDLE,
        }
    }
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}
