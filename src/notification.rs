//! User-facing error reporting.
//!
//! Recoverable failures (restore, save, export) are reported through a
//! [`Notifier`]. Reporting never blocks the session thread.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use zbus::{Connection, proxy};

/// Receives recoverable errors and other user-visible notices.
pub trait Notifier {
    fn notify(&self, summary: &str, body: &str);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, summary: &str, body: &str) {
        log::warn!("{}: {}", summary, body);
    }
}

/// Keeps every notification in memory; hosts use it to surface errors in their own UI.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    entries: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn entries(&self) -> Vec<(String, String)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, summary: &str, body: &str) {
        let entry = (summary.to_string(), body.to_string());
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

/// D-Bus interface for freedesktop Notifications.
#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    /// Send a notification.
    ///
    /// # Arguments
    /// * `app_name` - Application name
    /// * `replaces_id` - ID of notification to replace (0 for new)
    /// * `app_icon` - Icon name or path
    /// * `summary` - Notification title
    /// * `body` - Notification body text
    /// * `actions` - List of action identifiers and labels
    /// * `hints` - Additional metadata
    /// * `expire_timeout` - Timeout in milliseconds (-1 for default)
    ///
    /// # Returns
    /// Notification ID
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Send a desktop notification over the session bus.
pub async fn send_notification(summary: &str, body: &str) -> Result<(), String> {
    let connection = Connection::session()
        .await
        .map_err(|e| format!("Failed to connect to session bus: {}", e))?;

    let proxy = NotificationsProxy::new(&connection)
        .await
        .map_err(|e| format!("Failed to create notifications proxy: {}", e))?;

    proxy
        .notify(
            "Inkboard",
            0,
            "dialog-warning",
            summary,
            body,
            vec![],
            HashMap::new(),
            3000, // 3 second timeout
        )
        .await
        .map_err(|e| format!("Failed to send notification: {}", e))?;

    Ok(())
}

/// Sends desktop notifications in the background on the tokio runtime.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    runtime_handle: tokio::runtime::Handle,
}

impl DesktopNotifier {
    pub fn new(runtime_handle: tokio::runtime::Handle) -> Self {
        Self { runtime_handle }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, summary: &str, body: &str) {
        log::warn!("{}: {}", summary, body);
        let summary = summary.to_string();
        let body = body.to_string();
        self.runtime_handle.spawn(async move {
            if let Err(e) = send_notification(&summary, &body).await {
                log::warn!("Failed to send notification: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_shares_entries_between_clones() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();
        notifier.notify("Save failed", "disk full");
        assert_eq!(
            handle.entries(),
            vec![("Save failed".to_string(), "disk full".to_string())]
        );
    }
}
