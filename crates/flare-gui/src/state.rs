use crossbeam::channel::{self, Receiver, Sender};
use flare_core::SharedFlareParams;
use std::path::PathBuf;
use std::sync::Arc;

/// Requests from the UI that the application loop carries out.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Replace the flare parameters with a preset file.
    LoadPreset(PathBuf),
    /// Write the current parameters to a preset file.
    SavePreset(PathBuf),
    /// Use a still image as the scene.
    OpenImage(PathBuf),
    /// Go back to the animated procedural scene.
    UseProceduralScene,
    /// Capture the flared viewport to a PNG file.
    SaveSnapshot(PathBuf),
    /// Reset all four parameters to their defaults.
    ResetParams,
}

/// Create the UI → application command channel.
pub fn command_channel() -> (Sender<UiCommand>, Receiver<UiCommand>) {
    channel::bounded(64)
}

/// A one-line status message shown under the panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLine {
    pub message: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_error: false }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_error: true }
    }
}

/// Data shared between the application and the widgets.
pub struct ViewerSharedState {
    pub params: Arc<SharedFlareParams>,
    pub command_tx: Sender<UiCommand>,
}

impl ViewerSharedState {
    pub fn new(params: Arc<SharedFlareParams>, command_tx: Sender<UiCommand>) -> Self {
        Self { params, command_tx }
    }

    /// Queue a command; drops it with a warning if the queue is full.
    pub fn send(&self, command: UiCommand) {
        if let Err(e) = self.command_tx.try_send(command) {
            log::warn!("UI command dropped: {:?}", e.into_inner());
        }
    }
}
