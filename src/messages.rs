//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::panel::{FileId, PanelRestoreState};
use crate::store::PreviewTheme;

/// Preview-specific messages (panel creation, disposal, preferences)
#[derive(Debug, Clone)]
pub enum PreviewMsg {
    /// "Preview this file" is the one externally invokable command.
    ///
    /// `focus` is the primary selection; `selected` carries any co-selected
    /// files, which are logged but not acted upon.
    Requested {
        focus: Option<PathBuf>,
        selected: Vec<PathBuf>,
    },
    /// Rebuild a registry entry from host-serialized panel state
    RestorePanel(PanelRestoreState),
    /// Host reported the panel for this file closed
    PanelClosed(FileId),
    /// A previewed file changed on disk (file watcher)
    SourceChanged(FileId),
    /// Set the stored theme preference for a file
    SetTheme { file: FileId, theme: PreviewTheme },
    /// Remove the stored theme preference for a file
    ClearTheme { file: FileId },
}

/// Messages decoded from the embedded renderer's wire protocol
#[derive(Debug, Clone)]
pub enum RendererMsg {
    /// One-time readiness signal; `origin` is the panel it arrived from
    Ready { origin: FileId },
    /// Unrecognized message type; logged and ignored
    Unknown { origin: FileId, kind: String },
}

/// Application-level messages
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Quit the application
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Preview messages (panels, preferences)
    Preview(PreviewMsg),
    /// Renderer messages (wire protocol)
    Renderer(RendererMsg),
    /// App messages (lifecycle)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Create a preview request for a single file
    pub fn preview_request(path: PathBuf) -> Self {
        Msg::Preview(PreviewMsg::Requested {
            focus: Some(path),
            selected: Vec::new(),
        })
    }

    /// Create a renderer readiness message
    pub fn renderer_ready(origin: FileId) -> Self {
        Msg::Renderer(RendererMsg::Ready { origin })
    }

    /// Create a panel-closed notification
    pub fn panel_closed(file: FileId) -> Self {
        Msg::Preview(PreviewMsg::PanelClosed(file))
    }
}
