//! Panel identity, lifecycle, and registry
//!
//! One preview panel exists per file. The registry enforces that invariant
//! and owns the lifecycle bookkeeping for each panel.

mod registry;

pub use registry::{PanelEntry, PanelRegistry, RegisterError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Stable string identity for a previewed file
///
/// Panels and theme preferences are both keyed by this. Paths are
/// canonicalized on construction when possible so the same file reached
/// through different relative paths maps to one panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn from_path(path: &Path) -> Self {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self(canonical.to_string_lossy().into_owned())
    }

    /// Construct from an already-canonical identity string (e.g., a
    /// restoration payload). No path resolution is performed.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// File name for panel titles, falling back to the full identity
    pub fn display_name(&self) -> String {
        self.to_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.clone())
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Panel lifecycle states
///
/// `Disposed` is terminal: a disposed panel is never reactivated. A later
/// preview request for the same file constructs a fresh panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLifecycle {
    Uninitialized,
    Active,
    Disposed,
}

impl PanelLifecycle {
    /// Attempt `Uninitialized → Active`. Returns false for any other start state.
    pub fn activate(&mut self) -> bool {
        if *self == PanelLifecycle::Uninitialized {
            *self = PanelLifecycle::Active;
            true
        } else {
            false
        }
    }

    /// Attempt `Active → Disposed`. Returns false for any other start state.
    pub fn dispose(&mut self) -> bool {
        if *self == PanelLifecycle::Active {
            *self = PanelLifecycle::Disposed;
            true
        } else {
            false
        }
    }
}

/// State persisted by the host alongside a panel, used to rebuild the
/// registry entry after a restart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRestoreState {
    pub uri: String,
}

impl PanelRestoreState {
    pub fn new(file: &FileId) -> Self {
        Self {
            uri: file.as_str().to_string(),
        }
    }

    pub fn file_id(&self) -> FileId {
        FileId::from_raw(self.uri.clone())
    }
}

/// Ordered queue of preview requests waiting for the renderer to boot
///
/// The embedded renderer initializes asynchronously after the panel's
/// content is set; requests that arrive before its readiness signal are
/// parked here and delivered once, in arrival order, when the signal lands.
#[derive(Debug, Clone, Default)]
pub struct PendingPreviews {
    queue: Vec<FileId>,
}

impl PendingPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a file for delivery. Duplicate identities are ignored so a
    /// file requested twice pre-readiness is still delivered exactly once.
    pub fn push(&mut self, file: FileId) {
        if !self.queue.contains(&file) {
            self.queue.push(file);
        }
    }

    /// Snapshot and clear the queue in one step. A second call without
    /// intervening pushes returns an empty list.
    pub fn drain(&mut self) -> Vec<FileId> {
        std::mem::take(&mut self.queue)
    }

    pub fn contains(&self, file: &FileId) -> bool {
        self.queue.contains(file)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_from_raw_is_verbatim() {
        let id = FileId::from_raw("/a/b/anim.json");
        assert_eq!(id.as_str(), "/a/b/anim.json");
        assert_eq!(id.display_name(), "anim.json");
    }

    #[test]
    fn test_file_id_display_name_falls_back_to_identity() {
        let id = FileId::from_raw("/");
        assert_eq!(id.display_name(), "/");
    }

    #[test]
    fn test_lifecycle_happy_path() {
        let mut state = PanelLifecycle::Uninitialized;
        assert!(state.activate());
        assert_eq!(state, PanelLifecycle::Active);
        assert!(state.dispose());
        assert_eq!(state, PanelLifecycle::Disposed);
    }

    #[test]
    fn test_disposed_is_terminal() {
        let mut state = PanelLifecycle::Disposed;
        assert!(!state.activate());
        assert!(!state.dispose());
        assert_eq!(state, PanelLifecycle::Disposed);
    }

    #[test]
    fn test_cannot_dispose_uninitialized() {
        let mut state = PanelLifecycle::Uninitialized;
        assert!(!state.dispose());
        assert_eq!(state, PanelLifecycle::Uninitialized);
    }

    #[test]
    fn test_restore_state_round_trip() {
        let file = FileId::from_raw("/anims/loader.json");
        let state = PanelRestoreState::new(&file);

        let json = serde_json::to_string(&state).unwrap();
        let loaded: PanelRestoreState = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.file_id(), file);
    }

    #[test]
    fn test_pending_push_deduplicates() {
        let mut pending = PendingPreviews::new();
        pending.push(FileId::from_raw("/a.json"));
        pending.push(FileId::from_raw("/a.json"));
        pending.push(FileId::from_raw("/b.json"));

        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_pending_drain_preserves_order_and_clears() {
        let mut pending = PendingPreviews::new();
        pending.push(FileId::from_raw("/first.json"));
        pending.push(FileId::from_raw("/second.json"));
        pending.push(FileId::from_raw("/third.json"));

        let drained = pending.drain();
        assert_eq!(
            drained,
            vec![
                FileId::from_raw("/first.json"),
                FileId::from_raw("/second.json"),
                FileId::from_raw("/third.json"),
            ]
        );
        assert!(pending.is_empty());
        assert!(pending.drain().is_empty());
    }
}
