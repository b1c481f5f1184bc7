//! File watching for previewed files
//!
//! Uses the `notify` crate with debouncing so edits to a previewed Lottie
//! file refresh the open panel without spamming it during rapid saves.

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crate::panel::FileId;

/// Watches individual previewed files with debouncing
///
/// Each previewed file is watched non-recursively. Changes are coalesced
/// with a 500ms delay to absorb editors that write in bursts.
pub struct SourceWatcher {
    debouncer: Debouncer<notify::RecommendedWatcher>,
    rx: Receiver<Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    /// Watched path → file identity, for mapping events back
    watched: HashMap<PathBuf, FileId>,
}

impl SourceWatcher {
    pub fn new() -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        // 500ms debounce delay - balances responsiveness with avoiding spam
        let debouncer = new_debouncer(Duration::from_millis(500), tx)?;

        Ok(Self {
            debouncer,
            rx,
            watched: HashMap::new(),
        })
    }

    /// Start watching a previewed file. Watching the same file twice is a
    /// no-op.
    pub fn watch(&mut self, file: &FileId) -> Result<(), notify::Error> {
        let path = file.to_path();
        if self.watched.contains_key(&path) {
            return Ok(());
        }

        self.debouncer
            .watcher()
            .watch(&path, notify::RecursiveMode::NonRecursive)?;

        tracing::info!("Watching previewed file: {}", path.display());
        self.watched.insert(path, file.clone());
        Ok(())
    }

    /// Stop watching a file (panel closed)
    pub fn unwatch(&mut self, file: &FileId) {
        let path = file.to_path();
        if self.watched.remove(&path).is_some() {
            if let Err(e) = self.debouncer.watcher().unwatch(&path) {
                tracing::debug!("Failed to unwatch {}: {}", path.display(), e);
            }
        }
    }

    /// Poll for pending change events (non-blocking)
    ///
    /// Returns the identities of previewed files that changed, deduplicated.
    pub fn poll_events(&self) -> Vec<FileId> {
        let mut changed: Vec<FileId> = Vec::new();

        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(events) => {
                    for event in events {
                        if event.kind == DebouncedEventKind::AnyContinuous {
                            // Mid-burst events - the trailing Any event covers them
                            continue;
                        }
                        let Some(file) = self.watched.get(&event.path) else {
                            continue;
                        };
                        if !changed.contains(file) {
                            changed.push(file.clone());
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("File watcher error: {:?}", e);
                }
            }
        }

        if !changed.is_empty() {
            tracing::debug!("Watcher detected {} changed preview source(s)", changed.len());
        }

        changed
    }
}
