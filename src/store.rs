//! Persistent per-file theme preferences
//!
//! Stores one record per previewed file and persists the whole collection
//! to disk as a single JSON array. Mutations rewrite the entire file; the
//! collection is small (one interactive user) so there is no per-record
//! granularity at the storage layer.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display theme applied to a preview panel
///
/// Persisted as a number for compatibility with existing `themes.json`
/// files; unknown numbers load as [`PreviewTheme::System`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum PreviewTheme {
    Light,
    Dark,
    #[default]
    System,
}

impl From<PreviewTheme> for u8 {
    fn from(theme: PreviewTheme) -> u8 {
        match theme {
            PreviewTheme::Light => 0,
            PreviewTheme::Dark => 1,
            PreviewTheme::System => 2,
        }
    }
}

impl From<u8> for PreviewTheme {
    fn from(value: u8) -> Self {
        match value {
            0 => PreviewTheme::Light,
            1 => PreviewTheme::Dark,
            _ => PreviewTheme::System,
        }
    }
}

/// A single persisted preference record
///
/// Field names match the on-disk layout (`filePath` / `theme`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeRecord {
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub theme: PreviewTheme,
}

/// The whole preference collection, keyed by file path
///
/// Invariant: at most one record per path. Writes upsert in place rather
/// than appending, so repeated writes never grow the collection.
#[derive(Debug, Clone, Default)]
pub struct ThemeStore {
    records: Vec<ThemeRecord>,
}

impl ThemeStore {
    /// Load from the default location, or start empty if missing/unreadable
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::themes_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path (tests and tooling)
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Vec<ThemeRecord>>(&contents) {
                Ok(records) => Self { records },
                Err(e) => {
                    tracing::warn!(
                        "Could not parse theme preferences at {}: {}. Starting empty.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save to the default location
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = crate::config_paths::themes_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory available",
            ));
        };
        if let Err(e) = crate::config_paths::ensure_config_dir() {
            return Err(std::io::Error::other(e));
        }
        self.save_to(&path)
    }

    /// Save to an explicit path (tests and tooling)
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let contents = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(path, contents)
    }

    /// Upsert the theme for a file. An existing record is overwritten in
    /// place; a new record is appended.
    pub fn set(&mut self, file_path: &str, theme: PreviewTheme) {
        match self.find_index(file_path) {
            Some(idx) => self.records[idx].theme = theme,
            None => self.records.push(ThemeRecord {
                file_path: file_path.to_string(),
                theme,
            }),
        }
    }

    pub fn get(&self, file_path: &str) -> Option<PreviewTheme> {
        self.find_index(file_path).map(|idx| self.records[idx].theme)
    }

    /// Remove the record for a path. Removing an absent path is a no-op;
    /// returns whether anything changed.
    pub fn remove(&mut self, file_path: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.file_path != file_path);
        self.records.len() != before
    }

    pub fn all(&self) -> &[ThemeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn find_index(&self, file_path: &str) -> Option<usize> {
        self.records.iter().position(|r| r.file_path == file_path)
    }
}
