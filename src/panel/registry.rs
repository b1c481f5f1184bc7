//! One-panel-per-file registry

use std::collections::HashMap;

use super::{FileId, PanelLifecycle};

/// Why a registration was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// A live panel already exists for this file; callers should reveal it
    /// instead of constructing a second one.
    AlreadyRegistered,
}

/// Bookkeeping for one live panel
#[derive(Debug, Clone)]
pub struct PanelEntry {
    pub file: FileId,
    pub lifecycle: PanelLifecycle,
    /// True when the entry was rebuilt from host-serialized state rather
    /// than created by a fresh preview request
    pub restored: bool,
}

impl PanelEntry {
    fn new(file: FileId, restored: bool) -> Self {
        Self {
            file,
            lifecycle: PanelLifecycle::Uninitialized,
            restored,
        }
    }
}

/// Registry of live panels, at most one per file identity
///
/// Entries are inserted when a panel is constructed and removed exactly
/// when the host reports the panel disposed. A disposed file id can be
/// registered again, which models "closing and reopening a preview".
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    panels: HashMap<FileId, PanelEntry>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly constructed panel and activate it.
    ///
    /// Rejects duplicates without touching the existing entry.
    pub fn register(&mut self, file: FileId, restored: bool) -> Result<(), RegisterError> {
        if self.panels.contains_key(&file) {
            return Err(RegisterError::AlreadyRegistered);
        }
        let mut entry = PanelEntry::new(file.clone(), restored);
        entry.lifecycle.activate();
        self.panels.insert(file, entry);
        Ok(())
    }

    pub fn contains(&self, file: &FileId) -> bool {
        self.panels.contains_key(file)
    }

    pub fn get(&self, file: &FileId) -> Option<&PanelEntry> {
        self.panels.get(file)
    }

    /// Deregister on host-reported close. Returns false when no live panel
    /// was tracked for this file (e.g., a stale close notification).
    pub fn dispose(&mut self, file: &FileId) -> bool {
        match self.panels.remove(file) {
            Some(mut entry) => {
                entry.lifecycle.dispose();
                true
            }
            None => false,
        }
    }

    pub fn files(&self) -> impl Iterator<Item = &FileId> {
        self.panels.keys()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> FileId {
        FileId::from_raw(s)
    }

    #[test]
    fn test_register_activates_entry() {
        let mut registry = PanelRegistry::new();
        registry.register(id("/a.json"), false).unwrap();

        let entry = registry.get(&id("/a.json")).unwrap();
        assert_eq!(entry.lifecycle, PanelLifecycle::Active);
        assert!(!entry.restored);
    }

    #[test]
    fn test_duplicate_register_is_rejected() {
        let mut registry = PanelRegistry::new();
        registry.register(id("/a.json"), false).unwrap();

        assert_eq!(
            registry.register(id("/a.json"), false),
            Err(RegisterError::AlreadyRegistered)
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_dispose_removes_entry() {
        let mut registry = PanelRegistry::new();
        registry.register(id("/a.json"), false).unwrap();

        assert!(registry.dispose(&id("/a.json")));
        assert!(!registry.contains(&id("/a.json")));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_dispose_unknown_file_is_noop() {
        let mut registry = PanelRegistry::new();
        registry.register(id("/a.json"), false).unwrap();

        assert!(!registry.dispose(&id("/other.json")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reregister_after_dispose() {
        let mut registry = PanelRegistry::new();
        registry.register(id("/a.json"), false).unwrap();
        registry.dispose(&id("/a.json"));

        assert!(registry.register(id("/a.json"), false).is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_restored_flag_is_tracked() {
        let mut registry = PanelRegistry::new();
        registry.register(id("/a.json"), true).unwrap();

        assert!(registry.get(&id("/a.json")).unwrap().restored);
    }
}
