//! Application state
//!
//! All mutable state lives here and is threaded by `&mut` through the
//! update handlers: the panel registry, the pending-preview queue, the
//! renderer readiness flag, and the theme preference store. Nothing is
//! kept in free-floating module state.

use crate::config::PreviewConfig;
use crate::panel::{PanelRegistry, PendingPreviews};
use crate::store::ThemeStore;

#[derive(Debug, Clone, Default)]
pub struct AppModel {
    pub config: PreviewConfig,
    /// Live panels, one per file identity
    pub registry: PanelRegistry,
    /// Requests parked until the renderer signals readiness
    pub pending: PendingPreviews,
    /// Monotonic: flips to true on the renderer's one-time readiness
    /// signal and never resets for the lifetime of the process
    pub renderer_ready: bool,
    /// Persisted per-file theme preferences
    pub themes: ThemeStore,
}

impl AppModel {
    pub fn new(config: PreviewConfig, themes: ThemeStore) -> Self {
        Self {
            config,
            registry: PanelRegistry::new(),
            pending: PendingPreviews::new(),
            renderer_ready: false,
            themes,
        }
    }
}
