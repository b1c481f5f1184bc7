//! Webview manager for preview panels
//!
//! Manages wry WebView instances hosting the embedded Lottie renderer,
//! one per previewed file, as children of the main window.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use winit::window::Window;
use wry::{Rect, WebView, WebViewBuilder};

use crate::messages::Msg;
use crate::panel::FileId;
use crate::wire::{InboundMessage, OutboundMessage};

/// Delivery failure for [`PanelManager::deliver`]
#[derive(Debug)]
pub enum DeliverError {
    /// No live webview for this file (panel closed or hibernated)
    StalePanel,
    /// The outbound message could not be serialized
    Serialize(serde_json::Error),
    /// The webview rejected the script
    Script(wry::Error),
}

impl std::fmt::Display for DeliverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliverError::StalePanel => write!(f, "panel handle is stale"),
            DeliverError::Serialize(e) => write!(f, "could not serialize message: {}", e),
            DeliverError::Script(e) => write!(f, "script evaluation failed: {}", e),
        }
    }
}

/// One tracked panel: a webview, plus its shell HTML so the webview can
/// be rebuilt after hibernation
struct PanelSlot {
    webview: Option<WebView>,
    html: String,
}

/// Manages webview panels, one per file identity
///
/// At most one panel is visible at a time; revealing one hides the rest.
/// When `retain_when_hidden` is off, hidden panels drop their webview
/// entirely and are rebuilt from the shell HTML on the next reveal.
pub struct PanelManager {
    panels: HashMap<FileId, PanelSlot>,
    visible: Option<FileId>,
    retain_when_hidden: bool,
    msg_tx: Sender<Msg>,
}

impl PanelManager {
    pub fn new(retain_when_hidden: bool, msg_tx: Sender<Msg>) -> Self {
        Self {
            panels: HashMap::new(),
            visible: None,
            retain_when_hidden,
            msg_tx,
        }
    }

    /// Create a panel for a file and bring it to the foreground
    pub fn create_panel(
        &mut self,
        file: &FileId,
        window: &Rc<Window>,
        html: String,
    ) -> Result<(), wry::Error> {
        // Don't create duplicate
        if self.panels.contains_key(file) {
            return Ok(());
        }

        let webview = self.build_webview(file, window, &html)?;
        self.panels.insert(
            file.clone(),
            PanelSlot {
                webview: Some(webview),
                html,
            },
        );
        self.set_foreground(file, window);
        Ok(())
    }

    /// Bring an existing panel to the foreground, rebuilding its webview
    /// if it was hibernated
    pub fn reveal(&mut self, file: &FileId, window: &Rc<Window>) {
        if !self.panels.contains_key(file) {
            tracing::warn!("Reveal requested for unknown panel {}", file);
            return;
        }

        let needs_rebuild = self
            .panels
            .get(file)
            .map(|slot| slot.webview.is_none())
            .unwrap_or(false);

        if needs_rebuild {
            let html = self.panels[file].html.clone();
            match self.build_webview(file, window, &html) {
                Ok(webview) => {
                    if let Some(slot) = self.panels.get_mut(file) {
                        slot.webview = Some(webview);
                    }
                    // The rebuilt renderer boots fresh and posts a new
                    // readiness signal; the update loop answers it with a
                    // fresh payload for this panel.
                }
                Err(e) => {
                    tracing::error!("Failed to rebuild panel for {}: {}", file, e);
                    return;
                }
            }
        }

        self.set_foreground(file, window);
    }

    /// Push a wire message into a panel's renderer
    pub fn deliver(&self, file: &FileId, msg: &OutboundMessage) -> Result<(), DeliverError> {
        let webview = self
            .panels
            .get(file)
            .and_then(|slot| slot.webview.as_ref())
            .ok_or(DeliverError::StalePanel)?;

        let json = serde_json::to_string(msg).map_err(DeliverError::Serialize)?;
        webview
            .evaluate_script(&format!("window.postMessage({}, \"*\");", json))
            .map_err(DeliverError::Script)
    }

    /// Drop a panel entirely
    pub fn close_panel(&mut self, file: &FileId) {
        self.panels.remove(file);
        if self.visible.as_ref() == Some(file) {
            self.visible = None;
        }
    }

    pub fn has_panel(&self, file: &FileId) -> bool {
        self.panels.contains_key(file)
    }

    /// Refit all live webviews after a window resize
    pub fn resize_all(&self, window: &Rc<Window>) {
        let bounds = full_window_bounds(window);
        for slot in self.panels.values() {
            if let Some(webview) = &slot.webview {
                let _ = webview.set_bounds(bounds);
            }
        }
    }

    fn build_webview(
        &self,
        file: &FileId,
        window: &Rc<Window>,
        html: &str,
    ) -> Result<WebView, wry::Error> {
        let tx = self.msg_tx.clone();
        let origin = file.clone();

        WebViewBuilder::new()
            .with_html(html)
            .with_bounds(full_window_bounds(window))
            .with_transparent(false)
            .with_ipc_handler(move |request| {
                let raw = request.body();
                match InboundMessage::parse(raw) {
                    Ok(InboundMessage::RendererReady) => {
                        let _ = tx.send(Msg::renderer_ready(origin.clone()));
                    }
                    Ok(InboundMessage::Unknown { kind }) => {
                        let _ = tx.send(Msg::Renderer(crate::messages::RendererMsg::Unknown {
                            origin: origin.clone(),
                            kind,
                        }));
                    }
                    Err(e) => {
                        tracing::warn!("Malformed message from {}: {}", origin, e);
                    }
                }
            })
            .with_navigation_handler(|url| {
                // Open external links in the default browser
                if url.starts_with("http://") || url.starts_with("https://") {
                    let _ = open::that(&url);
                    false
                } else {
                    true
                }
            })
            .build_as_child(window)
    }

    /// Show one panel, hide the rest per the retention policy
    fn set_foreground(&mut self, file: &FileId, _window: &Rc<Window>) {
        self.visible = Some(file.clone());

        for (id, slot) in &mut self.panels {
            if id == file {
                if let Some(webview) = &slot.webview {
                    let _ = webview.set_visible(true);
                }
            } else if self.retain_when_hidden {
                if let Some(webview) = &slot.webview {
                    let _ = webview.set_visible(false);
                }
            } else {
                // Hibernate: release the webview, keep the shell for rebuild
                slot.webview = None;
            }
        }
    }
}

/// Full-window bounds in logical coordinates for a child webview
fn full_window_bounds(window: &Rc<Window>) -> Rect {
    use wry::dpi::{LogicalPosition, LogicalSize};

    let scale_factor = window.scale_factor();
    let size = window.inner_size();

    Rect {
        position: LogicalPosition::new(0.0, 0.0).into(),
        size: LogicalSize::new(
            size.width as f64 / scale_factor,
            size.height as f64 / scale_factor,
        )
        .into(),
    }
}
