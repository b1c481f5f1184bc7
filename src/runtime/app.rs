//! Application runtime: window, message pump, and command execution
//!
//! Hosts the Elm core: messages drain from a channel one at a time, each
//! runs through `update`, and the resulting commands execute against the
//! panel manager, the file watcher, and the preference store. Dispatch is
//! single-threaded; at most one handler is active at a time.

use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::Window;

use crate::cli::StartupConfig;
use crate::commands::Cmd;
use crate::messages::{Msg, PreviewMsg};
use crate::model::AppModel;
use crate::panel::FileId;
use crate::shell;
use crate::update::update;
use crate::wire::OutboundMessage;

use super::watcher::SourceWatcher;
use super::webview::PanelManager;

/// How often the watcher channel is polled while idle
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct App {
    model: AppModel,
    startup: StartupConfig,
    window: Option<Rc<Window>>,
    panels: Option<PanelManager>,
    watcher: Option<SourceWatcher>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
}

impl App {
    pub fn new(model: AppModel, startup: StartupConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();

        let watcher = match SourceWatcher::new() {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!("File watching unavailable: {}", e);
                None
            }
        };

        Self {
            model,
            startup,
            window: None,
            panels: None,
            watcher,
            msg_tx,
            msg_rx,
        }
    }

    /// Channel for feeding messages into the update loop
    pub fn msg_sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Queue preview requests for files passed on the command line
    fn queue_startup_previews(&self) {
        for path in &self.startup.files {
            if let Some(theme) = self.startup.theme {
                let _ = self.msg_tx.send(Msg::Preview(PreviewMsg::SetTheme {
                    file: FileId::from_path(path),
                    theme,
                }));
            }
            let _ = self.msg_tx.send(Msg::preview_request(path.clone()));
        }
    }

    /// Drain watcher events and the message channel, running each message
    /// through the update loop and executing the resulting commands
    fn pump_messages(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(watcher) = &self.watcher {
            for file in watcher.poll_events() {
                let _ = self.msg_tx.send(Msg::Preview(PreviewMsg::SourceChanged(file)));
            }
        }

        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(cmd) = update(&mut self.model, msg) {
                self.execute(cmd, event_loop);
            }
        }
    }

    fn execute(&mut self, cmd: Cmd, event_loop: &ActiveEventLoop) {
        for cmd in cmd.flatten() {
            self.execute_one(cmd, event_loop);
        }
    }

    fn execute_one(&mut self, cmd: Cmd, event_loop: &ActiveEventLoop) {
        match cmd {
            Cmd::CreatePanel { file } => self.create_panel(&file),
            Cmd::RevealPanel { file } => {
                if let (Some(panels), Some(window)) = (&mut self.panels, &self.window) {
                    panels.reveal(&file, window);
                }
            }
            Cmd::DeliverPreview { file } => self.deliver_preview(&file),
            Cmd::ClosePanel { file } => {
                if let Some(panels) = &mut self.panels {
                    panels.close_panel(&file);
                }
                if let Some(watcher) = &mut self.watcher {
                    watcher.unwatch(&file);
                }
            }
            Cmd::WatchSource { file } => {
                if let Some(watcher) = &mut self.watcher {
                    if let Err(e) = watcher.watch(&file) {
                        tracing::warn!("Could not watch {}: {}", file, e);
                    }
                }
            }
            Cmd::ShowError(message) => {
                let _ = rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Lottie Preview")
                    .set_description(message.as_str())
                    .show();
            }
            Cmd::PersistThemes => {
                if let Err(e) = self.model.themes.save() {
                    tracing::warn!("Failed to persist theme preferences: {}", e);
                }
            }
            Cmd::Quit => event_loop.exit(),
            // Flattened away before dispatch
            Cmd::None | Cmd::Batch(_) => {}
        }
    }

    fn create_panel(&mut self, file: &FileId) {
        let (Some(panels), Some(window)) = (&mut self.panels, &self.window) else {
            tracing::error!("Panel creation requested before window init for {}", file);
            return;
        };

        let (js_url, css_url) = bundle_urls();
        let html = shell::panel_shell(&file.display_name(), &js_url, &css_url);

        if let Err(e) = panels.create_panel(file, window, html) {
            tracing::error!("Failed to create panel for {}: {}", file, e);
        }
    }

    fn deliver_preview(&mut self, file: &FileId) {
        let Some(panels) = &self.panels else {
            tracing::warn!("Delivery requested before window init for {}", file);
            return;
        };

        let msg = OutboundMessage::preview(file);
        // Best-effort: a stale handle is logged, other deliveries proceed.
        if let Err(e) = panels.deliver(file, &msg) {
            tracing::warn!("Preview delivery to {} failed: {}", file, e);
        } else {
            tracing::info!("Delivered preview payload for {}", file);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Lottie Preview")
            .with_inner_size(LogicalSize::new(900.0, 700.0));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.panels = Some(PanelManager::new(
            self.model.config.retain_when_hidden,
            self.msg_tx.clone(),
        ));
        self.window = Some(window);

        self.queue_startup_previews();
        self.pump_messages(event_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                // Report every open panel closed so webviews and watches
                // release before the event loop stops.
                let open: Vec<FileId> = self.model.registry.files().cloned().collect();
                for file in open {
                    let _ = self.msg_tx.send(Msg::panel_closed(file));
                }
                self.pump_messages(event_loop);
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                if let (Some(panels), Some(window)) = (&self.panels, &self.window) {
                    panels.resize_all(window);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.pump_messages(event_loop);
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + WATCH_POLL_INTERVAL));
    }
}

/// `file://` URLs for the bundled renderer assets
fn bundle_urls() -> (String, String) {
    match crate::config_paths::template_dir() {
        Some(dir) => (
            format!("file://{}", dir.join("index.js").display()),
            format!("file://{}", dir.join("index.css").display()),
        ),
        None => {
            tracing::warn!("No template directory available, using relative bundle paths");
            ("index.js".to_string(), "index.css".to_string())
        }
    }
}
