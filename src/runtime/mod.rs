//! Runtime module - winit/wry platform integration
//!
//! This module contains platform-specific code for running the previewer:
//! - `app` - ApplicationHandler, message pump, and command execution
//! - `watcher` - debounced watching of previewed files
//! - `webview` - wry webview panel management

pub mod app;
pub mod watcher;
pub mod webview;

pub use app::App;
