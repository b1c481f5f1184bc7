//! Lottie Preview - webview preview panels for Lottie animation files
//!
//! This crate provides the core types and logic for previewing Lottie
//! JSON files in embedded renderer panels, implementing the Elm
//! Architecture pattern: one panel per file, a pending queue for requests
//! that beat the renderer's boot, and a persisted per-file theme store.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod panel;
pub mod runtime;
pub mod shell;
pub mod store;
pub mod tracing;
pub mod update;
pub mod wire;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::PreviewConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use panel::FileId;
pub use store::PreviewTheme;
