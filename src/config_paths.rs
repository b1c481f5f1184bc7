//! Centralized configuration paths for lottie-preview
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/lottie-preview/`
//! - Windows: `%APPDATA%\lottie-preview\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "lottie-preview";

/// Base config directory for lottie-preview
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/lottie-preview`
///   - Else: `~/.config/lottie-preview`
///
/// Windows:
///   - `%APPDATA%\lottie-preview`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/lottie-preview/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/lottie-preview/themes.json` holds the persisted theme
/// preference collection (one JSON array, rewritten whole on mutation)
pub fn themes_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("themes.json"))
}

/// `~/.config/lottie-preview/template/` holds the bundled renderer
/// (`index.js` / `index.css`) loaded into every panel shell
pub fn template_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("template"))
}

/// `~/.config/lottie-preview/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Returns the most recent log file in `~/.config/lottie-preview/logs/`
/// (e.g., `lottie-preview.log.2026-08-28`)
///
/// The logging system uses daily rotation, creating files like
/// `lottie-preview.log.YYYY-MM-DD`. This function scans the logs directory
/// and returns the newest file.
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;

    let mut log_files: Vec<PathBuf> = fs::read_dir(&logs_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("lottie-preview.log"))
                .unwrap_or(false)
        })
        .collect();

    // YYYY-MM-DD suffixes sort naturally; descending puts the newest first
    log_files.sort_by(|a, b| b.cmp(a));

    log_files
        .into_iter()
        .next()
        .or_else(|| Some(logs_dir.join("lottie-preview.log")))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
