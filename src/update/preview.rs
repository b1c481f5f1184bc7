//! Preview command handling
//!
//! Maps "preview this file" requests onto panel creation, reveal, and
//! payload delivery, and services panel lifecycle and preference messages.

use std::path::Path;

use crate::commands::Cmd;
use crate::messages::PreviewMsg;
use crate::model::AppModel;
use crate::panel::FileId;

const SELECT_FILE_MSG: &str = "Please select a lottie json file!";

pub fn update_preview(model: &mut AppModel, msg: PreviewMsg) -> Option<Cmd> {
    match msg {
        PreviewMsg::Requested { focus, selected } => {
            if !selected.is_empty() {
                tracing::debug!(
                    "Ignoring {} co-selected file(s), acting on primary only",
                    selected.len()
                );
            }

            let Some(path) = focus else {
                tracing::error!("Preview requested with no target file");
                return Some(Cmd::ShowError(SELECT_FILE_MSG.to_string()));
            };

            if !is_regular_file(&path) {
                tracing::error!("Preview target is not a regular file: {}", path.display());
                return Some(Cmd::ShowError(SELECT_FILE_MSG.to_string()));
            }

            let file = FileId::from_path(&path);
            request_preview(model, file)
        }
        PreviewMsg::RestorePanel(state) => {
            let file = state.file_id();
            if model.registry.register(file.clone(), true).is_err() {
                tracing::warn!("Panel for {} already live, skipping restore", file);
                return None;
            }
            tracing::info!("Restored panel registry entry for {}", file);
            Some(Cmd::WatchSource { file })
        }
        PreviewMsg::PanelClosed(file) => {
            if model.registry.dispose(&file) {
                tracing::info!("Panel disposed for {}", file);
                Some(Cmd::ClosePanel { file })
            } else {
                tracing::debug!("Close notification for untracked panel {}", file);
                None
            }
        }
        PreviewMsg::SourceChanged(file) => {
            // Refresh is best-effort: skip silently when there is no live
            // panel or the renderer has not booted yet.
            if model.registry.contains(&file) && model.renderer_ready {
                tracing::debug!("Source changed, re-delivering preview for {}", file);
                Some(Cmd::DeliverPreview { file })
            } else {
                None
            }
        }
        PreviewMsg::SetTheme { file, theme } => {
            model.themes.set(file.as_str(), theme);
            Some(Cmd::PersistThemes)
        }
        PreviewMsg::ClearTheme { file } => {
            if model.themes.remove(file.as_str()) {
                Some(Cmd::PersistThemes)
            } else {
                None
            }
        }
    }
}

/// Create-or-reveal for a validated file identity
fn request_preview(model: &mut AppModel, file: FileId) -> Option<Cmd> {
    if model.registry.contains(&file) {
        // Reveal only: no new panel, no content reload.
        tracing::info!("Revealing existing panel for {}", file);
        return Some(Cmd::RevealPanel { file });
    }

    if model.registry.register(file.clone(), false).is_err() {
        return Some(Cmd::RevealPanel { file });
    }

    let mut cmds = vec![
        Cmd::CreatePanel { file: file.clone() },
        Cmd::WatchSource { file: file.clone() },
    ];

    if model.renderer_ready {
        cmds.push(Cmd::DeliverPreview { file });
    } else {
        tracing::info!("Renderer not ready, queueing preview for {}", file);
        model.pending.push(file);
    }

    Some(Cmd::batch(cmds))
}

fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
