//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an
//! update: host resource allocation (panels), message delivery to the
//! embedded renderer, dialogs, and persistence. The runtime executes them
//! one at a time; none of them re-enter the update loop synchronously.

use crate::panel::FileId;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Construct a panel for a file and load the renderer shell into it
    CreatePanel { file: FileId },
    /// Bring an existing panel to the foreground (no content reload)
    RevealPanel { file: FileId },
    /// Push the preview payload for a file into its panel.
    ///
    /// Best-effort: a stale panel handle is logged, never surfaced.
    DeliverPreview { file: FileId },
    /// Start watching a previewed file for on-disk changes
    WatchSource { file: FileId },
    /// Release a closed panel's webview and stop watching its file
    ClosePanel { file: FileId },
    /// Show a user-visible error dialog
    ShowError(String),
    /// Write the theme preference collection to disk
    PersistThemes,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Request application exit
    Quit,
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Flatten nested batches into a linear list (test helper and
    /// runtime convenience; preserves execution order)
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_removes_nesting_and_nones() {
        let file = FileId::from_raw("/a.json");
        let cmd = Cmd::batch(vec![
            Cmd::None,
            Cmd::CreatePanel { file: file.clone() },
            Cmd::batch(vec![Cmd::DeliverPreview { file: file.clone() }, Cmd::None]),
        ]);

        assert_eq!(
            cmd.flatten(),
            vec![
                Cmd::CreatePanel { file: file.clone() },
                Cmd::DeliverPreview { file },
            ]
        );
    }
}
