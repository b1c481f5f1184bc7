//! Command-line argument parsing
//!
//! Supports:
//! - Opening one or more Lottie JSON files at startup
//! - Overriding the stored theme for files opened this way

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::store::PreviewTheme;

/// Preview Lottie animation files
#[derive(Parser, Debug)]
#[command(name = "lottie-preview", version, about = "Preview Lottie animation files")]
pub struct CliArgs {
    /// Lottie JSON files to preview
    #[arg(value_name = "FILES")]
    pub paths: Vec<PathBuf>,

    /// Theme applied to the files opened from the command line
    #[arg(long, value_enum, value_name = "THEME")]
    pub theme: Option<ThemeArg>,
}

/// CLI-facing theme names, mapped onto the stored enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for PreviewTheme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => PreviewTheme::Light,
            ThemeArg::Dark => PreviewTheme::Dark,
            ThemeArg::System => PreviewTheme::System,
        }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Files to preview at startup
    pub files: Vec<PathBuf>,
    /// Theme override for those files
    pub theme: Option<PreviewTheme>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration.
    ///
    /// Directories are rejected up front; per-file validation (missing
    /// files and the like) happens in the preview handler so its behavior
    /// matches previews requested interactively.
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if let Some(dir) = self.paths.iter().find(|p| p.is_dir()) {
            return Err(format!("{} is a directory, not a file", dir.display()));
        }

        Ok(StartupConfig {
            files: self.paths,
            theme: self.theme.map(PreviewTheme::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args() {
        let args = CliArgs {
            paths: vec![],
            theme: None,
        };
        let config = args.into_config().unwrap();
        assert!(config.files.is_empty());
        assert!(config.theme.is_none());
    }

    #[test]
    fn test_files_pass_through() {
        let args = CliArgs {
            paths: vec![PathBuf::from("a.json"), PathBuf::from("b.json")],
            theme: None,
        };
        let config = args.into_config().unwrap();
        assert_eq!(config.files.len(), 2);
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            paths: vec![dir.path().to_path_buf()],
            theme: None,
        };
        assert!(args.into_config().is_err());
    }

    #[test]
    fn test_theme_mapping() {
        let args = CliArgs {
            paths: vec![],
            theme: Some(ThemeArg::Dark),
        };
        let config = args.into_config().unwrap();
        assert_eq!(config.theme, Some(PreviewTheme::Dark));
    }
}
