//! Configuration merging logic
//!
//! Priority: CLI args > scloc.toml > defaults

use std::path::{Path, PathBuf};

use super::toml_schema::SclocToml;

/// CLI options that can override config file settings.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliOptions {
    pub base: Option<PathBuf>,
    pub overlay: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub game_dir: Option<PathBuf>,
    /// If Some(true), skip backups (inverted in settings)
    pub no_backup: Option<bool>,
    pub backup_dir: Option<PathBuf>,
}

/// Fully resolved settings for one run.
///
/// `base` and `overlay` stay optional here; the caller decides how to fail
/// when neither the CLI nor the config file supplied them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base: Option<PathBuf>,
    pub overlay: Option<PathBuf>,
    pub output: PathBuf,
    pub game_dir: Option<PathBuf>,
    pub backup: bool,
    pub backup_dir: PathBuf,
    pub keep_backups: usize,
}

const DEFAULT_BACKUP_DIR: &str = "backups";
const DEFAULT_KEEP_BACKUPS: usize = 5;

fn default_output(base: Option<&Path>) -> PathBuf {
    let name = base
        .and_then(Path::file_name)
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "global.ini".into());
    PathBuf::from("merged").join(name)
}

/// Merge settings from CLI, TOML, and defaults.
///
/// Priority: CLI > TOML > defaults
pub fn merge_settings(cli: &CliOptions, toml: Option<&SclocToml>) -> Settings {
    let base = cli
        .base
        .clone()
        .or_else(|| toml.and_then(|t| t.paths.base.clone()));
    let overlay = cli
        .overlay
        .clone()
        .or_else(|| toml.and_then(|t| t.paths.overlay.clone()));
    let output = cli
        .output
        .clone()
        .or_else(|| toml.and_then(|t| t.paths.output.clone()))
        .unwrap_or_else(|| default_output(base.as_deref()));

    Settings {
        game_dir: cli
            .game_dir
            .clone()
            .or_else(|| toml.and_then(|t| t.paths.game_dir.clone())),
        backup: cli
            .no_backup
            .map(|no| !no)
            .or_else(|| toml.and_then(|t| t.merge.backup))
            .unwrap_or(true),
        backup_dir: cli
            .backup_dir
            .clone()
            .or_else(|| toml.and_then(|t| t.merge.backup_dir.clone()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_DIR)),
        keep_backups: toml
            .and_then(|t| t.merge.keep_backups)
            .unwrap_or(DEFAULT_KEEP_BACKUPS),
        base,
        overlay,
        output,
    }
}
