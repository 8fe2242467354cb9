//! Pre-flight path resolution and game installation detection.
//!
//! Every input must exist before any merge work starts, each absence with
//! its own diagnostic, so a typo in one path never produces a half-finished
//! run.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Install locations checked by auto-detection, in order.
pub const COMMON_GAME_DIRS: &[&str] = &[
    "C:/Program Files/Roberts Space Industries/StarCitizen/LIVE",
    "D:/Program Files/Roberts Space Industries/StarCitizen/LIVE",
    "E:/Games/StarCitizen/LIVE",
    "C:/Games/StarCitizen/LIVE",
];

#[derive(Debug)]
pub enum LocateError {
    MissingOverlay(PathBuf),
    MissingBase(PathBuf),
    /// Configured game root does not look like an installation.
    MissingGameDir(PathBuf),
    /// `--apply` requested with no game root configured or detectable.
    NoGameDir,
    CreateDir { path: PathBuf, source: io::Error },
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::MissingOverlay(p) => {
                write!(f, "overlay document not found: {}", p.display())
            }
            LocateError::MissingBase(p) => {
                write!(f, "base document not found: {}", p.display())
            }
            LocateError::MissingGameDir(p) => write!(
                f,
                "game installation not found at {} (expected a 'data' directory inside)",
                p.display()
            ),
            LocateError::NoGameDir => write!(
                f,
                "no game installation configured and auto-detection found none; pass --game-dir"
            ),
            LocateError::CreateDir { path, source } => write!(
                f,
                "failed to create output directory {}: {}",
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for LocateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocateError::CreateDir { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// All paths a run touches, verified up front.
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub base: PathBuf,
    pub overlay: PathBuf,
    pub output: PathBuf,
    /// Second write destination inside the game directory, when applying.
    pub game_target: Option<PathBuf>,
}

/// A directory looks like an installation when it carries a `data` subtree.
pub fn is_game_dir(path: &Path) -> bool {
    path.join("data").is_dir()
}

/// Scan the common install locations for something that looks like the game.
pub fn detect_game_dir() -> Option<PathBuf> {
    COMMON_GAME_DIRS
        .iter()
        .map(PathBuf::from)
        .find(|p| is_game_dir(p))
}

/// Where the game reads its english localization from.
pub fn localization_dir(game_dir: &Path) -> PathBuf {
    game_dir.join("data").join("Localization").join("english")
}

/// Verify inputs, resolve the apply target, and create output directories.
pub fn resolve(
    base: &Path,
    overlay: &Path,
    output: &Path,
    game_dir: Option<&Path>,
    apply: bool,
) -> Result<ResolvedPaths, LocateError> {
    if !overlay.is_file() {
        return Err(LocateError::MissingOverlay(overlay.to_path_buf()));
    }
    if !base.is_file() {
        return Err(LocateError::MissingBase(base.to_path_buf()));
    }

    let game_target = if apply {
        let root = match game_dir {
            Some(dir) => dir.to_path_buf(),
            None => detect_game_dir().ok_or(LocateError::NoGameDir)?,
        };
        if !is_game_dir(&root) {
            return Err(LocateError::MissingGameDir(root));
        }
        let name = base
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "global.ini".into());
        Some(localization_dir(&root).join(name))
    } else {
        None
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| LocateError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(ResolvedPaths {
        base: base.to_path_buf(),
        overlay: overlay.to_path_buf(),
        output: output.to_path_buf(),
        game_target,
    })
}
