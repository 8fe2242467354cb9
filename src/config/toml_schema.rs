//! TOML schema definitions for scloc.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root structure for scloc.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SclocToml {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsSection,

    /// Merge behaviour
    #[serde(default)]
    pub merge: MergeSection,
}

/// `[paths]` section in scloc.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PathsSection {
    /// Game installation root (None = auto-detect)
    pub game_dir: Option<PathBuf>,

    /// Base document shipped by the game
    pub base: Option<PathBuf>,

    /// Overlay document with the overrides
    pub overlay: Option<PathBuf>,

    /// Where the merged document is written
    pub output: Option<PathBuf>,
}

/// `[merge]` section in scloc.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MergeSection {
    /// Back up a game file before overwriting it (default: true)
    pub backup: Option<bool>,

    /// Directory for timestamped backups (default: "backups")
    pub backup_dir: Option<PathBuf>,

    /// Backups kept per file (default: 5)
    pub keep_backups: Option<usize>,
}
