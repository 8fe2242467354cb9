//! Template generation for `--init` command

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Template scloc.toml with documentation
pub const SCLOC_TOML_TEMPLATE: &str = r#"# scloc.toml - Configuration for the scloc localization merger
#
# scloc merges a translation overlay into the game's global.ini:
# - overridden keys take the overlay's value
# - comments, blank lines and section headers pass through untouched
# - output is written as UTF-8 without a byte order mark

[paths]
# Star Citizen installation root. Auto-detected when omitted.
# game_dir = "C:/Program Files/Roberts Space Industries/StarCitizen/LIVE"

# Base document shipped by the game.
# base = "global.ini"

# Overlay document with your overrides.
# overlay = "global_overlay.ini"

# Where the merged document is written.
# Default: merged/<base file name>
# output = "merged/global.ini"

[merge]
# Back up a game file before --apply overwrites it.
# Default: true
# backup = true

# Directory for timestamped backups.
# Default: "backups"
# backup_dir = "backups"

# How many backups to keep per file.
# Default: 5
# keep_backups = 5
"#;

/// Generate scloc.toml in the specified directory (or current directory if None).
///
/// Returns an error if scloc.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(|| PathBuf::from("scloc.toml"), |d| d.join("scloc.toml"));

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "scloc.toml already exists",
        ));
    }

    fs::write(&path, SCLOC_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate scloc.toml in the current directory.
///
/// Returns an error if scloc.toml already exists.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
