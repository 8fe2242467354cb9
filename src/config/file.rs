//! Config file discovery and loading

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::toml_schema::SclocToml;

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading the file
    Io(io::Error),
    /// TOML parsing error
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Find scloc.toml by searching upward from the given directory.
///
/// Stops at the first `scloc.toml` found, or at the git repository root
/// (directory containing `.git`), whichever comes first.
///
/// Returns `None` if no config file is found.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let file_path = current.join("scloc.toml");
        if file_path.exists() {
            return Some(file_path);
        }

        if current.join(".git").exists() {
            return None;
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load and parse scloc.toml from the given path.
pub fn load_config(path: &Path) -> Result<SclocToml, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: SclocToml = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_current_dir() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("scloc.toml");
        fs::write(&config_path, "[paths]\n").unwrap();

        let found = find_config_file(dir.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let parent = TempDir::new().unwrap();
        let config_path = parent.path().join("scloc.toml");
        fs::write(&config_path, "[paths]\n").unwrap();

        let child = parent.path().join("subdir");
        fs::create_dir(&child).unwrap();

        let found = find_config_file(&child);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = TempDir::new().unwrap();
        // Create .git directory to mark git root
        fs::create_dir(dir.path().join(".git")).unwrap();

        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        // No config in this tree
        let found = find_config_file(&subdir);
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_full() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("scloc.toml");
        fs::write(
            &config_path,
            r#"
[paths]
game_dir = "C:/Games/StarCitizen/LIVE"
base = "global.ini"
overlay = "global_overlay.ini"
output = "merged/global.ini"

[merge]
backup = false
backup_dir = "my_backups"
keep_backups = 10
"#,
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(
            config.paths.game_dir,
            Some(PathBuf::from("C:/Games/StarCitizen/LIVE"))
        );
        assert_eq!(config.paths.base, Some(PathBuf::from("global.ini")));
        assert_eq!(config.paths.overlay, Some(PathBuf::from("global_overlay.ini")));
        assert_eq!(config.paths.output, Some(PathBuf::from("merged/global.ini")));
        assert_eq!(config.merge.backup, Some(false));
        assert_eq!(config.merge.backup_dir, Some(PathBuf::from("my_backups")));
        assert_eq!(config.merge.keep_backups, Some(10));
    }

    #[test]
    fn test_load_config_partial() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("scloc.toml");
        fs::write(
            &config_path,
            r#"
[paths]
overlay = "global_overlay.ini"
"#,
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.paths.overlay, Some(PathBuf::from("global_overlay.ini")));
        assert_eq!(config.paths.base, None);
        assert_eq!(config.merge.backup, None);
    }

    #[test]
    fn test_load_config_empty() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("scloc.toml");
        fs::write(&config_path, "").unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.paths.base, None);
        assert_eq!(config.merge.keep_backups, None);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("scloc.toml");
        fs::write(&config_path, "invalid toml {{{\n").unwrap();

        let result = load_config(&config_path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
