//! Timestamped backups of game files before `--apply` overwrites them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

const DEFAULT_KEEP: usize = 5;

pub struct BackupManager {
    dir: PathBuf,
    keep: usize,
}

impl BackupManager {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            keep: DEFAULT_KEEP,
        }
    }

    pub fn with_keep(dir: PathBuf, keep: usize) -> Self {
        Self { dir, keep }
    }

    /// Copy `file` into the backup directory as `<stem>_<timestamp><ext>`,
    /// then drop all but the most recent backups for that stem.
    ///
    /// Returns `Ok(None)` when there is nothing to back up yet.
    pub fn create(&self, file: &Path) -> io::Result<Option<PathBuf>> {
        if !file.exists() {
            return Ok(None);
        }
        fs::create_dir_all(&self.dir)?;

        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "backup".to_string());
        let ext = file
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let stamp = Local::now().format("%Y%m%d_%H%M%S");

        let backup_path = self.dir.join(format!("{stem}_{stamp}{ext}"));
        fs::copy(file, &backup_path)?;

        self.prune(&stem)?;
        Ok(Some(backup_path))
    }

    /// All backups for a stem, newest first. The timestamp in the name
    /// sorts lexicographically, so name order is age order.
    pub fn list(&self, stem: &str) -> io::Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(vec![]);
        }
        let prefix = format!("{stem}_");
        let mut backups: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .map(|n| n.to_string_lossy().starts_with(&prefix))
                    .unwrap_or(false)
            })
            .collect();
        backups.sort();
        backups.reverse();
        Ok(backups)
    }

    fn prune(&self, stem: &str) -> io::Result<()> {
        for old in self.list(stem)?.into_iter().skip(self.keep) {
            fs::remove_file(old)?;
        }
        Ok(())
    }
}
