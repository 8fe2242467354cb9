pub mod backup;
pub mod colors;
pub mod config;
pub mod locate;
pub mod merge;
pub mod overlay;
mod report;
pub mod writer;

pub use backup::BackupManager;
pub use colors::{should_use_colors, Colors};
pub use config::{
    find_config_file, generate_init_file, load_config, merge_settings, CliOptions, ConfigError,
    SclocToml, Settings, SCLOC_TOML_TEMPLATE,
};
pub use locate::{detect_game_dir, resolve, LocateError, ResolvedPaths};
pub use merge::{merge_document, LineClassifier, LineKind, MergeStats, MergedDocument};
pub use overlay::{load_overlay, LoadWarning, LoadWarningKind, OverlayMap};
pub use report::{OutputContext, OutputMode};

use std::io;
use std::path::PathBuf;

/// Split a document into lines, tolerating LF and CRLF endings.
///
/// A trailing newline does not produce a final empty line; whether one was
/// present is recovered separately via `writer::has_final_newline`.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return vec![];
    }
    let mut lines: Vec<&str> = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    if text.ends_with('\n') {
        lines.pop();
    }
    lines
}

/// Behaviour switches for one run, resolved from CLI and config.
pub struct RunConfig {
    /// Report statistics without writing anything.
    pub check_only: bool,
    pub backup: bool,
    pub backup_dir: PathBuf,
    pub keep_backups: usize,
}

/// What a run produced, for exit-code decisions and tests.
pub struct RunReport {
    pub stats: MergeStats,
    pub unused_keys: Vec<String>,
    pub load_warnings: usize,
    pub write_failures: usize,
}

impl RunReport {
    pub fn has_write_failures(&self) -> bool {
        self.write_failures > 0
    }
}

/// Main entry point: load the overlay, merge the base document, write to
/// every destination, and report.
///
/// Load warnings and unused overlay keys never fail the run. A failed write
/// is counted and reported but does not stop writes to other destinations.
pub fn run(paths: &ResolvedPaths, config: &RunConfig, ctx: &OutputContext) -> io::Result<RunReport> {
    let overlay_text = writer::read_text(&paths.overlay)?;
    let (overlay, warnings) = load_overlay(&overlay_text);
    report::print_load_warnings(&warnings, ctx);

    let base_text = writer::read_text(&paths.base)?;
    let base_lines = split_lines(&base_text);
    let (document, stats) = merge_document(&base_lines, &overlay);
    let unused_keys = stats.unused_keys(&overlay);

    let rendered = document.render(
        writer::newline_style(&base_text),
        writer::has_final_newline(&base_text),
    );

    if ctx.mode == OutputMode::Diff {
        report::print_diff(&paths.base.display().to_string(), &base_text, &rendered);
    }

    let mut write_failures = 0;
    if !config.check_only {
        match writer::write_text(&paths.output, &rendered) {
            Ok(()) => report::print_written(&paths.output, ctx),
            Err(e) => {
                report::print_write_error(&paths.output, &e, ctx);
                write_failures += 1;
            }
        }

        if let Some(target) = &paths.game_target {
            write_failures += apply_to_game(target, &rendered, config, ctx);
        }
    }

    report::print_stats(&stats, &unused_keys, ctx);

    Ok(RunReport {
        stats,
        unused_keys,
        load_warnings: warnings.len(),
        write_failures,
    })
}

/// Copy the merged document into the game directory, backing up whatever is
/// there first. A failed backup skips the overwrite for safety.
fn apply_to_game(
    target: &std::path::Path,
    rendered: &str,
    config: &RunConfig,
    ctx: &OutputContext,
) -> usize {
    if config.backup {
        let manager = BackupManager::with_keep(config.backup_dir.clone(), config.keep_backups);
        match manager.create(target) {
            Ok(Some(backup_path)) => report::print_backup(&backup_path, ctx),
            Ok(None) => {}
            Err(e) => {
                report::print_backup_error(target, &e, ctx);
                return 1;
            }
        }
    }

    match writer::write_text(target, rendered) {
        Ok(()) => {
            report::print_written(target, ctx);
            0
        }
        Err(e) => {
            report::print_write_error(target, &e, ctx);
            1
        }
    }
}
