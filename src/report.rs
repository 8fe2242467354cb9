//! Console reporting. Presentation only; nothing here affects the merge.

use crate::colors::Colors;
use crate::merge::MergeStats;
use crate::overlay::LoadWarning;
use similar::{ChangeTag, TextDiff};
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
    Diff,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
        }
    }
}

pub fn print_load_warnings(warnings: &[LoadWarning], ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    for warning in warnings {
        println!(
            "{}Warning:{} overlay {}",
            ctx.colors.warning,
            ctx.colors.reset(),
            warning
        );
    }
}

pub fn print_stats(stats: &MergeStats, unused_keys: &[String], ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }

    println!(
        "{}{} lines:{} {} replaced, {} unchanged, {} comments, {} blank",
        ctx.colors.bold,
        stats.total_lines,
        ctx.colors.reset(),
        stats.replaced,
        stats.unchanged,
        stats.comments,
        stats.blank
    );

    if !unused_keys.is_empty() {
        println!(
            "{}Warning:{} {} overlay key(s) never matched the base document:",
            ctx.colors.warning,
            ctx.colors.reset(),
            unused_keys.len()
        );
        for key in unused_keys {
            println!("  - {key}");
        }
    }
}

pub fn print_written(path: &Path, ctx: &OutputContext) {
    match ctx.mode {
        OutputMode::Quiet => println!("{}", path.display()),
        OutputMode::Diff => {}
        OutputMode::Normal => println!(
            "{}Wrote:{} {}",
            ctx.colors.success,
            ctx.colors.reset(),
            path.display()
        ),
    }
}

pub fn print_backup(path: &Path, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!(
        "{}Backup:{} {}",
        ctx.colors.info,
        ctx.colors.reset(),
        path.display()
    );
}

/// Write failures always reach stderr, whatever the output mode.
pub fn print_write_error(path: &Path, err: &io::Error, ctx: &OutputContext) {
    eprintln!(
        "{}Error:{} failed to write {}: {} (ensure no other process holds the file open)",
        ctx.colors.error,
        ctx.colors.reset(),
        path.display(),
        err
    );
}

pub fn print_backup_error(path: &Path, err: &io::Error, ctx: &OutputContext) {
    eprintln!(
        "{}Error:{} failed to back up {}: {} (apply skipped)",
        ctx.colors.error,
        ctx.colors.reset(),
        path.display(),
        err
    );
}

pub fn print_diff(label: &str, original: &str, merged: &str) {
    let diff = TextDiff::from_lines(original, merged);

    println!("--- {label}");
    println!("+++ {label}");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!();
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                print!("{sign}{change}");
            }
        }
    }
}
