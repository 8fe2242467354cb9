use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use scloc::{
    find_config_file, generate_init_file, load_config, merge_settings, resolve, run,
    should_use_colors, CliOptions, OutputContext, OutputMode, RunConfig, SclocToml, Settings,
};

#[derive(Parser)]
#[command(name = "scloc")]
#[command(version, about = "Merge a translation overlay into Star Citizen's global.ini")]
struct Cli {
    /// Base document shipped by the game (global.ini)
    #[arg(long, value_name = "PATH")]
    base: Option<PathBuf>,

    /// Overlay document with the translated entries
    #[arg(long, value_name = "PATH")]
    overlay: Option<PathBuf>,

    /// Where to write the merged document
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Also copy the merged document into the game's localization folder
    #[arg(long)]
    apply: bool,

    /// Game installation root (auto-detected when omitted)
    #[arg(long, value_name = "PATH")]
    game_dir: Option<PathBuf>,

    /// Report statistics and warnings without writing anything
    #[arg(short, long)]
    check: bool,

    /// Show the merge as a unified diff
    #[arg(short, long)]
    diff: bool,

    /// Output only written file names
    #[arg(short, long)]
    quiet: bool,

    /// Skip the backup normally taken before --apply overwrites a game file
    #[arg(long)]
    no_backup: bool,

    /// Directory for timestamped backups
    #[arg(long, value_name = "PATH")]
    backup_dir: Option<PathBuf>,

    /// Generate a template scloc.toml configuration file
    #[arg(long)]
    init: bool,

    /// Specify config file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --init command
    if cli.init {
        return handle_init();
    }

    // Load configuration
    let toml_config = load_configuration(&cli.config, cli.quiet);

    // Merge configurations: CLI > TOML > defaults
    let settings = merge_settings(&build_cli_options(&cli), toml_config.as_ref());

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.diff {
        OutputMode::Diff
    } else {
        OutputMode::Normal
    };
    let ctx = OutputContext::new(output_mode, should_use_colors(cli.no_color));

    let (base, overlay) = match required_inputs(&settings) {
        Ok(pair) => pair,
        Err(message) => {
            eprintln!("Error: {message}");
            return ExitCode::from(1);
        }
    };

    // Pre-flight: every input must exist before any merge work starts.
    let resolved = match resolve(
        &base,
        &overlay,
        &settings.output,
        settings.game_dir.as_deref(),
        cli.apply,
    ) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let run_config = RunConfig {
        check_only: cli.check,
        backup: settings.backup,
        backup_dir: settings.backup_dir.clone(),
        keep_backups: settings.keep_backups,
    };

    match run(&resolved, &run_config, &ctx) {
        Ok(report) if report.has_write_failures() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn handle_init() -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn load_configuration(explicit_path: &Option<PathBuf>, quiet: bool) -> Option<SclocToml> {
    let config_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_config_file(&d))
    });

    config_path.and_then(|p| match load_config(&p) {
        Ok(config) => {
            if !quiet {
                eprintln!("Using config: {}", p.display());
            }
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: Failed to load {}: {}", p.display(), e);
            None
        }
    })
}

fn required_inputs(settings: &Settings) -> Result<(PathBuf, PathBuf), &'static str> {
    let base = settings
        .base
        .clone()
        .ok_or("no base document configured; pass --base or set paths.base in scloc.toml")?;
    let overlay = settings
        .overlay
        .clone()
        .ok_or("no overlay document configured; pass --overlay or set paths.overlay in scloc.toml")?;
    Ok((base, overlay))
}

fn build_cli_options(cli: &Cli) -> CliOptions {
    // Boolean flags in clap are always present (default false), so false is
    // treated as "not set" for proper merging with the config file.
    CliOptions {
        base: cli.base.clone(),
        overlay: cli.overlay.clone(),
        output: cli.out.clone(),
        game_dir: cli.game_dir.clone(),
        no_backup: cli.no_backup.then_some(true),
        backup_dir: cli.backup_dir.clone(),
    }
}
