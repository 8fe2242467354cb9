//! Configuration file support for scloc.
//!
//! This module provides:
//! - Loading configuration from `scloc.toml`
//! - Config file discovery (search upward from current directory)
//! - Merging CLI args, config file, and defaults
//! - Template generation with `--init`

mod file;
mod init;
mod merge;
mod toml_schema;

pub use file::{find_config_file, load_config, ConfigError};
pub use init::{generate_init_file, generate_init_file_in, SCLOC_TOML_TEMPLATE};
pub use merge::{merge_settings, CliOptions, Settings};
pub use toml_schema::{MergeSection, PathsSection, SclocToml};
