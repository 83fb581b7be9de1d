use std::path::PathBuf;

use clap::Args;
use tracing::level_filters::LevelFilter;

pub const DEFAULT_DATABASE: &str = "mcq.sqlite3";

/// Process-wide settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// SQLite database holding questions and choices
    #[arg(long, global = true, default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Default log level; `RUST_LOG` directives take precedence
    #[arg(long, global = true, default_value_t = LevelFilter::INFO)]
    pub log_level: LevelFilter,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            log_level: LevelFilter::INFO,
            log_file: None,
        }
    }
}
