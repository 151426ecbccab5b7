//! Startup configuration.
//!
//! Every option can also come from the environment so the binary stays
//! usable as a bare interactive command.

use clap::Parser;
use inventory_core::default_log_level;
use std::path::{Path, PathBuf};

const DEFAULT_LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Parser)]
#[command(
    name = "inventory",
    version = inventory_core::core_version(),
    about = "Interactive inventory tracker backed by a comma-delimited file"
)]
pub struct Args {
    /// Backing items file; created on the first add.
    #[arg(long, env = "INVENTORY_FILE", default_value = "items.csv")]
    pub file: PathBuf,

    /// Directory for rolling log files [default: ./logs].
    #[arg(long, env = "INVENTORY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// One of trace|debug|info|warn|error [default: debug, or info in release builds].
    #[arg(long, env = "INVENTORY_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    /// Absolute log directory, resolving relative values against `cwd`.
    pub fn resolved_log_dir(&self, cwd: &Path) -> PathBuf {
        match &self.log_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join(DEFAULT_LOG_DIR_NAME),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}
