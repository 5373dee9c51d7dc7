//! Startup configuration.
//!
//! Every option can come from a flag or an environment variable; flags win.

use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "hashmemo.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "hashmemo-logs";

/// Personal memo book with tags.
#[derive(Debug, Clone, Parser)]
#[command(name = "hashmemo", version)]
pub struct CliConfig {
    /// SQLite database file. Created on first use.
    #[arg(long, env = "HASHMEMO_DB", default_value = DEFAULT_DB_FILE_NAME)]
    pub db: PathBuf,
    /// Directory for rolling log files [default: <temp dir>/hashmemo-logs].
    #[arg(long, env = "HASHMEMO_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error [default: debug in debug builds, info otherwise].
    #[arg(long, env = "HASHMEMO_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Effective log level.
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(hashmemo_core::default_log_level())
    }

    /// Effective absolute log directory.
    ///
    /// Relative paths are resolved against the current directory.
    pub fn log_dir(&self) -> io::Result<PathBuf> {
        match self.log_dir.as_deref() {
            Some(dir) => absolutize(dir),
            None => Ok(std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
        }
    }
}

fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
