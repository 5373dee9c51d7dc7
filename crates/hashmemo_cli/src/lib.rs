//! Interactive command-line front end for hashmemo.

pub mod config;
pub mod menu;
pub mod session;

pub use config::CliConfig;
pub use menu::MenuAction;
pub use session::{CliError, CliResult, MemoCli, BODY_TERMINATOR};
