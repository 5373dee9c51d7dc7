//! `hashmemo` entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the memo store.
//! - Hand an injected `MemoService` to the interactive session.

use clap::Parser;
use hashmemo_cli::{CliConfig, MemoCli};
use hashmemo_core::{init_logging, MemoService, SqliteMemoStore};
use log::{error, info};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::parse();

    // Logging is best-effort; the memo book stays usable without it.
    match config.log_dir() {
        Ok(log_dir) => {
            if let Err(err) = init_logging(config.log_level(), &log_dir) {
                eprintln!("warning: logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("warning: logging disabled: cannot resolve log dir: {err}"),
    }

    let store = match SqliteMemoStore::open(&config.db) {
        Ok(store) => store,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={}", err);
            eprintln!("failed to open memo database `{}`: {err}", config.db.display());
            return ExitCode::FAILURE;
        }
    };
    info!(
        "event=cli_start module=cli status=ok version={}",
        hashmemo_core::core_version()
    );

    let service = MemoService::new(store);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = MemoCli::new(&service, stdin.lock(), stdout.lock());
    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_session module=cli status=error error={}", err);
            eprintln!("hashmemo: {err}");
            ExitCode::FAILURE
        }
    }
}
