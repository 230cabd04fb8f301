//! Console entry point for the Olympics catalog.
//!
//! # Responsibility
//! - Load configuration, bootstrap logging and stores, run the menu.
//! - Exit 0 on a normal quit, nonzero on a fatal startup error.

mod console;
mod input;

use clap::Parser;
use console::Console;
use log::info;
use olympics_core::{init_logging, logging_status, AppConfig};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "olympics", about = "Olympic games catalog console", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "olympics.toml")]
    config: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fatal: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load(config_path)?;
    if let Some(logging) = &config.logging {
        init_logging(&logging.level, &logging.directory)?;
    }
    if let Some((level, log_dir)) = logging_status() {
        info!(
            "event=startup module=cli status=ok log_level={level} log_dir={}",
            log_dir.display()
        );
    }

    let mut console = Console::new(&config)?;
    console.run()?;
    Ok(())
}
