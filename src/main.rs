use std::fs::OpenOptions;

use colored::Colorize;
use env_logger::{Builder, Env, Target};
use log::info;

use pomowork::config::{Config, Paths};
use pomowork::error::PomoworkError;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PomoworkError> {
    let paths = Paths::new()?;
    paths.ensure_dirs()?;
    let config = Config::load_or_create(&paths)?;

    init_logging(&config, &paths)?;
    info!("pomowork {} starting", env!("CARGO_PKG_VERSION"));

    pomowork::tui::run(&config, &paths)
}

/// Send log output to the log file; the terminal belongs to the UI.
fn init_logging(config: &Config, paths: &Paths) -> Result<(), PomoworkError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)?;

    let level = config.logging.level_filter().to_string();

    Builder::from_env(Env::default().default_filter_or(level))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| PomoworkError::Config(format!("Failed to initialize logging: {e}")))
}
