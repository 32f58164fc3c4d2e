//! Logger setup for the command-line tool

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use log::debug;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Log to the terminal, and additionally to `log_file` at debug level.
///
/// `verbose` lowers the terminal level from info to debug.
pub fn init_logger(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }
    CombinedLogger::init(loggers).context("Failed to initialize logger")?;

    debug!("Logger successfully initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use log::info;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_log_file_receives_debug_output() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("mondrago.log");

        init_logger(false, Some(&path)).unwrap();
        info!("solving");

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Logger successfully initialized"));
        assert!(written.contains("solving"));

        // The global logger can only be installed once per process
        assert!(init_logger(false, None).is_err());
    }

    #[test]
    fn test_unwritable_log_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing").join("mondrago.log");
        assert!(init_logger(false, Some(&path)).is_err());
    }
}
