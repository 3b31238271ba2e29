use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::{fs, io};

use beamx::{BeamConfig, ConfigError};
use clap::{ArgAction, Parser};
use simplelog::LevelFilter;
use thiserror::Error;

/// Command line options for the beam deflection report.
#[derive(Debug, Parser)]
#[command(name = "beamx", version)]
#[command(about = "Compare Runge-Kutta and central-difference beam deflection curves")]
pub struct Cli {
    /// JSON file with beam and solver settings; defaults are used when absent.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Print both curves as JSON instead of a text report.
    #[arg(long)]
    pub json: bool,
    /// Print every Kth sample in the text table.
    #[arg(long, value_name = "K", default_value = "10")]
    pub every: NonZeroUsize,
    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Error returned when the command line configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum CliError {
    /// Returned when the configuration file cannot be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Returned when the configuration file is malformed or out of range.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Cli {
    /// Log level selected by the number of `-v` flags.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Load the configuration file, or the defaults when none was given.
    pub fn load_config(&self) -> Result<BeamConfig, CliError> {
        let Some(path) = &self.config else {
            return Ok(BeamConfig::default());
        };
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(BeamConfig::from_json(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_need_no_arguments() {
        let cli = Cli::try_parse_from(["beamx"]).expect("no arguments required");
        assert!(cli.config.is_none());
        assert!(!cli.json);
        assert_eq!(cli.every.get(), 10);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
        assert_eq!(cli.load_config().expect("defaults load"), BeamConfig::default());
    }

    #[test]
    fn verbosity_and_stride_are_parsed() {
        let cli = Cli::try_parse_from(["beamx", "-vv", "--every", "5", "--json"])
            .expect("valid arguments");
        assert_eq!(cli.log_level(), LevelFilter::Debug);
        assert_eq!(cli.every.get(), 5);
        assert!(cli.json);
        assert!(Cli::try_parse_from(["beamx", "--every", "0"]).is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let cli = Cli::try_parse_from(["beamx", "--config", "/nonexistent/beam.json"])
            .expect("valid arguments");
        let error = cli.load_config().expect_err("missing file rejected");
        assert!(matches!(error, CliError::Read { .. }));
    }
}
