//! Runtime configuration resolved from command-line arguments and environment.

use std::path::PathBuf;

use directories::ProjectDirs;
use log::LevelFilter;

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_level: LevelFilter,
}

impl Config {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.data_dir.clone(), cli.verbose, cli.log_level)
    }

    #[must_use]
    pub fn new(data_dir: Option<PathBuf>, verbose: bool, log_level: Option<LevelFilter>) -> Self {
        let log_level = log_level.unwrap_or(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
        Self {
            data_dir: data_dir.unwrap_or_else(default_data_dir),
            log_level,
        }
    }
}

/// The platform's data directory for hitlog, or `.hitlog` in the working directory
/// if the home directory cannot be determined.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("nl", "joost", "hitlog").map_or_else(
        || PathBuf::from(".hitlog"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}
