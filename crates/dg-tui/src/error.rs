//! Front-end errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use dg_core::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Logger already installed: {0}")]
    Logger(#[from] log::SetLoggerError),
}
