//! Log output
//!
//! The TUI owns the terminal, so in interactive mode logs go to a file (or
//! nowhere). Print mode writes to stderr.

use std::fs::File;
use std::path::Path;

use simplelog::LevelFilter::{self, Debug, Error, Info, Off, Trace};
use simplelog::{ConfigBuilder, WriteLogger};

use crate::error::AppError;

/// Where log records end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

pub fn level(verbose: bool, sink: LogSink<'_>) -> LevelFilter {
    match (sink, verbose) {
        (LogSink::Off, _) => Off,
        (_, true) => Trace,
        (LogSink::File(_), false) => Debug,
        (LogSink::Stderr, false) => Info,
    }
}

/// Install the global logger
pub fn install(verbose: bool, sink: LogSink<'_>) -> Result<(), AppError> {
    let level = level(verbose, sink);
    let config = ConfigBuilder::new()
        .set_target_level(Off)
        .set_location_level(Off)
        .set_time_level(Error)
        .build();
    match sink {
        LogSink::Off => {}
        LogSink::Stderr => WriteLogger::init(level, config, std::io::stderr())?,
        LogSink::File(path) => WriteLogger::init(level, config, File::create(path)?)?,
    }
    Ok(())
}
