pub(crate) mod bootstrap;
pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod input;
pub(crate) mod level;
pub(crate) mod loop_runner;
pub(crate) mod names;
pub(crate) mod ui;

use engine::SimError;
use thiserror::Error;

use config::ConfigError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("open log file '{path}': {source}")]
    LogFile {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("install tracing subscriber: {0}")]
    Tracing(String),
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimError),
}
