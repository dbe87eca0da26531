// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerUnionError {
    #[error("union '{0}' is shut down; cannot create new workers")]
    ShutDown(String),

    #[error("worker '{0}' has already been started")]
    AlreadyStarted(String),

    #[error("no Tokio runtime available to start worker '{0}'")]
    NoRuntime(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WorkerUnionError>;
