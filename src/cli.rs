// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `worker-union`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "worker-union",
    version,
    about = "Run a union of workers from a scenario file, shut it down and report how each worker ended.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the scenario file (TOML).
    ///
    /// Default: `Union.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Union.toml")]
    pub config: String,

    /// Request shutdown this many milliseconds after all workers started.
    ///
    /// Overrides `[union].shutdown_after_ms` from the scenario file.
    #[arg(long, value_name = "MS")]
    pub shutdown_after_ms: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WORKER_UNION_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the scenario, but don't start any workers.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
