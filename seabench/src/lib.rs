// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

//! Drives lists of AIGER circuits through chains of external
//! soft-error-analysis tools: a parity/alarm protector, an
//! alarm-to-model-checking converter with a bounded model checker, and a
//! vulnerability analyzer with streamed diagnostics.

pub mod config;
pub mod exec;
pub mod list;
pub mod runner;
pub mod template;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use config::{AnalyzeConfig, AnalyzeTools, BenchDirs, CheckConfig, CheckTools, ProtectOptions};
pub use exec::{ExecError, Invocation, ToolCommand};
pub use list::BenchmarkList;
pub use runner::{AnalyzeReport, AnalyzeRunner, CheckOutcome, CheckReport, CheckRunner};

/// Errors that abort a benchmark run. Every variant is terminal: there is
/// no retry and no skip-to-the-next-benchmark.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("cannot read benchmark list `{path}`: {source}")]
    BenchmarkList { path: PathBuf, source: io::Error },
    #[error("cannot create output directory `{path}`: {source}")]
    OutputDir { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Exec(#[from] ExecError),
    /// The model checker returned an exit code with no defined meaning.
    #[error("unexpected model checker exit code {code}, command: {cmd}")]
    UnexpectedCheckerExit { cmd: String, code: i32 },
    #[error("failed to write progress output: {0}")]
    Output(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
