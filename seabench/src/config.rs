// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

//! Static configuration for the benchmark pipelines. All numeric options
//! are checked when the configuration is built, before any external
//! process is spawned.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("protection percentage must be between 0 and 100, got {0}")]
    Percentage(u32),
    #[error("average latches per error signal must be at least 1")]
    AvgLatches,
    #[error("model checking bound must be at least 1")]
    Bound,
    #[error("random test count must be at least 1")]
    TestCount,
    #[error("random test length must be at least 1")]
    TestLength,
}

/// Parameters for the redundancy/alarm injection stage: the protector
/// randomly selects `percentage` of the latches and adds one error latch
/// per `avg_latches` protected latches.
#[derive(Debug, Clone)]
pub struct ProtectOptions {
    pub(crate) percentage: u32,
    pub(crate) avg_latches: u32,
}

impl ProtectOptions {
    pub fn new(percentage: u32, avg_latches: u32) -> Result<Self, ConfigError> {
        if percentage > 100 {
            return Err(ConfigError::Percentage(percentage));
        }
        if avg_latches == 0 {
            return Err(ConfigError::AvgLatches);
        }
        Ok(Self {
            percentage,
            avg_latches,
        })
    }
}

/// Where benchmark circuits are read from and where stage outputs go.
#[derive(Debug, Clone)]
pub struct BenchDirs {
    pub benchmarks: PathBuf,
    pub tmp: PathBuf,
}

/// External binaries of the model-checking pipeline.
#[derive(Debug, Clone)]
pub struct CheckTools {
    pub protector: PathBuf,
    pub converter: PathBuf,
    pub checker: PathBuf,
}

/// Configuration of the protector -> converter -> model checker pipeline.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub(crate) tools: CheckTools,
    pub(crate) dirs: BenchDirs,
    pub(crate) protect: ProtectOptions,
    pub(crate) bound: u32,
}

impl CheckConfig {
    pub fn new(
        tools: CheckTools,
        dirs: BenchDirs,
        protect: ProtectOptions,
        bound: u32,
    ) -> Result<Self, ConfigError> {
        if bound == 0 {
            return Err(ConfigError::Bound);
        }
        Ok(Self {
            tools,
            dirs,
            protect,
            bound,
        })
    }
}

/// External binaries of the fault-analysis pipeline.
#[derive(Debug, Clone)]
pub struct AnalyzeTools {
    pub protector: PathBuf,
    pub analyzer: PathBuf,
}

/// Configuration of the protector -> analyzer pipeline.
///
/// `backend_mode` is passed to the analyzer verbatim (whitespace-split
/// into individual arguments); the harness does not interpret it.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub(crate) tools: AnalyzeTools,
    pub(crate) dirs: BenchDirs,
    pub(crate) protect: ProtectOptions,
    pub(crate) random_test_count: u32,
    pub(crate) random_test_length: u32,
    pub(crate) backend_mode: String,
    pub(crate) seed: Option<u64>,
}

impl AnalyzeConfig {
    pub fn new(
        tools: AnalyzeTools,
        dirs: BenchDirs,
        protect: ProtectOptions,
        random_test_count: u32,
        random_test_length: u32,
        backend_mode: impl Into<String>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if random_test_count == 0 {
            return Err(ConfigError::TestCount);
        }
        if random_test_length == 0 {
            return Err(ConfigError::TestLength);
        }
        Ok(Self {
            tools,
            dirs,
            protect,
            random_test_count,
            random_test_length,
            backend_mode: backend_mode.into(),
            seed,
        })
    }
}
