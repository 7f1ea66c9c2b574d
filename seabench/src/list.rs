// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

//! Loading the benchmark list.

use crate::{Error, Result};
use std::path::Path;

/// The ordered set of circuit files to drive through a pipeline: one
/// relative path per line, trailing whitespace stripped, blank lines
/// skipped. Read-only for the whole run.
#[derive(Debug, Clone)]
pub struct BenchmarkList {
    entries: Vec<String>,
}

impl BenchmarkList {
    /// Reads a list file. A missing file is fatal before any tool runs.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::BenchmarkList {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
