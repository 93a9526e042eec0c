use crate::index::{Index, Problem};
use crate::persist::{load_index, IndexPaths};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Where the index comes from at startup: built synchronously from a raw
/// corpus file, or loaded from a precomputed artifact directory.
#[derive(Debug, Clone)]
pub enum IndexSource {
    Corpus(PathBuf),
    Artifact(PathBuf),
}

impl IndexSource {
    /// Construct the index once. Failures here are fatal to the service;
    /// there is nothing to retry.
    pub fn load(&self) -> Result<Index> {
        match self {
            IndexSource::Corpus(path) => {
                let data = std::fs::read_to_string(path)
                    .with_context(|| format!("read corpus {}", path.display()))?;
                let problems: Vec<Problem> =
                    serde_json::from_str(&data).context("parse corpus JSON")?;
                tracing::info!(num_docs = problems.len(), "building index from corpus");
                Ok(Index::build(problems))
            }
            IndexSource::Artifact(dir) => {
                let index = load_index(&IndexPaths::new(dir))
                    .with_context(|| format!("load index artifact from {}", dir.display()))?;
                tracing::info!(num_docs = index.num_docs, "loaded prebuilt index");
                Ok(index)
            }
        }
    }
}

/// One-time initialization guard for request-per-invocation hosts: warm
/// invocations reuse the index instead of rebuilding it.
#[derive(Debug, Default)]
pub struct IndexCell {
    cell: OnceLock<Index>,
}

impl IndexCell {
    pub const fn new() -> Self {
        Self { cell: OnceLock::new() }
    }

    /// Idempotent: the first caller loads, later callers get the cached
    /// index. If two callers race, the build is pure, so the discarded
    /// loser is identical to the winner.
    pub fn get_or_load(&self, source: &IndexSource) -> Result<&Index> {
        if let Some(index) = self.cell.get() {
            return Ok(index);
        }
        let index = source.load()?;
        Ok(self.cell.get_or_init(|| index))
    }
}
