use crate::index::Index;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const INDEX_VERSION: u32 = 1;

/// Human-readable metadata written next to the binary index data.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn data(&self) -> PathBuf {
        self.root.join("index.bin")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

/// Write the index artifact: bincode data plus a JSON meta file carrying
/// the build timestamp and format version.
pub fn save_index(paths: &IndexPaths, index: &Index, created_at: String) -> Result<()> {
    create_dir_all(&paths.root)
        .with_context(|| format!("create index directory {}", paths.root.display()))?;

    let bytes = bincode::serialize(index).context("serialize index")?;
    let mut f = File::create(paths.data())
        .with_context(|| format!("create {}", paths.data().display()))?;
    f.write_all(&bytes)?;

    let meta = MetaFile { num_docs: index.num_docs, created_at, version: INDEX_VERSION };
    let json = serde_json::to_string_pretty(&meta)?;
    let mut f = File::create(paths.meta())
        .with_context(|| format!("create {}", paths.meta().display()))?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())
        .with_context(|| format!("open {}", paths.meta().display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf).context("parse index metadata")?;
    Ok(meta)
}

/// Load a previously saved index artifact. Version mismatches and
/// positional misalignment between problems, vectors, and magnitudes are
/// rejected rather than served.
pub fn load_index(paths: &IndexPaths) -> Result<Index> {
    let meta = load_meta(paths)?;
    if meta.version != INDEX_VERSION {
        bail!("unsupported index version {} (expected {})", meta.version, INDEX_VERSION);
    }

    let mut f = File::open(paths.data())
        .with_context(|| format!("open {}", paths.data().display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let index: Index = bincode::deserialize(&buf).context("deserialize index")?;

    if index.problems.len() != index.doc_vectors.len()
        || index.problems.len() != index.doc_magnitudes.len()
    {
        bail!(
            "misaligned index artifact: {} problems, {} vectors, {} magnitudes",
            index.problems.len(),
            index.doc_vectors.len(),
            index.doc_magnitudes.len()
        );
    }
    Ok(index)
}
