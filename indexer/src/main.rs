use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use engine::index::{Index, Platform, Problem};
use engine::persist::{save_index, IndexPaths};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the TF-IDF problem search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index artifact from corpus JSON files or a directory
    Build {
        /// Input path (corpus JSON file or a directory of them)
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build(&input, &output),
    }
}

fn build(input: &str, output: &str) -> Result<()> {
    let files = collect_corpus_files(Path::new(input));
    ensure!(!files.is_empty(), "no corpus JSON files found under {input}");

    let mut problems: Vec<Problem> = Vec::new();
    for file in files {
        let data = fs::read_to_string(&file)
            .with_context(|| format!("read corpus file {}", file.display()))?;
        let batch: Vec<Problem> = serde_json::from_str(&data)
            .with_context(|| format!("parse corpus file {}", file.display()))?;
        tracing::info!(file = %file.display(), count = batch.len(), "loaded corpus file");
        problems.extend(batch);
    }

    let merged = dedup_problems(problems);
    tracing::info!(num_docs = merged.len(), "merged corpus");

    let index = Index::build(merged);
    let created_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "".into());
    save_index(&IndexPaths::new(output), &index, created_at)?;

    tracing::info!(output, num_docs = index.num_docs, "index build complete");
    Ok(())
}

fn collect_corpus_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("json") {
                files.push(p.to_path_buf());
            }
        }
        // Deterministic ingest order regardless of directory walk order.
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

/// Merge corpora from multiple platforms: a problem duplicated under the
/// same platform and title keeps only its first occurrence.
fn dedup_problems(problems: Vec<Problem>) -> Vec<Problem> {
    let mut seen: HashSet<String> = HashSet::new();
    problems
        .into_iter()
        .filter(|p| {
            let key = format!("{}::{}", Platform::from_url(&p.url), p.title.to_lowercase());
            seen.insert(key)
        })
        .collect()
}
