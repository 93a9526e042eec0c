use anyhow::{bail, Result};
use axum::Router;
use clap::Parser;
use engine::lifecycle::IndexSource;
use server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Raw corpus JSON file; the index is built at startup
    #[arg(long, conflicts_with = "index")]
    corpus: Option<PathBuf>,
    /// Prebuilt index artifact directory
    #[arg(long)]
    index: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let source = match (args.corpus, args.index) {
        (Some(corpus), None) => IndexSource::Corpus(corpus),
        (None, Some(dir)) => IndexSource::Artifact(dir),
        _ => bail!("exactly one of --corpus or --index is required"),
    };
    // Initialization failure is fatal; the engine cannot serve queries.
    let index = Arc::new(source.load()?);
    let app: Router = build_app(index);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
