//! mbc - find the vertex groups with maximum group betweenness centrality
//!
//! Reads an undirected graph in `n m` + edge-list text form and reports the
//! k-vertex groups that cover the most shortest paths.

use anyhow::Result;
use clap::Parser;
use mbc::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging; RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
