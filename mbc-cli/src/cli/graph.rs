//! Graph command - summary and canonical text form of a graph file

use anyhow::Result;
use console::style;
use std::path::Path;

/// Print counts and connectivity to stderr, the graph itself to stdout.
pub fn run(graph_path: &Path, simple: bool) -> Result<()> {
    let graph = super::load_graph(graph_path, simple)?;

    // One BFS; no all-pairs matrices for a dump
    let connectivity = match graph.first_unreachable_pair() {
        None => style("connected".to_string()).green(),
        Some((u, v)) => style(format!("disconnected (no path {} - {})", u + 1, v + 1)).yellow(),
    };

    eprintln!(
        "{} {} vertices, {} edges, {}",
        style("Graph:").bold(),
        style(graph.vertex_count()).cyan(),
        style(graph.edge_count()).cyan(),
        connectivity
    );

    let stdout = std::io::stdout();
    graph.write_to(stdout.lock())?;
    Ok(())
}
