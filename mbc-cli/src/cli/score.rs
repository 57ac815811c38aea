//! Score command - exact group betweenness centrality of one group

use anyhow::{Context, Result};
use mbc_fast::{GroupScorer, RankedGroup};
use std::io::Write;
use std::path::Path;

use crate::config::OutputFormat;

/// Run the score command. `vertices` are 1-indexed, as typed by the user.
pub fn run(graph_path: &Path, vertices: &[usize], simple: bool, format: OutputFormat) -> Result<()> {
    let graph = super::load_graph(graph_path, simple)?;
    let members = to_zero_indexed(vertices, graph.vertex_count())?;

    let scorer = GroupScorer::new(&graph)
        .with_context(|| format!("Cannot score groups on {}", graph_path.display()))?;
    let score = scorer.score_members(&members)?;

    let group = RankedGroup { score, members };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => writeln!(out, "{}", group)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &group)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Convert, de-duplicate and sort 1-indexed ids.
fn to_zero_indexed(vertices: &[usize], vertex_count: usize) -> Result<Vec<usize>> {
    let mut members = Vec::with_capacity(vertices.len());
    for &v in vertices {
        if v == 0 || v > vertex_count {
            anyhow::bail!("Vertex {} out of range 1-{}", v, vertex_count);
        }
        members.push(v - 1);
    }
    members.sort_unstable();
    members.dedup();
    Ok(members)
}
