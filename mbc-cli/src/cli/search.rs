//! Search command - best k-vertex groups by group betweenness centrality

use anyhow::{Context, Result};
use clap::Args;
use mbc_fast::{maximum_betweenness_centrality, Graph, GroupScorer, SearchConfig, SearchOutcome};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{OutputFormat, ProjectConfig};

/// Relative tolerance for `--verify`
const VERIFY_TOLERANCE: f64 = 1e-9;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Graph file, or - for stdin
    pub graph: PathBuf,

    /// Vertices per group (default: search.group_size from config)
    #[arg(short = 'k', long = "group-size")]
    pub group_size: Option<usize>,

    /// Number of best groups to report (default: 5)
    #[arg(long)]
    pub top: Option<usize>,

    /// Output format (default: from config, else text)
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<OutputFormat>,

    /// Score disconnected graphs instead of failing (unreachable pairs count 0)
    #[arg(long)]
    pub allow_disconnected: bool,

    /// Explore first-vertex branches in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Drop self-loops and repeated edges first
    #[arg(long)]
    pub simple: bool,

    /// Re-score every reported group with the exact scorer and fail on mismatch
    #[arg(long)]
    pub verify: bool,
}

impl SearchArgs {
    /// Merge flags over config file values.
    fn search_config(&self, config: &ProjectConfig) -> Result<SearchConfig> {
        let group_size = self.group_size.or(config.search.group_size).context(
            "No group size given: pass -k <K> or set search.group_size in mbc.toml",
        )?;
        Ok(SearchConfig::new(group_size)
            .with_leaderboard_size(self.top.unwrap_or(config.search.leaderboard_size))
            .allow_disconnected(self.allow_disconnected || config.search.allow_disconnected)
            .parallel(self.parallel || config.search.parallel))
    }
}

/// Run the search command
pub fn run(args: SearchArgs, config: &ProjectConfig) -> Result<()> {
    let search_config = args.search_config(config)?;
    let graph = super::load_graph(&args.graph, args.simple || config.graph.simple)?;

    debug!("Search config: {:?}", search_config);
    let started = Instant::now();
    let outcome = maximum_betweenness_centrality(&graph, &search_config)
        .with_context(|| format!("Search failed on {}", args.graph.display()))?;
    info!(
        "Scored {} groups in {:.2?}",
        outcome.groups_evaluated,
        started.elapsed()
    );

    if args.verify {
        verify(&graph, &outcome)?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_outcome(&mut out, &outcome, args.format.unwrap_or(config.output.format))?;
    out.flush()?;
    Ok(())
}

/// Check every reported score against the exact scorer.
fn verify(graph: &Graph, outcome: &SearchOutcome) -> Result<()> {
    if graph.vertex_count() < 2 {
        debug!("Skipping verification: fewer than 2 vertices");
        return Ok(());
    }
    let scorer = GroupScorer::new(graph)?;
    for group in &outcome.groups {
        let exact = scorer.score_members(&group.members)?;
        let scale = group.score.abs().max(exact.abs()).max(1.0);
        if (group.score - exact).abs() > VERIFY_TOLERANCE * scale {
            anyhow::bail!(
                "Verification failed for group {:?}: search reported {}, exact score is {}",
                group.one_indexed(),
                group.score,
                exact
            );
        }
    }
    info!("Verified {} groups against the exact scorer", outcome.groups.len());
    Ok(())
}

fn write_outcome<W: Write>(out: &mut W, outcome: &SearchOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for group in &outcome.groups {
                writeln!(out, "{}", group)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, outcome)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
