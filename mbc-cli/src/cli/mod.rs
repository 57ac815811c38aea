//! CLI command definitions and handlers

mod graph;
mod init;
mod score;
mod search;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mbc_fast::Graph;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{load_config_file, load_project_config, OutputFormat, ProjectConfig};

pub use search::SearchArgs;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// mbc - maximum group betweenness centrality
#[derive(Parser, Debug)]
#[command(name = "mbc")]
#[command(
    version,
    about = "Find the vertex groups that cover the most shortest paths in an undirected graph",
    long_about = "mbc enumerates every k-vertex group of an undirected, unweighted graph and \
reports the groups with the highest group betweenness centrality: the share of shortest \
paths, over all vertex pairs, that pass through at least one group vertex.\n\n\
Graphs are read as text: a header line `n m`, then m lines of two 1-indexed vertex ids.",
    after_help = "\
Examples:
  mbc search graph.txt -k 3                 Best 5 groups of 3 vertices
  mbc search graph.txt -k 2 --top 10        Keep the best 10 groups
  mbc search - -k 2 --format json < g.txt   Read stdin, JSON output
  mbc score graph.txt 1 4 7                 Exact score of one group
  mbc graph graph.txt --simple              Normalised copy of a graph
  mbc init                                  Write a default mbc.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ./mbc.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of worker threads for parallel work (1-64, default: all cores)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for the k-vertex groups with maximum betweenness centrality
    #[command(after_help = "\
Output (text): one line per group, ascending by score
  <score>: <v1> <v2> ... <vk>")]
    Search(SearchArgs),

    /// Compute the exact group betweenness centrality of one group
    Score {
        /// Graph file, or - for stdin
        graph: PathBuf,

        /// Group members (1-indexed)
        #[arg(required = true, num_args = 1..)]
        vertices: Vec<usize>,

        /// Drop self-loops and repeated edges first
        #[arg(long)]
        simple: bool,

        /// Output format (default: from config, else text)
        #[arg(long, short = 'f', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print a graph's summary (stderr) and canonical text form (stdout)
    Graph {
        /// Graph file, or - for stdin
        graph: PathBuf,

        /// Drop self-loops and repeated edges
        #[arg(long)]
        simple: bool,
    },

    /// Write a default mbc.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    if let Some(workers) = cli.workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    match cli.command {
        Commands::Init { dir } => init::run(&dir),

        Commands::Search(args) => {
            let config = resolve_config(cli.config.as_deref())?;
            search::run(args, &config)
        }

        Commands::Score {
            graph,
            vertices,
            simple,
            format,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            score::run(
                &graph,
                &vertices,
                simple || config.graph.simple,
                format.unwrap_or(config.output.format),
            )
        }

        Commands::Graph { graph, simple } => {
            let config = resolve_config(cli.config.as_deref())?;
            graph::run(&graph, simple || config.graph.simple)
        }
    }
}

/// Explicit `--config` must load; otherwise look for ./mbc.toml.
fn resolve_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => Ok(load_project_config(Path::new("."))),
    }
}

/// Read a graph from a file, or stdin for `-`.
pub(crate) fn load_graph(path: &Path, simple: bool) -> Result<Graph> {
    let graph = if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read graph from stdin")?;
        Graph::read(input.as_bytes()).context("Invalid graph on stdin")?
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open graph file {}", path.display()))?;
        Graph::read(std::io::BufReader::new(file))
            .with_context(|| format!("Invalid graph file {}", path.display()))?
    };

    debug!(
        "Loaded graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    if simple {
        let simplified = graph.simplified();
        debug!(
            "Simplified graph: {} -> {} edges",
            graph.edge_count(),
            simplified.edge_count()
        );
        Ok(simplified)
    } else {
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("4"), Ok(4));
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("65").is_err());
        assert!(parse_workers("many").is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_args() {
        let cli = Cli::try_parse_from(["mbc", "search", "g.txt", "-k", "3", "--top", "7", "--parallel"]).unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.group_size, Some(3));
                assert_eq!(args.top, Some(7));
                assert!(args.parallel);
                assert!(!args.verify);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_score_requires_vertices() {
        assert!(Cli::try_parse_from(["mbc", "score", "g.txt"]).is_err());
    }

    #[test]
    fn test_load_graph_simple() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.txt");
        std::fs::write(&path, "3 3\n1 2\n2 1\n2 3\n").unwrap();

        assert_eq!(load_graph(&path, false).unwrap().edge_count(), 3);
        assert_eq!(load_graph(&path, true).unwrap().edge_count(), 2);
    }

    #[test]
    fn test_load_graph_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "3 2\n1 2\n").unwrap();

        let err = load_graph(&path, false).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("bad.txt"));
        assert!(message.contains("expected 6 tokens, found 4"));
    }
}
