// Maximum group betweenness centrality search
//
// ============================================================================
// INCREMENTAL BRANCH ENUMERATION
// ============================================================================
//
// What are we looking for?
// The k-vertex groups with the highest group betweenness centrality (see
// `scorer`). Scoring each of the C(n, k) groups from scratch would mean two
// all-pairs BFS runs per group. Instead the search builds groups one vertex
// at a time and only pays O(n²) per step.
//
// The trick:
// Keep a working path-count matrix W where W[i][j] is the number of shortest
// i-j paths (of the *original* length) that avoid every vertex already in the
// group. Adding v covers
//   W[i][v] * W[v][j]   if v lies on a shortest i-j path (d(i,j) = d(i,v) + d(v,j))
//   W[i][j]             if v is an endpoint of a pair with no shortest path
// Shortest paths through v split at v, so their count is the product of the
// two halves. The step's score gain is 2 * Σ covered / σ_ij.
//
// Then W -= covered before recursing and W += covered after. Sibling branches
// always see the matrix exactly as their parent left it.
//
// Groups are generated in increasing vertex order, so every combination is
// visited once. The loop bound n - (k - depth) leaves enough vertices to
// finish the group.
//
// Time complexity: O(C(n, k) * n²) after one O(n * (n + m)) baseline
// ============================================================================

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{GbcError, GbcResult};
use crate::graph::Graph;
use crate::leaderboard::{Leaderboard, RankedGroup, DEFAULT_LEADERBOARD_SIZE};
use crate::matrix::SquareMatrix;
use crate::paths::{compute_path_counts, PathCountMatrix, PathCounts};

/// Search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of vertices per group (k)
    pub group_size: usize,
    /// Number of best groups retained
    pub leaderboard_size: usize,
    /// Score disconnected graphs instead of rejecting them; unreachable pairs score 0
    pub allow_disconnected: bool,
    /// Explore depth-0 branches in parallel
    pub parallel: bool,
}

impl SearchConfig {
    pub fn new(group_size: usize) -> Self {
        Self {
            group_size,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            allow_disconnected: false,
            parallel: false,
        }
    }

    pub fn with_leaderboard_size(mut self, leaderboard_size: usize) -> Self {
        self.leaderboard_size = leaderboard_size;
        self
    }

    pub fn allow_disconnected(mut self, allow: bool) -> Self {
        self.allow_disconnected = allow;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Result of a search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub group_size: usize,
    /// Best groups, ascending by score
    pub groups: Vec<RankedGroup>,
    /// Complete groups scored
    pub groups_evaluated: u64,
}

impl SearchOutcome {
    /// Highest-scoring group found.
    pub fn best(&self) -> Option<&RankedGroup> {
        self.groups.last()
    }
}

/// Find the groups of `config.group_size` vertices with maximum GBC.
///
/// # Errors
/// - `InvalidGroupSize` if the group size is 0 or exceeds the vertex count
/// - `InvalidParameter` if the leaderboard size is 0
/// - `Disconnected` if some pair has no path and `allow_disconnected` is off
/// - `TooManyVertices` or `PathCountOverflow` from the baseline path counts
pub fn maximum_betweenness_centrality(graph: &Graph, config: &SearchConfig) -> GbcResult<SearchOutcome> {
    let n = graph.vertex_count();
    let k = config.group_size;
    if k == 0 || k > n {
        return Err(GbcError::InvalidGroupSize {
            group_size: k,
            vertex_count: n,
        });
    }
    // Validates leaderboard_size before any expensive work
    let mut leaderboard = Leaderboard::new(config.leaderboard_size)?;

    if !config.allow_disconnected {
        if let Some((start, target)) = graph.first_unreachable_pair() {
            return Err(GbcError::Disconnected { start, target });
        }
    }
    let baseline = compute_path_counts(graph, &[])?;
    debug!(
        "Baseline path counts ready: {} vertices, {} edges, k = {}",
        n,
        graph.edge_count(),
        k
    );

    let groups_evaluated = if config.parallel {
        let branches: Vec<(Leaderboard, u64)> = (0..=n - k)
            .into_par_iter()
            .map(|first| {
                let mut search = GroupSearch::new(&baseline, k, leaderboard.clone());
                search.extend_with(first, 0, 0.0);
                (search.leaderboard, search.evaluated)
            })
            .collect();

        let mut evaluated = 0;
        for (branch, count) in branches {
            leaderboard.absorb(branch);
            evaluated += count;
        }
        evaluated
    } else {
        let mut search = GroupSearch::new(&baseline, k, leaderboard);
        search.try_extend(0, 0, 0.0);
        leaderboard = search.leaderboard;
        search.evaluated
    };

    debug!(
        "Leaderboard holds {} of {} groups",
        leaderboard.len(),
        leaderboard.capacity()
    );
    let groups = leaderboard.into_sorted_vec();
    if let Some(best) = groups.last() {
        info!(
            "Search finished: {} groups scored, best {}",
            groups_evaluated, best
        );
    }

    Ok(SearchOutcome {
        group_size: k,
        groups,
        groups_evaluated,
    })
}

/// Mutable state of one depth-first enumeration.
struct GroupSearch<'a> {
    baseline: &'a PathCounts,
    group_size: usize,
    /// W: shortest-path counts avoiding the current group
    work: PathCountMatrix,
    /// Paths covered at each depth, upper triangle only; reused across siblings
    covered: Vec<PathCountMatrix>,
    in_group: Vec<bool>,
    members: Vec<usize>,
    leaderboard: Leaderboard,
    evaluated: u64,
}

impl<'a> GroupSearch<'a> {
    fn new(baseline: &'a PathCounts, group_size: usize, leaderboard: Leaderboard) -> Self {
        let n = baseline.vertex_count();
        Self {
            baseline,
            group_size,
            work: baseline.counts.clone(),
            covered: (0..group_size).map(|_| SquareMatrix::filled(n, 0)).collect(),
            in_group: vec![false; n],
            members: Vec::with_capacity(group_size),
            leaderboard,
            evaluated: 0,
        }
    }

    fn try_extend(&mut self, start: usize, depth: usize, score: f64) {
        if depth == self.group_size {
            self.evaluated += 1;
            self.leaderboard.offer(score, &self.members);
            return;
        }

        let last = self.baseline.vertex_count() - (self.group_size - depth);
        for v in start..=last {
            self.extend_with(v, depth, score);
        }
    }

    /// Add `v` at `depth`, explore everything below it, then undo.
    fn extend_with(&mut self, v: usize, depth: usize, score: f64) {
        let gain = self.cover(v, depth);
        self.shift_work(depth, false);

        self.in_group[v] = true;
        self.members.push(v);
        self.try_extend(v + 1, depth + 1, score + gain);
        self.members.pop();
        self.in_group[v] = false;

        self.shift_work(depth, true);
    }

    /// Fill `covered[depth]` with the paths `v` newly covers and return the score gain.
    fn cover(&mut self, v: usize, depth: usize) -> f64 {
        let n = self.baseline.vertex_count();
        let distances = &self.baseline.distances;
        let sigma = &self.baseline.counts;
        let work = &self.work;
        let in_group = &self.in_group;
        let covered = &mut self.covered[depth];

        let mut gain = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let paths = if in_group[i] || in_group[j] {
                    0
                } else if on_shortest_path(distances, i, v, j) {
                    work[(i, v)] * work[(v, j)]
                } else if v == i || v == j {
                    work[(i, j)]
                } else {
                    0
                };
                covered[(i, j)] = paths;

                let total = sigma[(i, j)];
                if paths > 0 && total > 0 {
                    gain += paths as f64 / total as f64;
                }
            }
        }
        // Forward and backward directions
        gain * 2.0
    }

    /// Subtract (`restore == false`) or add back the covered counts of `depth`.
    fn shift_work(&mut self, depth: usize, restore: bool) {
        let n = self.baseline.vertex_count();
        let covered = &self.covered[depth];
        let work = &mut self.work;
        for i in 0..n {
            for j in (i + 1)..n {
                let paths = covered[(i, j)];
                if paths == 0 {
                    continue;
                }
                if restore {
                    work[(i, j)] += paths;
                    work[(j, i)] += paths;
                } else {
                    work[(i, j)] -= paths;
                    work[(j, i)] -= paths;
                }
            }
        }
    }
}

/// Whether `v` lies on some shortest i-j path. Unreachable pairs never qualify.
fn on_shortest_path(distances: &SquareMatrix<Option<u32>>, i: usize, v: usize, j: usize) -> bool {
    match (distances[(i, j)], distances[(i, v)], distances[(v, j)]) {
        (Some(ij), Some(iv), Some(vj)) => ij == iv + vj,
        _ => false,
    }
}
