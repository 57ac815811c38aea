// All-pairs shortest-path distances and shortest-path counts
//
// ============================================================================
// SHORTEST-PATH COUNTING
// ============================================================================
//
// For every source s we run one BFS. When a vertex w is first reached from u:
//   d(s, w) = d(s, u) + 1
//   σ(s, w) = σ(s, u)
// When w is reached again from another u' on the same layer:
//   σ(s, w) += σ(s, u')
//
// This is the forward half of Brandes' algorithm, without the dependency
// back-propagation. BFS pops vertices layer by layer, so σ(s, u) is final by
// the time u is popped.
//
// MASKING:
// Masked vertices behave as if they were removed from the graph. They are
// never a source, never entered and never an intermediate vertex. Their rows
// and columns stay unreachable (distance None, count 0).
//
// Counts are u64 and checked: a pair with more than u64::MAX shortest paths
// is an error, not a wrapped count.
//
// Time complexity: O(V * (V + E))
// ============================================================================

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::errors::{GbcError, GbcResult};
use crate::graph::Graph;
use crate::matrix::SquareMatrix;

/// Shortest-path length per pair. `None` = unreachable or masked.
pub type DistanceMatrix = SquareMatrix<Option<u32>>;

/// Number of distinct shortest paths per pair. 0 = unreachable or masked.
pub type PathCountMatrix = SquareMatrix<u64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCounts {
    pub distances: DistanceMatrix,
    pub counts: PathCountMatrix,
}

impl PathCounts {
    pub fn vertex_count(&self) -> usize {
        self.distances.size()
    }

    pub fn distance(&self, s: usize, t: usize) -> Option<u32> {
        self.distances[(s, t)]
    }

    pub fn count(&self, s: usize, t: usize) -> u64 {
        self.counts[(s, t)]
    }
}

/// Largest vertex count for which all-pairs matrices are built
/// (two n×n matrices, 16 bytes per pair: 64 GiB at the limit).
pub const MAX_ALL_PAIRS_VERTICES: usize = 1 << 16;

/// Compute distances and shortest-path counts between every pair of unmasked vertices.
///
/// Sources are processed in parallel with rayon; each BFS row is independent.
///
/// # Arguments
/// * `graph` - Undirected graph
/// * `mask` - `mask[v] == true` removes v. A mask whose length differs from the
///   vertex count is treated as empty.
///
/// # Errors
/// - `TooManyVertices` if the graph exceeds [`MAX_ALL_PAIRS_VERTICES`]
/// - `PathCountOverflow` if some pair has more than `u64::MAX` shortest paths
pub fn compute_path_counts(graph: &Graph, mask: &[bool]) -> GbcResult<PathCounts> {
    let n = graph.vertex_count();
    if n > MAX_ALL_PAIRS_VERTICES {
        return Err(GbcError::TooManyVertices {
            vertex_count: n,
            limit: MAX_ALL_PAIRS_VERTICES,
        });
    }
    let unmasked;
    let mask = if mask.len() == n {
        mask
    } else {
        unmasked = vec![false; n];
        unmasked.as_slice()
    };

    let rows: Vec<(Vec<Option<u32>>, Vec<u64>)> = (0..n)
        .into_par_iter()
        .map(|source| {
            if mask[source] {
                Ok((vec![None; n], vec![0; n]))
            } else {
                bfs_from(graph, source, mask)
            }
        })
        .collect::<GbcResult<_>>()?;
    let (distance_rows, count_rows): (Vec<_>, Vec<_>) = rows.into_iter().unzip();

    Ok(PathCounts {
        distances: SquareMatrix::from_rows(distance_rows),
        counts: SquareMatrix::from_rows(count_rows),
    })
}

/// One BFS row: distances and path counts from `source`.
fn bfs_from(graph: &Graph, source: usize, mask: &[bool]) -> GbcResult<(Vec<Option<u32>>, Vec<u64>)> {
    let n = graph.vertex_count();
    let mut distance: Vec<Option<u32>> = vec![None; n];
    let mut num_paths: Vec<u64> = vec![0; n];
    distance[source] = Some(0);
    num_paths[source] = 1;

    // (vertex, its distance from source)
    let mut queue: VecDeque<(usize, u32)> = VecDeque::new();
    queue.push_back((source, 0));

    while let Some((u, du)) = queue.pop_front() {
        let next = du + 1;
        for &w in graph.neighbours(u) {
            if mask[w] {
                continue;
            }
            match distance[w] {
                None => {
                    distance[w] = Some(next);
                    num_paths[w] = num_paths[u];
                    queue.push_back((w, next));
                }
                Some(dw) if dw == next => {
                    num_paths[w] = num_paths[w].checked_add(num_paths[u]).ok_or(
                        GbcError::PathCountOverflow {
                            start: source,
                            target: w,
                        },
                    )?;
                }
                Some(_) => {}
            }
        }
    }

    Ok((distance, num_paths))
}
