// Exact group betweenness centrality
//
// ============================================================================
// GROUP BETWEENNESS CENTRALITY (GBC)
// ============================================================================
//
// What is GBC?
// The share of shortest paths that touch at least one vertex of a group,
// summed over all ordered vertex pairs.
//
// Formula, for every unordered pair {i, j} with at least one shortest path:
//   i or j in the group           -> 1
//   some shortest path survives   -> (σ_ij - σ_ij(¬G)) / σ_ij
//   every shortest path blocked   -> 1
// Sum over pairs, then multiply by 2 for both directions.
//
// Where:
//   σ_ij      = shortest paths in the full graph
//   σ_ij(¬G)  = paths of the same length that avoid the group entirely
//
// A path "survives" when removing the group leaves the distance unchanged.
// This is the ground truth for the incremental scores in `search`.
//
// Time complexity: two all-pairs BFS runs, O(V * (V + E)), plus O(V²)
// ============================================================================

use crate::errors::{GbcError, GbcResult};
use crate::graph::Graph;
use crate::paths::{compute_path_counts, PathCounts};

/// Scores arbitrary groups against one precomputed unmasked baseline.
pub struct GroupScorer<'g> {
    graph: &'g Graph,
    baseline: PathCounts,
}

impl<'g> GroupScorer<'g> {
    /// # Errors
    /// - `TooFewVertices` if the graph has fewer than 2 vertices
    /// - any error of [`compute_path_counts`] on the unmasked graph
    pub fn new(graph: &'g Graph) -> GbcResult<Self> {
        let n = graph.vertex_count();
        if n < 2 {
            return Err(GbcError::TooFewVertices(n));
        }
        Ok(Self {
            graph,
            baseline: compute_path_counts(graph, &[])?,
        })
    }

    /// Score a group given as a membership vector.
    ///
    /// # Errors
    /// - `InvalidParameter` if `in_group.len()` differs from the vertex count
    pub fn score(&self, in_group: &[bool]) -> GbcResult<f64> {
        let n = self.graph.vertex_count();
        if in_group.len() != n {
            return Err(GbcError::InvalidParameter(format!(
                "group mask has length {}, graph has {} vertices",
                in_group.len(),
                n
            )));
        }

        let masked = compute_path_counts(self.graph, in_group)?;
        let base = &self.baseline;

        let mut total = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let sigma = base.count(i, j);
                if sigma == 0 {
                    // No shortest path at all; nothing to cover
                    continue;
                }
                if in_group[i] || in_group[j] {
                    total += 1.0;
                } else if masked.distance(i, j) == base.distance(i, j) {
                    let eliminated = sigma - masked.count(i, j);
                    total += eliminated as f64 / sigma as f64;
                } else {
                    total += 1.0;
                }
            }
        }
        Ok(total * 2.0)
    }

    /// Score a group given as 0-indexed vertex ids. Repeated ids count once.
    ///
    /// # Errors
    /// - `VertexOutOfBounds` if any id is >= vertex count
    pub fn score_members(&self, members: &[usize]) -> GbcResult<f64> {
        let mask = membership_mask(self.graph.vertex_count(), members)?;
        self.score(&mask)
    }
}

/// Exact GBC of the group `in_group` (one flag per vertex).
///
/// # Errors
/// - `TooFewVertices` if the graph has fewer than 2 vertices
/// - `InvalidParameter` if the mask length differs from the vertex count
pub fn group_betweenness_centrality(graph: &Graph, in_group: &[bool]) -> GbcResult<f64> {
    GroupScorer::new(graph)?.score(in_group)
}

/// Convert 0-indexed member ids to a membership vector of length `vertex_count`.
pub fn membership_mask(vertex_count: usize, members: &[usize]) -> GbcResult<Vec<bool>> {
    let mut mask = vec![false; vertex_count];
    for &v in members {
        if v >= vertex_count {
            return Err(GbcError::VertexOutOfBounds { vertex: v, vertex_count });
        }
        mask[v] = true;
    }
    Ok(mask)
}
