// Undirected graph container and its text format
//
// Adjacency lists give O(1) access to a vertex's neighbours. Checking whether an
// edge exists is linear in the smaller of the two neighbourhoods.
//
// TEXT FORMAT:
//   n m
//   u1 v1
//   ...
//   um vm
//
// Vertex ids in the text are 1-indexed, in both directions. Internally every
// vertex is a 0-indexed usize. Tokens are whitespace separated, so the edge
// pairs may also sit on a single line.
//
// Duplicate edges are kept (they multiply shortest-path counts, as in a
// multigraph) and self-loops are accepted. `simplified()` drops both.
//
// The header's vertex count is checked against MAX_VERTEX_COUNT before any
// adjacency list is allocated.

use std::collections::VecDeque;
use std::fmt;
use std::io::{Read, Write};
use std::str::SplitWhitespace;

use rustc_hash::FxHashSet;

use crate::errors::{GbcError, GbcResult};

/// Largest vertex count accepted from text input.
pub const MAX_VERTEX_COUNT: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    edge_count: usize,
    neighbours: Vec<Vec<usize>>,
}

impl Graph {
    /// Graph with `vertex_count` isolated vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edge_count: 0,
            neighbours: vec![Vec::new(); vertex_count],
        }
    }

    /// Build from 0-indexed edge pairs.
    ///
    /// # Errors
    /// - `VertexOutOfBounds` if any endpoint is >= vertex_count
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize)]) -> GbcResult<Self> {
        let mut graph = Self::new(vertex_count);
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Read exactly `edge_count` 1-indexed edge pairs for a graph of `vertex_count` vertices.
    /// Anything after the last pair is left unread.
    ///
    /// # Errors
    /// - `TooManyVertices` if `vertex_count` exceeds [`MAX_VERTEX_COUNT`]
    /// - `UnexpectedEof` if fewer than `2 * edge_count` tokens are available
    /// - `InvalidToken` for anything that is not a non-negative integer
    /// - `VertexOutOfBounds` for an id of 0 or greater than `vertex_count`
    pub fn read_edges<R: Read>(vertex_count: usize, edge_count: usize, mut reader: R) -> GbcResult<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let mut tokens = Tokens::new(&input);
        Self::parse_edges(vertex_count, edge_count, &mut tokens, edge_count.saturating_mul(2))
    }

    /// Read a graph whose `n m` header precedes the edge pairs.
    /// The input must end after the last declared edge.
    ///
    /// # Errors
    /// Same as [`Graph::read_edges`], with token counts including the header.
    /// - `TrailingInput` if tokens follow the last declared edge
    pub fn read<R: Read>(mut reader: R) -> GbcResult<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let mut tokens = Tokens::new(&input);
        let vertex_count = tokens.next_usize(2)?;
        let edge_count = tokens.next_usize(2)?;
        let expected = edge_count.saturating_mul(2).saturating_add(2);
        let graph = Self::parse_edges(vertex_count, edge_count, &mut tokens, expected)?;

        let leftover = tokens.drain();
        if leftover > 0 {
            return Err(GbcError::TrailingInput {
                expected,
                found: tokens.consumed,
            });
        }
        Ok(graph)
    }

    fn parse_edges(
        vertex_count: usize,
        edge_count: usize,
        tokens: &mut Tokens<'_>,
        expected: usize,
    ) -> GbcResult<Self> {
        if vertex_count > MAX_VERTEX_COUNT {
            return Err(GbcError::TooManyVertices {
                vertex_count,
                limit: MAX_VERTEX_COUNT,
            });
        }
        let mut graph = Self::new(vertex_count);
        for _ in 0..edge_count {
            let u = tokens.next_usize(expected)?;
            let v = tokens.next_usize(expected)?;
            let u = one_to_zero_index(u, vertex_count)?;
            let v = one_to_zero_index(v, vertex_count)?;
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Number of edges added, duplicates and self-loops included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbours of `u` in insertion order. Panics if `u` is out of bounds.
    pub fn neighbours(&self, u: usize) -> &[usize] {
        &self.neighbours[u]
    }

    pub fn degree(&self, u: usize) -> usize {
        self.neighbours[u].len()
    }

    /// Whether an edge joins `u` and `v`. Scans the shorter adjacency list.
    /// Out-of-bounds vertices are never connected.
    pub fn are_connected(&self, u: usize, v: usize) -> bool {
        if u >= self.vertex_count() || v >= self.vertex_count() {
            return false;
        }
        let (scan, needle) = if self.neighbours[u].len() > self.neighbours[v].len() {
            (v, u)
        } else {
            (u, v)
        };
        self.neighbours[scan].contains(&needle)
    }

    /// Append an undirected edge. No de-duplication; self-loops are allowed.
    ///
    /// # Errors
    /// - `VertexOutOfBounds` if either endpoint is >= vertex_count
    pub fn add_edge(&mut self, u: usize, v: usize) -> GbcResult<&mut Self> {
        let n = self.vertex_count();
        for vertex in [u, v] {
            if vertex >= n {
                return Err(GbcError::VertexOutOfBounds { vertex, vertex_count: n });
            }
        }
        self.neighbours[u].push(v);
        self.neighbours[v].push(u);
        self.edge_count += 1;
        Ok(self)
    }

    /// First vertex, in id order, with no path from `source`.
    ///
    /// One BFS, O(V + E). Returns `None` when every vertex is reachable or
    /// `source` is out of bounds.
    pub fn first_unreachable_from(&self, source: usize) -> Option<usize> {
        let n = self.vertex_count();
        if source >= n {
            return None;
        }
        let mut visited = vec![false; n];
        visited[source] = true;
        let mut queue = VecDeque::from([source]);
        while let Some(u) = queue.pop_front() {
            for &w in &self.neighbours[u] {
                if !visited[w] {
                    visited[w] = true;
                    queue.push_back(w);
                }
            }
        }
        visited.iter().position(|&seen| !seen)
    }

    /// First pair `(s, t)`, s < t, with no path between them, in row order.
    /// `None` exactly when the graph is connected.
    ///
    /// In a disconnected graph some vertex is unreachable from vertex 0, so
    /// the first such pair always starts at 0.
    pub fn first_unreachable_pair(&self) -> Option<(usize, usize)> {
        self.first_unreachable_from(0).map(|target| (0, target))
    }

    /// Copy of this graph with self-loops and repeated edges removed.
    /// First occurrences keep their adjacency order.
    pub fn simplified(&self) -> Graph {
        let mut seen: FxHashSet<usize> = FxHashSet::default();
        let neighbours: Vec<Vec<usize>> = self
            .neighbours
            .iter()
            .enumerate()
            .map(|(u, list)| {
                seen.clear();
                list.iter().copied().filter(|&v| v != u && seen.insert(v)).collect()
            })
            .collect();
        let edge_count = neighbours.iter().map(Vec::len).sum::<usize>() / 2;
        Graph { edge_count, neighbours }
    }

    /// Write the graph in its 1-indexed text format.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }
}

impl fmt::Display for Graph {
    /// `n m`, then each edge once as `u v` with u <= v, ordered by u then by
    /// u's adjacency order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.vertex_count(), self.edge_count)?;
        for (src, list) in self.neighbours.iter().enumerate() {
            // A self-loop appears twice in its own list
            let mut loop_half_seen = false;
            for &neighbour in list {
                if src < neighbour {
                    writeln!(f, "{} {}", src + 1, neighbour + 1)?;
                } else if src == neighbour {
                    if loop_half_seen {
                        writeln!(f, "{} {}", src + 1, src + 1)?;
                    }
                    loop_half_seen = !loop_half_seen;
                }
            }
        }
        Ok(())
    }
}

fn one_to_zero_index(id: usize, vertex_count: usize) -> GbcResult<usize> {
    if id == 0 || id > vertex_count {
        return Err(GbcError::VertexOutOfBounds { vertex: id, vertex_count });
    }
    Ok(id - 1)
}

/// Whitespace tokenizer that remembers how many tokens it handed out.
struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
    consumed: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            iter: input.split_whitespace(),
            consumed: 0,
        }
    }

    fn next_usize(&mut self, expected: usize) -> GbcResult<usize> {
        let token = self.iter.next().ok_or(GbcError::UnexpectedEof {
            expected,
            found: self.consumed,
        })?;
        self.consumed += 1;
        token.parse().map_err(|_| GbcError::InvalidToken {
            token: token.to_string(),
            position: self.consumed,
        })
    }

    /// Consume the rest of the input and return how many tokens were left.
    fn drain(&mut self) -> usize {
        let rest = self.iter.by_ref().count();
        self.consumed += rest;
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> Graph {
        Graph::read_edges(6, 5, "1 2 1 3 1 4 1 5 1 6".as_bytes()).unwrap()
    }

    #[test]
    fn test_read_edges_with_given_sizes() {
        let graph = star();
        for i in 0..6 {
            for j in 0..6 {
                assert_eq!(graph.are_connected(i, j), (i == 0) ^ (j == 0), "edge {i}-{j}");
            }
        }
    }

    #[test]
    fn test_read_with_header() {
        let graph = Graph::read("6 5\n1 2\n1 3\n1 4\n1 5\n1 6\n".as_bytes()).unwrap();
        assert_eq!(graph, star());
        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_empty_and_isolated_graphs() {
        let empty = Graph::read("0 0".as_bytes()).unwrap();
        assert_eq!(empty.vertex_count(), 0);

        let isolated = Graph::read("100 0".as_bytes()).unwrap();
        for i in 0..100 {
            for j in 0..100 {
                assert!(!isolated.are_connected(i, j));
            }
        }
    }

    #[test]
    fn test_add_edge_matches_read() {
        let reference = Graph::read_edges(5, 4, "1 2 2 3 3 4 4 5".as_bytes()).unwrap();
        let mut built = Graph::new(5);
        built
            .add_edge(0, 1)
            .unwrap()
            .add_edge(2, 3)
            .unwrap()
            .add_edge(1, 2)
            .unwrap()
            .add_edge(4, 3)
            .unwrap();

        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(reference.are_connected(i, j), built.are_connected(i, j));
            }
        }
    }

    #[test]
    fn test_duplicate_edges_are_kept() {
        let mut graph = Graph::new(5);
        graph.add_edge(1, 3).unwrap();
        graph.add_edge(3, 1).unwrap();
        assert!(graph.are_connected(1, 3));
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_add_edge_out_of_bounds() {
        let mut graph = Graph::new(3);
        let result = graph.add_edge(0, 3);
        assert!(matches!(
            result,
            Err(GbcError::VertexOutOfBounds { vertex: 3, vertex_count: 3 })
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_print_layout() {
        let graph = Graph::read_edges(
            6,
            10,
            "1 2 1 3 1 4 1 5 1 6 2 3 3 4 4 5 5 6 6 2".as_bytes(),
        )
        .unwrap();
        assert_eq!(
            graph.to_string(),
            "6 10\n1 2\n1 3\n1 4\n1 5\n1 6\n2 3\n2 6\n3 4\n4 5\n5 6\n"
        );
        assert_eq!(Graph::new(10).to_string(), "10 0\n");
    }

    #[test]
    fn test_print_then_read_is_identity_on_edges() {
        let mut graph = Graph::new(4);
        graph.add_edge(3, 0).unwrap().add_edge(2, 2).unwrap().add_edge(1, 2).unwrap();
        let mut buffer = Vec::new();
        graph.write_to(&mut buffer).unwrap();

        let reread = Graph::read(buffer.as_slice()).unwrap();
        assert_eq!(reread.edge_count(), 3);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(reread.are_connected(i, j), graph.are_connected(i, j));
            }
        }
    }

    #[test]
    fn test_simplified_drops_loops_and_duplicates() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 0), (1, 1), (1, 2), (0, 1)]).unwrap();
        let simple = graph.simplified();
        assert_eq!(simple.edge_count(), 2);
        assert_eq!(simple.neighbours(0), &[1]);
        assert_eq!(simple.neighbours(1), &[0, 2]);
        assert!(!simple.are_connected(1, 1));
    }

    #[test]
    fn test_truncated_input() {
        let result = Graph::read("4 3\n1 2\n2 3\n".as_bytes());
        assert!(matches!(
            result,
            Err(GbcError::UnexpectedEof { expected: 8, found: 6 })
        ));
    }

    #[test]
    fn test_extra_edges_are_rejected() {
        let result = Graph::read("4 3\n1 2\n2 3\n3 4\n1 4\n".as_bytes());
        assert!(matches!(
            result,
            Err(GbcError::TrailingInput { expected: 8, found: 10 })
        ));

        let result = Graph::read("2 1\n1 2\nend".as_bytes());
        assert!(matches!(
            result,
            Err(GbcError::TrailingInput { expected: 4, found: 5 })
        ));
    }

    #[test]
    fn test_read_edges_leaves_rest_of_stream() {
        let graph = Graph::read_edges(3, 1, "1 2 2 3".as_bytes()).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.are_connected(1, 2));
    }

    #[test]
    fn test_huge_vertex_count_is_rejected_before_allocating() {
        let result = Graph::read("100000000000000000 0\n".as_bytes());
        assert!(matches!(
            result,
            Err(GbcError::TooManyVertices {
                vertex_count: 100_000_000_000_000_000,
                limit: MAX_VERTEX_COUNT,
            })
        ));

        let result = Graph::read_edges(MAX_VERTEX_COUNT + 1, 0, "".as_bytes());
        assert!(matches!(result, Err(GbcError::TooManyVertices { .. })));
    }

    #[test]
    fn test_huge_edge_count_reports_eof() {
        let result = Graph::read(format!("3 {}\n1 2\n", usize::MAX).as_bytes());
        assert!(matches!(result, Err(GbcError::UnexpectedEof { found: 4, .. })));
    }

    #[test]
    fn test_first_unreachable() {
        let connected = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(connected.first_unreachable_from(0), None);
        assert_eq!(connected.first_unreachable_pair(), None);

        let split = Graph::from_edges(5, &[(0, 1), (2, 3), (1, 4)]).unwrap();
        assert_eq!(split.first_unreachable_from(0), Some(2));
        assert_eq!(split.first_unreachable_from(3), Some(0));
        assert_eq!(split.first_unreachable_pair(), Some((0, 2)));

        assert_eq!(Graph::new(0).first_unreachable_pair(), None);
        assert_eq!(Graph::new(1).first_unreachable_pair(), None);
        assert_eq!(Graph::new(2).first_unreachable_pair(), Some((0, 1)));
    }

    #[test]
    fn test_invalid_token() {
        let result = Graph::read("3 1\n1 x\n".as_bytes());
        match result {
            Err(GbcError::InvalidToken { token, position }) => {
                assert_eq!(token, "x");
                assert_eq!(position, 4);
            }
            other => panic!("expected InvalidToken, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_id_is_out_of_bounds() {
        let result = Graph::read("3 1\n0 1\n".as_bytes());
        assert!(matches!(
            result,
            Err(GbcError::VertexOutOfBounds { vertex: 0, vertex_count: 3 })
        ));
    }
}
