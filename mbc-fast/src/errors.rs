// Error types for graph loading, scoring and search
//
// Every fallible entry point returns Result<T, GbcError>.
// Disconnected and PathCountOverflow store 0-indexed ids and display them
// 1-indexed, like the text format. VertexOutOfBounds carries the id exactly
// as the caller supplied it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GbcError {
    /// The input ended before all expected tokens were read
    #[error("unexpected end of input: expected {expected} tokens, found {found}")]
    UnexpectedEof { expected: usize, found: usize },

    /// Tokens left over after the declared edges
    #[error("trailing input: expected {expected} tokens, found {found}")]
    TrailingInput { expected: usize, found: usize },

    /// A token that should have been a non-negative integer
    #[error("invalid token '{token}' at position {position}")]
    InvalidToken { token: String, position: usize },

    /// `vertex` is as supplied: 1-indexed from text input, 0-indexed from the API
    #[error("vertex {vertex} out of bounds (vertex count: {vertex_count})")]
    VertexOutOfBounds { vertex: usize, vertex_count: usize },

    #[error("group size {group_size} must be between 1 and {vertex_count}")]
    InvalidGroupSize { group_size: usize, vertex_count: usize },

    #[error("graph is disconnected: no path between vertices {} and {}", .start + 1, .target + 1)]
    Disconnected { start: usize, target: usize },

    #[error("{vertex_count} vertices exceeds the limit of {limit}")]
    TooManyVertices { vertex_count: usize, limit: usize },

    #[error("shortest-path count between vertices {} and {} overflows u64", .start + 1, .target + 1)]
    PathCountOverflow { start: usize, target: usize },

    #[error("at least 2 vertices are required, graph has {0}")]
    TooFewVertices(usize),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GbcResult<T> = Result<T, GbcError>;
