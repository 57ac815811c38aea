//! mbc - maximum group betweenness centrality CLI
//!
//! Thin command-line layer over `mbc_fast`: argument parsing, project
//! configuration (mbc.toml) and output formatting.

pub mod cli;
pub mod config;
