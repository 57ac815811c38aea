//! Project-level configuration support
//!
//! Loads search defaults from `mbc.toml` in the working directory, or from
//! the file passed with `--config`. Command-line flags override every value.
//!
//! # Configuration Format
//!
//! ```toml
//! # mbc.toml
//!
//! [search]
//! group_size = 3
//! leaderboard_size = 5
//! allow_disconnected = false
//! parallel = false
//!
//! [graph]
//! simple = false  # drop self-loops and repeated edges before searching
//!
//! [output]
//! format = "text"  # or "json"
//! ```

use anyhow::Context;
use mbc_fast::DEFAULT_LEADERBOARD_SIZE;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "mbc.toml";

/// Project-level configuration loaded from mbc.toml
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    /// Search defaults
    #[serde(default)]
    pub search: SearchDefaults,

    /// Graph preprocessing
    #[serde(default)]
    pub graph: GraphConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Defaults for `mbc search`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchDefaults {
    /// Group size k (no default: must come from the file or `-k`)
    #[serde(default)]
    pub group_size: Option<usize>,

    /// Number of best groups to keep (default: 5)
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Score disconnected graphs instead of rejecting them
    #[serde(default)]
    pub allow_disconnected: bool,

    /// Split the search across threads
    #[serde(default)]
    pub parallel: bool,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            group_size: None,
            leaderboard_size: default_leaderboard_size(),
            allow_disconnected: false,
            parallel: false,
        }
    }
}

fn default_leaderboard_size() -> usize {
    DEFAULT_LEADERBOARD_SIZE
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct GraphConfig {
    /// Normalise to a simple graph before any computation
    #[serde(default)]
    pub simple: bool,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `score: v1 v2 ...` per line
    #[default]
    Text,
    /// Single JSON document
    Json,
}

/// Load `mbc.toml` from `dir`, falling back to defaults.
///
/// A missing file is normal. A file that fails to parse is reported with a
/// warning and ignored.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_config_file(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", toml_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load an explicitly requested config file. Any failure is an error.
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: ProjectConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

/// Commented template written by `mbc init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# mbc configuration
# Command-line flags override every value in this file.

[search]
# Vertices per group (k). Uncomment to make -k optional.
# group_size = 3

# Number of best groups to report
leaderboard_size = 5

# Score disconnected graphs (unreachable pairs count 0) instead of failing
allow_disconnected = false

# Explore first-vertex branches on all cores
parallel = false

[graph]
# Drop self-loops and repeated edges before searching
simple = false

[output]
# text or json
format = "text"
"#;

#[cfg(test)]
mod tests;
