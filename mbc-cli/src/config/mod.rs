//! Configuration module for mbc
//!
//! This module handles:
//! - Project-level configuration (mbc.toml)
//! - Search and output defaults for the CLI

mod project_config;

pub use project_config::{
    GraphConfig,
    OutputConfig,
    OutputFormat,
    ProjectConfig,
    SearchDefaults,
    CONFIG_FILE_NAME,
    DEFAULT_CONFIG_TEMPLATE,
    load_config_file,
    load_project_config,
};
