//! CLI subcommands.

pub mod config;
pub mod fields;
pub mod normalize;
pub mod process;

use std::path::Path;

use lease_core::LeaseConfig;

/// Load the configuration named by `--config`, or the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LeaseConfig> {
    match path {
        Some(path) => LeaseConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e)),
        None => Ok(LeaseConfig::default()),
    }
}
