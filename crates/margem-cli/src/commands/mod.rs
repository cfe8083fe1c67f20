//! CLI subcommands.

pub mod batch;
pub mod extract;
pub mod letter;

use margem_core::models::config::MargemConfig;

/// Load configuration from `--config`, falling back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MargemConfig> {
    match config_path {
        Some(path) => Ok(MargemConfig::from_file(std::path::Path::new(path))?),
        None => Ok(MargemConfig::default()),
    }
}
