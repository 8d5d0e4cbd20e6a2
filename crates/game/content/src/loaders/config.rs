//! Engine configuration loader.

use std::path::Path;

use vpet_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`EngineConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.hits_to_win == 0 {
            anyhow::bail!("hits_to_win must be at least 1");
        }
        if config.max_battle_rounds == 0 {
            anyhow::bail!("max_battle_rounds must be at least 1");
        }

        Ok(config)
    }
}
