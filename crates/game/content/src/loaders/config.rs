//! Engine configuration loader.

use std::path::Path;

use ability_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.frames_per_second == 0 {
            anyhow::bail!("frames_per_second must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("elements = [\"fire\", \"ice\"]\n").unwrap();
        assert_eq!(config.frames_per_second, EngineConfig::DEFAULT_FRAMES_PER_SECOND);
        assert_eq!(config.element_index("ice"), Some(1));
    }

    #[test]
    fn zero_frame_rate_is_rejected() {
        assert!(ConfigLoader::parse("frames_per_second = 0\n").is_err());
    }
}
