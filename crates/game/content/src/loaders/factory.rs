//! Content factory for building the engine from data files.

use std::path::{Path, PathBuf};

use ability_core::{AbilityCatalog, EffectCatalog, EngineConfig, LoadReport, PowerEngine};

use crate::loaders::{ConfigLoader, EffectLoader, LoadResult, PowerLoader};

/// Content factory that loads all ability content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── effects.toml
/// └── powers.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the sample data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the effect catalog from `effects.toml`.
    pub fn load_effects(&self, config: &EngineConfig) -> LoadResult<(EffectCatalog, LoadReport)> {
        let path = self.data_dir.join("effects.toml");
        EffectLoader::load(&path, config)
    }

    /// Load the power catalog from `powers.toml`. Post effects are validated
    /// against `effects`.
    pub fn load_powers(
        &self,
        config: &EngineConfig,
        effects: &EffectCatalog,
    ) -> LoadResult<(AbilityCatalog, LoadReport)> {
        let path = self.data_dir.join("powers.toml");
        PowerLoader::load(&path, config, effects)
    }

    /// Loads every data file and assembles the engine. The report collects
    /// the diagnostics of both catalogs.
    pub fn load_engine(&self) -> LoadResult<(PowerEngine, LoadReport)> {
        let config = self.load_config()?;
        let (effects, mut report) = self.load_effects(&config)?;
        let (powers, power_report) = self.load_powers(&config, &effects)?;
        report.merge(power_report);

        if !report.is_clean() {
            tracing::warn!(
                diagnostics = report.len(),
                data_dir = %self.data_dir.display(),
                "content loaded with diagnostics"
            );
        }
        Ok((PowerEngine::new(powers, effects, config), report))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
