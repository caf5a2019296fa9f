//! Power catalog loader.

use std::path::Path;

use ability_core::{AbilityCatalog, AbilityCatalogBuilder, EffectCatalog, EngineConfig, LoadReport};

use crate::loaders::fields::record_fields;
use crate::loaders::{LoadResult, read_file, record_array};

/// Loader for `[[power]]` records. Each record must start with its `id`.
pub struct PowerLoader;

impl PowerLoader {
    pub fn load(
        path: &Path,
        config: &EngineConfig,
        effects: &EffectCatalog,
    ) -> LoadResult<(AbilityCatalog, LoadReport)> {
        let content = read_file(path)?;
        Self::parse(&content, config, effects)
    }

    pub fn parse(
        content: &str,
        config: &EngineConfig,
        effects: &EffectCatalog,
    ) -> LoadResult<(AbilityCatalog, LoadReport)> {
        let mut builder = AbilityCatalogBuilder::new(config, effects);
        for record in record_array(content, "power")? {
            for field in record_fields(&record) {
                builder.push_field(&field);
            }
            builder.end_record();
        }

        let (catalog, report) = builder.finish();
        tracing::debug!(powers = catalog.len(), diagnostics = report.len(), "loaded powers");
        Ok((catalog, report))
    }
}
