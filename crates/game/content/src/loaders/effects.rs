//! Effect catalog loader.

use std::path::Path;

use ability_core::{EffectCatalog, EffectCatalogBuilder, EngineConfig, LoadReport};

use crate::loaders::fields::record_fields;
use crate::loaders::{LoadResult, read_file, record_array};

/// Loader for `[[effect]]` records.
pub struct EffectLoader;

impl EffectLoader {
    pub fn load(path: &Path, config: &EngineConfig) -> LoadResult<(EffectCatalog, LoadReport)> {
        let content = read_file(path)?;
        Self::parse(&content, config)
    }

    pub fn parse(content: &str, config: &EngineConfig) -> LoadResult<(EffectCatalog, LoadReport)> {
        let mut builder = EffectCatalogBuilder::new(config);
        for record in record_array(content, "effect")? {
            for field in record_fields(&record) {
                builder.push_field(&field);
            }
            builder.end_record();
        }

        let (catalog, report) = builder.finish();
        tracing::debug!(effects = catalog.len(), diagnostics = report.len(), "loaded effects");
        Ok((catalog, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ability_core::{ConfigError, EffectKind, MagnitudeFormula};

    #[test]
    fn parses_effect_records() {
        let (catalog, report) = EffectLoader::parse(
            r#"
            [[effect]]
            id = "barrier"
            type = "shield"
            icon = 3
            magnitude = "mental_roll"

            [[effect]]
            type = "heal"
            "#,
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(catalog.len(), 1);
        let barrier = catalog.lookup_effect("barrier").unwrap();
        assert_eq!(barrier.kind, EffectKind::Shield);
        assert_eq!(barrier.formula(), MagnitudeFormula::MentalRoll);
        assert!(report.contains(|error| *error == ConfigError::MissingEffectId));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(EffectLoader::parse("[[effect]\nid = ", &EngineConfig::default()).is_err());
    }
}
