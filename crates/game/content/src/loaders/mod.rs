//! Content loaders for reading ability data from files.
//!
//! Every loader has a `load` entry point taking a path and a `parse` entry
//! point taking the file contents, so content can also be embedded.

pub mod config;
pub mod effects;
pub mod factory;
pub mod powers;

mod fields;

pub use config::ConfigLoader;
pub use effects::EffectLoader;
pub use factory::ContentFactory;
pub use powers::PowerLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses `content` as a TOML document and returns the records of the
/// `[[name]]` array of tables.
pub(crate) fn record_array(content: &str, name: &str) -> LoadResult<Vec<toml::Table>> {
    let mut document: toml::Table = toml::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} TOML: {}", name, e))?;

    let Some(records) = document.remove(name) else {
        tracing::warn!(table = name, "data file has no records");
        return Ok(Vec::new());
    };
    let toml::Value::Array(records) = records else {
        anyhow::bail!("`{}` must be an array of tables", name);
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match record {
            toml::Value::Table(table) => Ok(table),
            other => Err(anyhow::anyhow!(
                "{} record {} is a {}, expected a table",
                name,
                index,
                other.type_str()
            )),
        })
        .collect()
}
