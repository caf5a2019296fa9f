//! Data-driven ability content and loaders.
//!
//! This crate reads the authored TOML data files and builds the read-only
//! inputs of the ability engine:
//! - Engine configuration (`config.toml`)
//! - Effect catalog (`effects.toml`)
//! - Power catalog (`powers.toml`)
//!
//! Schema interpretation lives in `ability-core`; the loaders only turn TOML
//! tables into the flat field stream the catalog builders consume.
//! Problems inside records are reported as diagnostics, never as load
//! failures.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EffectLoader, LoadResult, PowerLoader};
