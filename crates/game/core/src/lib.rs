//! Ability and effect execution engine for a real-time action game.
//!
//! `ability-core` decides whether an ability may fire, what it costs, which
//! hazards and summons it creates and which effects it applies. It is pure
//! logic: the catalogs are built once from authored records, callers lend
//! the engine a [`CasterState`] and the world oracles in an [`Env`], and the
//! results come back through [`OutputQueues`]. All activations flow through
//! [`activation::PowerEngine`].
pub mod activation;
pub mod artifact;
pub mod caster;
pub mod catalog;
pub mod config;
pub mod env;
pub mod error;
pub mod geometry;
pub mod stats;

pub use activation::{ActivationError, EffectOrigin, OutputQueues, PowerEngine};
pub use artifact::{CombatText, CombatTextKind, Hazard, LootDrop, SpawnRequest};
pub use caster::{
    ActiveEffect, Allegiance, CasterId, CasterState, EffectStack, Knockback, LatchState,
    TransformDuration, TransformRequest, TransformState, TriggerLatches,
};
pub use catalog::{
    AbilityCatalog, AbilityCatalogBuilder, AbilityDefinition, AbilityId, AbilityKind,
    CatalogError, ConfigError, EffectCatalog, EffectCatalogBuilder, EffectDefinition, EffectKind,
    LoadReport, MagnitudeFormula, PassiveTrigger, RawField, SourceType,
};
pub use config::EngineConfig;
pub use env::{
    CollisionOracle, Env, MessageOracle, MovementType, PassthroughMessages, PcgRng, RngOracle,
    TileGrid, TileKind,
};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{Direction, FPoint, Point};
pub use stats::{PrimaryStat, StatKind, StatSnapshot};
