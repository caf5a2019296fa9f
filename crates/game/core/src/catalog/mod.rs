//! Ability and effect catalogs.
//!
//! Both catalogs are built once at load time and are read-only afterwards.
//! Abilities are keyed by a dense positive id; ids below
//! [`AbilityCatalog::slot_count`] that were never populated are holes and
//! behave exactly like out-of-range ids.

mod ability;
mod diagnostics;
mod effect;
mod schema;

pub use ability::{
    AbilityDefinition, AbilityId, AbilityKind, ActivationState, BaseDamage, BuffProfile,
    HazardProfile, ItemId, ItemRequirement, LootChance, LootEntry, MissileParams, MovementMask,
    PassiveTrigger, PostEffect, Requirements, SourceType, SpawnLevel, SpawnLimit, SpawnParams,
    StartingPosition, StatModifier, TransformParams, UNTRANSFORM, Visuals,
};
pub use diagnostics::{ConfigError, Diagnostic, LoadReport, Table};
pub use effect::{EffectCatalog, EffectDefinition, EffectKind, MagnitudeFormula};
pub use schema::{AbilityCatalogBuilder, EffectCatalogBuilder, RawField};

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};

/// Failure to resolve an ability id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} is not a valid power id")]
    InvalidId(AbilityId),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "CATALOG_INVALID_ID",
        }
    }
}

/// Ability definitions keyed by id.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    definitions: BTreeMap<AbilityId, AbilityDefinition>,
    slot_count: u32,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from finished definitions, coercing dangling chain
    /// references to [`AbilityId::NONE`].
    pub fn from_definitions(definitions: impl IntoIterator<Item = AbilityDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition);
        }
        catalog.verify_references(&mut LoadReport::new());
        catalog
    }

    /// One past the highest allocated id.
    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// True when `id` names a populated slot.
    pub fn contains(&self, id: AbilityId) -> bool {
        !id.is_none() && self.definitions.contains_key(&id)
    }

    pub fn lookup(&self, id: AbilityId) -> Result<&AbilityDefinition, CatalogError> {
        if id.is_none() || id.get() >= self.slot_count {
            return Err(CatalogError::InvalidId(id));
        }
        self.definitions
            .get(&id)
            .ok_or(CatalogError::InvalidId(id))
    }

    /// Validates a reference to another ability.
    ///
    /// With `allow_zero` the sentinel passes through unchanged.
    pub fn check_reference(&self, id: AbilityId, allow_zero: bool) -> Result<AbilityId, CatalogError> {
        if id.is_none() && allow_zero {
            return Ok(id);
        }
        self.lookup(id).map(|_| id)
    }

    /// Like [`check_reference`](Self::check_reference) but degrades an
    /// invalid id to [`AbilityId::NONE`] with a warning.
    pub fn resolve_reference(&self, id: AbilityId, allow_zero: bool) -> AbilityId {
        match self.check_reference(id, allow_zero) {
            Ok(id) => id,
            Err(error) => {
                tracing::warn!(%error, "reference coerced to none");
                AbilityId::NONE
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.definitions.values()
    }

    pub(crate) fn get_mut(&mut self, id: AbilityId) -> Option<&mut AbilityDefinition> {
        self.definitions.get_mut(&id)
    }

    pub(crate) fn insert(&mut self, definition: AbilityDefinition) {
        self.slot_count = self.slot_count.max(definition.id.get().saturating_add(1));
        self.definitions.insert(definition.id, definition);
    }

    pub(crate) fn reserve_slots(&mut self, slot_count: u32) {
        self.slot_count = self.slot_count.max(slot_count);
    }

    /// Coerces every dangling post/wall reference to none.
    pub(crate) fn verify_references(&mut self, report: &mut LoadReport) {
        let ids: Vec<AbilityId> = self.definitions.keys().copied().collect();
        for id in ids {
            let Some(definition) = self.definitions.get(&id) else {
                continue;
            };
            let post = self.check_reference(definition.post_power, true);
            let wall = self.check_reference(definition.wall_power, true);
            let party = self.check_reference(definition.buff.party_power, true);

            let mut dangling = Vec::new();
            if post.is_err() {
                dangling.push(("post_power", definition.post_power));
            }
            if wall.is_err() {
                dangling.push(("wall_power", definition.wall_power));
            }
            if party.is_err() {
                dangling.push(("buff_party_power_id", definition.buff.party_power));
            }
            if dangling.is_empty() {
                continue;
            }

            for (field, target) in dangling {
                report.push(
                    Table::Powers,
                    Some(id.to_string()),
                    ConfigError::DanglingReference {
                        field: field.to_string(),
                        id: target,
                    },
                );
            }
            if let Some(definition) = self.definitions.get_mut(&id) {
                if post.is_err() {
                    definition.post_power = AbilityId::NONE;
                }
                if wall.is_err() {
                    definition.wall_power = AbilityId::NONE;
                }
                if party.is_err() {
                    definition.buff.party_power = AbilityId::NONE;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AbilityCatalog {
        let mut chained = AbilityDefinition::of_kind(AbilityId(2), AbilityKind::Fixed);
        chained.post_power = AbilityId(9);
        chained.wall_power = AbilityId(5);
        AbilityCatalog::from_definitions([
            chained,
            AbilityDefinition::of_kind(AbilityId(5), AbilityKind::Missile),
        ])
    }

    #[test]
    fn lookup_rejects_holes_zero_and_out_of_range() {
        let catalog = catalog();
        assert_eq!(catalog.slot_count(), 6);
        assert!(catalog.lookup(AbilityId(2)).is_ok());
        assert_eq!(
            catalog.lookup(AbilityId(3)).unwrap_err(),
            CatalogError::InvalidId(AbilityId(3))
        );
        assert!(catalog.lookup(AbilityId::NONE).is_err());
        assert!(catalog.lookup(AbilityId(6)).is_err());
        assert!(!catalog.contains(AbilityId(4)));
    }

    #[test]
    fn dangling_references_become_none() {
        let catalog = catalog();
        let chained = catalog.lookup(AbilityId(2)).unwrap();
        assert_eq!(chained.post_power, AbilityId::NONE);
        assert_eq!(chained.wall_power, AbilityId(5));
    }

    #[test]
    fn resolve_reference_honors_allow_zero() {
        let catalog = catalog();
        assert_eq!(catalog.resolve_reference(AbilityId::NONE, true), AbilityId::NONE);
        assert!(catalog.check_reference(AbilityId::NONE, false).is_err());
        assert_eq!(catalog.resolve_reference(AbilityId(5), false), AbilityId(5));
        assert_eq!(catalog.resolve_reference(AbilityId(4), true), AbilityId::NONE);
    }
}
