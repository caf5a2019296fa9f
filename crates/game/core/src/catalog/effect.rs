//! Effect definitions and the effect catalog.

use std::collections::HashMap;

use super::ConfigError;

/// Semantic type of an effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Shield,
    Heal,
    Knockback,
    /// Modifies the named stat or resistance.
    Stat(String),
}

impl EffectKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "shield" => Self::Shield,
            "heal" => Self::Heal,
            "knockback" => Self::Knockback,
            other => Self::Stat(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Shield => "shield",
            Self::Heal => "heal",
            Self::Knockback => "knockback",
            Self::Stat(key) => key,
        }
    }
}

/// How the applied magnitude of an effect is computed.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MagnitudeFormula {
    /// The post effect's authored magnitude.
    Authored,
    /// Caster's maximum mental damage, adjusted by the damage modifier.
    MentalMax,
    /// Roll within the caster's mental damage range, adjusted by the damage
    /// modifier.
    MentalRoll,
}

impl MagnitudeFormula {
    pub fn default_for(kind: &EffectKind) -> Self {
        match kind {
            EffectKind::Shield => Self::MentalMax,
            EffectKind::Heal => Self::MentalRoll,
            EffectKind::Knockback | EffectKind::Stat(_) => Self::Authored,
        }
    }
}

/// Authored effect record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    pub id: String,
    pub kind: EffectKind,
    pub icon: Option<u32>,
    pub animation: Option<String>,
    pub can_stack: bool,
    pub render_above: bool,
    /// Explicit formula; the kind's default applies when unset.
    pub magnitude: Option<MagnitudeFormula>,
}

impl EffectDefinition {
    /// Definition for an id outside the catalog: the id is the stat key.
    pub fn bare(id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: EffectKind::Stat(id.to_string()),
            icon: None,
            animation: None,
            can_stack: false,
            render_above: false,
            magnitude: None,
        }
    }

    pub fn with_kind(id: &str, kind: EffectKind) -> Self {
        Self {
            kind,
            ..Self::bare(id)
        }
    }

    pub fn formula(&self) -> MagnitudeFormula {
        self.magnitude
            .unwrap_or_else(|| MagnitudeFormula::default_for(&self.kind))
    }
}

/// Effect definitions keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct EffectCatalog {
    effects: Vec<EffectDefinition>,
    index: HashMap<String, usize>,
}

impl EffectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition. The first definition of an id wins.
    pub fn insert(&mut self, definition: EffectDefinition) -> Result<(), ConfigError> {
        if self.index.contains_key(&definition.id) {
            return Err(ConfigError::DuplicateEffect(definition.id));
        }
        self.index
            .insert(definition.id.clone(), self.effects.len());
        self.effects.push(definition);
        Ok(())
    }

    /// Catalog entry for `id`. Absence is not an error: callers treat the
    /// id as a bare stat key.
    pub fn lookup_effect(&self, id: &str) -> Option<&EffectDefinition> {
        self.index.get(id).map(|&index| &self.effects[index])
    }

    /// Catalog entry, or a bare stat-key definition.
    pub fn resolve(&self, id: &str) -> EffectDefinition {
        self.lookup_effect(id)
            .cloned()
            .unwrap_or_else(|| EffectDefinition::bare(id))
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.effects.iter()
    }
}

impl FromIterator<EffectDefinition> for EffectCatalog {
    fn from_iter<I: IntoIterator<Item = EffectDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for definition in iter {
            if let Err(error) = catalog.insert(definition) {
                tracing::warn!(%error, "skipping effect definition");
            }
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_back_to_bare_stat_key() {
        let catalog: EffectCatalog = [EffectDefinition::with_kind("shield", EffectKind::Shield)]
            .into_iter()
            .collect();

        assert_eq!(
            catalog.lookup_effect("shield").map(|def| &def.kind),
            Some(&EffectKind::Shield)
        );
        assert!(catalog.lookup_effect("accuracy").is_none());
        assert_eq!(
            catalog.resolve("accuracy").kind,
            EffectKind::Stat("accuracy".into())
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut catalog = EffectCatalog::new();
        assert!(catalog.insert(EffectDefinition::bare("haste")).is_ok());
        assert_eq!(
            catalog.insert(EffectDefinition::bare("haste")),
            Err(ConfigError::DuplicateEffect("haste".into()))
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn formula_defaults_follow_kind() {
        let heal = EffectDefinition::with_kind("heal", EffectKind::Heal);
        assert_eq!(heal.formula(), MagnitudeFormula::MentalRoll);

        let fixed = EffectDefinition {
            magnitude: Some(MagnitudeFormula::Authored),
            ..EffectDefinition::with_kind("shield", EffectKind::Shield)
        };
        assert_eq!(fixed.formula(), MagnitudeFormula::Authored);
    }
}
