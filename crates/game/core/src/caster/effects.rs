use crate::catalog::{AbilityId, EffectDefinition, EffectKind, PassiveTrigger, SourceType};

/// An effect applied to a caster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub definition: EffectDefinition,
    /// Remaining frames.
    pub duration: u32,
    pub magnitude: i32,
    /// Trigger of the ability that applied it. Block effects are tagged
    /// [`PassiveTrigger::OnBlock`] so they can be removed when blocking ends.
    pub trigger: PassiveTrigger,
    /// Passive ability that owns the effect.
    pub passive: Option<AbilityId>,
    pub source: SourceType,
}

/// Effects currently applied to a caster, in application order.
///
/// Non-stackable effects replace an earlier instance with the same id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectStack {
    effects: Vec<ActiveEffect>,
}

impl EffectStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, effect: ActiveEffect) {
        if !effect.definition.can_stack
            && let Some(existing) = self
                .effects
                .iter_mut()
                .find(|active| active.definition.id == effect.definition.id)
        {
            *existing = effect;
            return;
        }
        self.effects.push(effect);
    }

    /// Removes every effect applied under `trigger`.
    pub fn remove_triggered(&mut self, trigger: PassiveTrigger) {
        self.effects.retain(|effect| effect.trigger != trigger);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Total magnitude of active shields.
    pub fn shield(&self) -> i32 {
        self.effects
            .iter()
            .filter(|effect| effect.definition.kind == EffectKind::Shield)
            .map(|effect| effect.magnitude)
            .sum()
    }

    pub fn find(&self, id: &str) -> Option<&ActiveEffect> {
        self.effects.iter().find(|effect| effect.definition.id == id)
    }
}
