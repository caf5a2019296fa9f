//! Mutable per-caster state touched by activations.
//!
//! The simulation owns one [`CasterState`] per character and lends it to
//! the engine exclusively for each call. Everything an activation changes
//! on its caster lives here: resources, the effect stack, trigger latches
//! and the pending requests (teleport, knockback, transform) the simulation
//! resolves on its next step.

mod effects;
mod latch;

pub use effects::{ActiveEffect, EffectStack};
pub use latch::{LatchState, TriggerLatches};

use std::collections::BTreeMap;

use crate::catalog::{AbilityCatalog, AbilityId, PassiveTrigger, SourceType};
use crate::geometry::{Direction, FPoint};
use crate::stats::{StatKind, StatSnapshot};

/// Identity of a character in the surrounding simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CasterId(pub u32);

/// Which side a character fights on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Allegiance {
    /// The player character. Only heroes are gated on and pay mana.
    Hero,
    /// Member of the hero's party.
    HeroAlly,
    #[default]
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransformDuration {
    Permanent,
    /// Frames until the form reverts.
    Timed(u32),
}

/// Transformation the simulation should perform on its next step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransformRequest {
    Into {
        form: String,
        duration: TransformDuration,
    },
    Revert,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformState {
    pub transformed: bool,
    pub request: Option<TransformRequest>,
    pub manual_untransform: bool,
    pub keep_equipment: bool,
    pub untransform_on_hit: bool,
}

/// Knockback for the physics step: push away from `source`, starting at
/// `destination`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Knockback {
    pub source: FPoint,
    pub destination: FPoint,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CasterState {
    pub id: CasterId,
    pub allegiance: Allegiance,
    pub level: u32,
    pub hp: i32,
    pub mp: i32,
    pub stats: StatSnapshot,
    pub pos: FPoint,
    pub direction: Direction,
    pub melee_range: f32,
    /// Base movement speed. Immobile casters (zero) ignore knockback.
    pub speed_default: f32,
    pub in_combat: bool,
    pub transform: TransformState,
    pub effects: EffectStack,
    pub latches: TriggerLatches,
    /// Unlocked passive abilities.
    pub passives: Vec<AbilityId>,
    /// Passive abilities granted by equipment.
    pub item_passives: Vec<AbilityId>,
    /// Meta power → equipment-provided replacement.
    pub substitutions: BTreeMap<AbilityId, AbilityId>,
    /// Live summons, maintained by the simulation.
    pub active_summons: u32,
    pub teleport: Option<FPoint>,
    pub knockback: Option<Knockback>,
    /// Set when passives fired and derived stats need recomputing.
    pub refresh_stats: bool,
}

impl CasterState {
    pub fn new(id: CasterId, allegiance: Allegiance, pos: FPoint) -> Self {
        Self {
            id,
            allegiance,
            level: 1,
            hp: 0,
            mp: 0,
            stats: StatSnapshot::new(),
            pos,
            direction: Direction::default(),
            melee_range: 1.0,
            speed_default: 1.0,
            in_combat: false,
            transform: TransformState::default(),
            effects: EffectStack::new(),
            latches: TriggerLatches::new(),
            passives: Vec::new(),
            item_passives: Vec::new(),
            substitutions: BTreeMap::new(),
            active_summons: 0,
            teleport: None,
            knockback: None,
            refresh_stats: false,
        }
    }

    pub fn hero(id: CasterId, pos: FPoint) -> Self {
        Self::new(id, Allegiance::Hero, pos)
    }

    pub fn is_hero(&self) -> bool {
        self.allegiance == Allegiance::Hero
    }

    pub fn is_hero_ally(&self) -> bool {
        self.allegiance == Allegiance::HeroAlly
    }

    /// Source category of hazards and effects this caster produces.
    pub fn source_type(&self) -> SourceType {
        match self.allegiance {
            Allegiance::Hero => SourceType::Hero,
            Allegiance::HeroAlly => SourceType::Ally,
            Allegiance::Enemy => SourceType::Enemy,
        }
    }

    pub fn hp_max(&self) -> i32 {
        self.stats.get(StatKind::HpMax)
    }

    /// Sets current health and mana to their maximums.
    pub fn restore(&mut self) {
        self.hp = self.stats.get(StatKind::HpMax);
        self.mp = self.stats.get(StatKind::MpMax);
    }

    /// Registers an equipment substitution for a meta power. Invalid
    /// replacements are dropped with a warning.
    pub fn set_substitution(
        &mut self,
        catalog: &AbilityCatalog,
        meta: AbilityId,
        replacement: AbilityId,
    ) -> bool {
        let replacement = catalog.resolve_reference(replacement, false);
        if replacement.is_none() {
            self.substitutions.remove(&meta);
            return false;
        }
        self.substitutions.insert(meta, replacement);
        true
    }

    /// Ends an engaged block: clears the block latch and removes the
    /// effects the block applied.
    pub fn end_block(&mut self) {
        self.latches.reset(PassiveTrigger::OnBlock);
        self.effects.remove_triggered(PassiveTrigger::OnBlock);
    }
}
