use crate::artifact::{CombatText, CombatTextKind, Hazard, LootDrop, SpawnRequest};
use crate::catalog::{AbilityId, ItemId};
use crate::geometry::FPoint;

/// Output channels filled by activations and drained by the simulation
/// once per tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutputQueues {
    pub hazards: Vec<Hazard>,
    pub spawns: Vec<SpawnRequest>,
    pub loot: Vec<LootDrop>,
    /// Carried items to consume, one entry per unit.
    pub used_items: Vec<ItemId>,
    /// Equipped items to consume. An id appears at most once per tick.
    pub used_equipped_items: Vec<ItemId>,
    /// Party buffs to broadcast to hero allies.
    pub party_buffs: Vec<AbilityId>,
    /// Sound cues to play.
    pub sounds: Vec<String>,
    /// Localized user-facing messages.
    pub messages: Vec<String>,
    pub combat_text: Vec<CombatText>,
}

impl OutputQueues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Empties every queue, as the simulation does at the end of a tick.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn buff_text(&mut self, text: String, pos: FPoint) {
        self.combat_text.push(CombatText {
            text,
            pos,
            kind: CombatTextKind::Buff,
        });
    }
}
