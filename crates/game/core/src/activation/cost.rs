use crate::caster::CasterState;
use crate::catalog::AbilityDefinition;

use super::OutputQueues;

/// Pays the cost of a successful activation.
///
/// Mana and items are only charged to the hero. Carried items queue one
/// entry per unit; an equipped item is queued at most once per tick even
/// when several activations require it. Health is charged to every caster
/// and never drops below zero.
pub(super) fn settle(def: &AbilityDefinition, caster: &mut CasterState, out: &mut OutputQueues) {
    let requirements = &def.requirements;

    if caster.is_hero() {
        caster.mp -= requirements.mp;

        if let Some(item) = requirements.item {
            out.used_items
                .extend(std::iter::repeat_n(item.item, item.quantity as usize));
        }

        if let Some(equipped) = requirements.equipped_item
            && !out.used_equipped_items.contains(&equipped.item)
        {
            out.used_equipped_items
                .extend(std::iter::repeat_n(equipped.item, equipped.quantity as usize));
        }
    }

    caster.hp = (caster.hp - requirements.hp).max(0);
}
