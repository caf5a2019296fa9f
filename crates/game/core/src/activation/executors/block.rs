use crate::caster::CasterState;
use crate::catalog::{AbilityDefinition, PassiveTrigger};

use super::super::buff::apply_effects;
use super::super::context::ActivationContext;
use super::super::formula::EffectOrigin;
use super::super::{ActivationError, cost};

/// Engages a block. Only one block can be engaged at a time; its effects
/// are tagged [`PassiveTrigger::OnBlock`] and removed by
/// [`CasterState::end_block`].
pub(in crate::activation) fn execute(
    cx: &mut ActivationContext<'_, '_>,
    def: &AbilityDefinition,
    caster: &mut CasterState,
) -> Result<(), ActivationError> {
    if caster.latches.is_armed(PassiveTrigger::OnBlock) {
        return Err(ActivationError::AlreadyBlocking);
    }
    caster.latches.arm(PassiveTrigger::OnBlock);

    let origin = EffectOrigin::of(caster);
    apply_effects(
        cx.engine.effects(),
        def,
        PassiveTrigger::OnBlock,
        &origin,
        caster,
        cx.env,
        cx.out,
    );

    cx.play_sound(def);
    cost::settle(def, caster, cx.out);
    Ok(())
}
