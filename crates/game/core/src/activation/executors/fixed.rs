use crate::artifact::Hazard;
use crate::caster::CasterState;
use crate::catalog::AbilityDefinition;
use crate::geometry::FPoint;

use super::super::context::ActivationContext;
use super::super::{ActivationError, buff, cost, hazard};

/// Places `count` hazards at the resolved starting position, each delayed
/// by `delay` frames after the previous one, then runs the buff path.
pub(in crate::activation) fn execute(
    cx: &mut ActivationContext<'_, '_>,
    def: &AbilityDefinition,
    caster: &mut CasterState,
    target: FPoint,
) -> Result<(), ActivationError> {
    if def.hazard.use_hazard {
        let mut delay = 0;
        for _ in 0..def.count {
            let mut artifact = Hazard::new();
            hazard::init_hazard(def, caster, target, cx.env, &mut artifact);
            artifact.delay_frames = delay;
            delay += def.delay;
            cx.out.hazards.push(artifact);
        }
    }

    buff::buff(cx, def, caster, target);
    cx.play_sound(def);
    cost::settle(def, caster, cx.out);
    Ok(())
}
