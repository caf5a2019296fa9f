use crate::artifact::Hazard;
use crate::caster::CasterState;
use crate::catalog::AbilityDefinition;
use crate::geometry::{FPoint, theta};

use super::super::context::ActivationContext;
use super::super::{ActivationError, cost, hazard};

/// Lays up to `count` hazards along the ray from the caster towards the
/// aim point, one `speed` step apart. The ray stops at the first step that
/// lands in a wall.
pub(in crate::activation) fn execute(
    cx: &mut ActivationContext<'_, '_>,
    def: &AbilityDefinition,
    caster: &mut CasterState,
    target: FPoint,
) -> Result<(), ActivationError> {
    cost::settle(def, caster, cx.out);
    cx.play_sound(def);

    let bearing = theta(caster.pos, target);
    let step = FPoint::new(
        def.hazard.speed * bearing.cos(),
        def.hazard.speed * bearing.sin(),
    );

    let mut location = caster.pos;
    let mut delay = 0;
    for _ in 0..def.count {
        location = FPoint::new(location.x + step.x, location.y + step.y);
        if cx.env.collider().is_wall(location) {
            break;
        }

        let mut artifact = Hazard::new();
        hazard::init_hazard(def, caster, target, cx.env, &mut artifact);
        artifact.pos = location;
        artifact.delay_frames = delay;
        delay += def.delay;
        cx.out.hazards.push(artifact);
    }

    Ok(())
}
