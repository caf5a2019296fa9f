use crate::caster::{CasterState, TransformDuration, TransformRequest};
use crate::catalog::AbilityDefinition;
use crate::env::MovementType;
use crate::geometry::FPoint;

use super::super::context::ActivationContext;
use super::super::{ActivationError, buff, cost};

/// Requests a transformation into `spawn_type`, or a revert for
/// `untransform` abilities.
pub(in crate::activation) fn execute(
    cx: &mut ActivationContext<'_, '_>,
    def: &AbilityDefinition,
    caster: &mut CasterState,
    target: FPoint,
) -> Result<(), ActivationError> {
    let request = if def.is_untransform() {
        check_revert(cx, caster)?;
        TransformRequest::Revert
    } else {
        if caster.transform.transformed {
            return Err(reject(cx, ActivationError::AlreadyTransformed));
        }
        let duration = match def.transform.duration {
            0 => TransformDuration::Permanent,
            frames => TransformDuration::Timed(frames),
        };
        TransformRequest::Into {
            form: def.spawn_type.clone(),
            duration,
        }
    };
    caster.transform.request = Some(request);

    buff::buff(cx, def, caster, target);

    caster.transform.manual_untransform = def.transform.manual_untransform;
    caster.transform.keep_equipment = def.transform.keep_equipment;
    caster.transform.untransform_on_hit = def.transform.untransform_on_hit;

    cx.play_sound(def);
    cost::settle(def, caster, cx.out);
    Ok(())
}

/// Reverting is only possible while transformed and when the caster's
/// original form could stand on its current tile. The tile's block is
/// lifted for the check and restored either way.
fn check_revert(
    cx: &mut ActivationContext<'_, '_>,
    caster: &CasterState,
) -> Result<(), ActivationError> {
    if !caster.transform.transformed {
        return Err(ActivationError::NotTransformed);
    }

    let collider = cx.env.collider_mut();
    collider.unblock(caster.pos);
    let valid = collider.is_valid_position(caster.pos, MovementType::Normal, true);
    collider.block(caster.pos);

    if valid {
        Ok(())
    } else {
        Err(reject(cx, ActivationError::UntransformBlocked))
    }
}

fn reject(cx: &mut ActivationContext<'_, '_>, error: ActivationError) -> ActivationError {
    if let Some(key) = error.user_message() {
        cx.message(key);
    }
    error
}
