use crate::artifact::Hazard;
use crate::caster::CasterState;
use crate::catalog::{AbilityDefinition, StartingPosition};
use crate::env::RngOracle;
use crate::geometry::{FPoint, theta};

use super::super::context::ActivationContext;
use super::super::{ActivationError, cost, hazard};

/// Fires a fan of `count` missiles.
///
/// Missile `i` leaves at `θ + ((1 - count) / 2 + i) · missile_angle`, where
/// `θ` is the bearing from the origin (the target for target-start
/// missiles, the caster otherwise) to the aim point. Each bearing is then
/// jittered by up to `angle_variance` degrees either way and each speed by
/// up to `speed_variance`.
pub(in crate::activation) fn execute(
    cx: &mut ActivationContext<'_, '_>,
    def: &AbilityDefinition,
    caster: &mut CasterState,
    target: FPoint,
) -> Result<(), ActivationError> {
    let origin = match def.hazard.starting_pos {
        StartingPosition::AtTarget => target,
        StartingPosition::AtSource | StartingPosition::AtMeleeReach => caster.pos,
    };
    let bearing = theta(origin, target);
    let spread = (def.missile.angle as f32).to_radians();

    let mut delay = 0;
    for i in 0..def.count {
        let mut artifact = Hazard::new();
        hazard::init_hazard(def, caster, target, cx.env, &mut artifact);

        let offset = ((1.0 - def.count as f32) / 2.0 + i as f32) * spread;
        let jitter = angle_jitter(def.missile.angle_variance, cx.env.rng());
        artifact.base_speed += speed_jitter(def.missile.speed_variance, cx.env.rng());
        artifact.set_angle(bearing + offset + jitter);

        artifact.delay_frames = delay;
        delay += def.delay;
        cx.out.hazards.push(artifact);
    }

    cost::settle(def, caster, cx.out);
    cx.play_sound(def);
    Ok(())
}

/// Random bearing offset in radians, strictly under `variance` degrees.
fn angle_jitter(variance: i32, rng: &mut dyn RngOracle) -> f32 {
    if variance == 0 {
        return 0.0;
    }
    let sign = if rng.coin() { 1.0 } else { -1.0 };
    let degrees = rng.below(variance.unsigned_abs()) as f32;
    sign * degrees.to_radians()
}

/// Random speed offset in `[-variance, variance)`.
fn speed_jitter(variance: f32, rng: &mut dyn RngOracle) -> f32 {
    if variance == 0.0 {
        return 0.0;
    }
    variance * 2.0 * rng.unit() - variance
}
