//! Pure checks run before an ability executes.
//!
//! Nothing here mutates; the checks are safe to call speculatively, e.g.
//! to grey out action bar slots.

use crate::caster::CasterState;
use crate::catalog::AbilityDefinition;
use crate::env::CollisionOracle;
use crate::geometry::{FPoint, limit_range};

use super::ActivationError;

/// Resource and health gate.
pub(super) fn precheck(def: &AbilityDefinition, caster: &CasterState) -> Result<(), ActivationError> {
    let requirements = &def.requirements;

    if caster.is_hero() && requirements.mp > caster.mp {
        return Err(ActivationError::InsufficientMana {
            required: requirements.mp,
            available: caster.mp,
        });
    }

    if caster.hp > 0 && !requirements.sacrifice && requirements.hp >= caster.hp {
        return Err(ActivationError::HealthRequirement {
            required: requirements.hp,
            current: caster.hp,
        });
    }

    Ok(())
}

/// A teleport aimed at a blocked or wall tile has no valid target. Every
/// other ability accepts any aim point.
pub(super) fn has_valid_target(
    def: &AbilityDefinition,
    caster: &CasterState,
    target: FPoint,
    collider: &dyn CollisionOracle,
) -> bool {
    if !def.buff.teleport {
        return true;
    }
    let target = limit_range(def.requirements.target_range, caster.pos, target);
    collider.is_empty(target) && !collider.is_wall(target)
}
