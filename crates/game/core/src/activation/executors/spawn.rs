use crate::artifact::SpawnRequest;
use crate::caster::CasterState;
use crate::catalog::{AbilityDefinition, StartingPosition};
use crate::geometry::{Direction, FPoint, step_towards};

use super::super::context::ActivationContext;
use super::super::{ActivationError, buff, cost};

/// Summons `count` creatures of `spawn_type`.
///
/// The spawn tile comes from the starting position. A blocked tile forces a
/// neighbor search of radius 1 around the caster when no search radius was
/// authored; if the chosen tile is still blocked the activation fails
/// without side effects.
pub(in crate::activation) fn execute(
    cx: &mut ActivationContext<'_, '_>,
    def: &AbilityDefinition,
    caster: &mut CasterState,
    target: FPoint,
) -> Result<(), ActivationError> {
    if let Some(limit) = def.spawn.limit.resolve(&caster.stats)
        && caster.active_summons >= limit
    {
        return Err(ActivationError::SpawnLimitReached { limit });
    }

    let candidate = match def.hazard.starting_pos {
        StartingPosition::AtSource => caster.pos,
        StartingPosition::AtTarget => target,
        StartingPosition::AtMeleeReach => {
            step_towards(caster.pos, caster.direction, caster.melee_range)
        }
    };

    let mut radius = def.target_neighbor;
    if radius == 0 && !cx.env.collider().is_empty(candidate) {
        radius = 1;
    }

    let tile = if radius > 0 {
        cx.env
            .random_neighbor(caster.pos.floor(), radius, false)
            .ok_or(ActivationError::SpawnBlocked)?
            .floor()
    } else {
        candidate.floor()
    };
    if !cx.env.collider().is_empty(tile.center()) {
        return Err(ActivationError::SpawnBlocked);
    }

    let request = SpawnRequest {
        creature: def.spawn_type.clone(),
        pos: tile,
        direction: Direction::between(caster.pos, target),
        summoner: Some(caster.id),
        summon_ability: Some(def.id),
        hero_ally: caster.is_hero() || caster.is_hero_ally(),
        level: def.spawn.level.resolve(&caster.stats, caster.level),
    };
    cx.out
        .spawns
        .extend(std::iter::repeat_n(request, def.count as usize));

    cost::settle(def, caster, cx.out);
    buff::buff(cx, def, caster, target);
    cx.play_sound(def);
    Ok(())
}
