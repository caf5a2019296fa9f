//! Activation orchestration.
//!
//! 1. Guard chain depth
//! 2. Resolve the definition (meta powers through their substitute)
//! 3. Precheck resources
//! 4. Dispatch to exactly one executor by kind

use crate::caster::CasterState;
use crate::catalog::{AbilityDefinition, AbilityId, AbilityKind};
use crate::geometry::FPoint;

use super::context::ActivationContext;
use super::executors::{block, fixed, missile, repeater, spawn, transform};
use super::{ActivationError, PowerEngine, validation};

pub(super) fn activate(
    cx: &mut ActivationContext<'_, '_>,
    id: AbilityId,
    caster: &mut CasterState,
    target: FPoint,
) -> Result<(), ActivationError> {
    let max_depth = cx.engine.config().max_chain_depth;
    if cx.depth > max_depth {
        tracing::warn!(ability = %id, depth = cx.depth, "activation chain too deep, stopping");
        return Err(ActivationError::ChainTooDeep(max_depth));
    }

    let engine = cx.engine;
    let def = resolve(engine, id, caster)?;
    validation::precheck(def, caster)?;

    match def.kind {
        Some(AbilityKind::Block) => block::execute(cx, def, caster),
        Some(AbilityKind::Fixed) => fixed::execute(cx, def, caster, target),
        Some(AbilityKind::Missile) => missile::execute(cx, def, caster, target),
        Some(AbilityKind::Repeater) => repeater::execute(cx, def, caster, target),
        Some(AbilityKind::Spawn) => spawn::execute(cx, def, caster, target),
        Some(AbilityKind::Transform) => transform::execute(cx, def, caster, target),
        None => Err(ActivationError::MissingKind(def.id)),
    }
}

/// Looks up the definition to execute for `id`. Meta powers execute the
/// caster's equipment substitute.
pub(super) fn resolve<'a>(
    engine: &'a PowerEngine,
    id: AbilityId,
    caster: &CasterState,
) -> Result<&'a AbilityDefinition, ActivationError> {
    let def = engine.abilities().lookup(id)?;
    if !def.meta_power {
        return Ok(def);
    }
    let substitute = caster
        .substitutions
        .get(&id)
        .copied()
        .ok_or(ActivationError::MetaPowerWithoutSubstitute(id))?;
    Ok(engine.abilities().lookup(substitute)?)
}

/// Fires the post power of an ability that did not use a hazard.
pub(super) fn chain_post_power(
    cx: &mut ActivationContext<'_, '_>,
    def: &AbilityDefinition,
    caster: &mut CasterState,
) {
    if def.post_power.is_none() {
        return;
    }
    let pos = caster.pos;
    if let Err(error) = activate(&mut cx.nested(), def.post_power, caster, pos) {
        tracing::debug!(ability = %def.id, post_power = %def.post_power, %error, "post power did not fire");
    }
}
