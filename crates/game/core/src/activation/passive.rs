//! Passive trigger evaluation.
//!
//! A passive fires when its trigger condition holds at the start of a pass:
//!
//! | trigger                | fires while                                   | afterwards      |
//! |------------------------|-----------------------------------------------|-----------------|
//! | `OnFirstOpportunity`   | latch idle                                    | fired for good  |
//! | `OnBlock`              | latch armed (block engaged)                   | simulation resets |
//! | `OnHit` / `OnDeath`    | latch armed by the simulation                 | reset to idle   |
//! | `OnHalfHealth`         | latch idle and hp at or below the threshold   | fired for good  |
//! | `OnJoinCombat`         | latch idle and the caster is in combat        | fired           |
//!
//! Latch edges are taken once per pass, so every passive sharing a trigger
//! fires in the same pass.

use crate::caster::{CasterState, LatchState};
use crate::catalog::{AbilityId, PassiveTrigger};

use super::context::ActivationContext;
use super::pipeline;

/// Trigger conditions sampled at the start of a pass.
struct PassWindow {
    first_opportunity: bool,
    block: bool,
    hit: bool,
    half_health: bool,
    join_combat: bool,
    death: bool,
}

impl PassWindow {
    fn sample(caster: &CasterState, half_health_percent: u32) -> Self {
        let latches = &caster.latches;
        let threshold = i64::from(caster.hp_max()) * i64::from(half_health_percent) / 100;
        Self {
            first_opportunity: latches.is_idle(PassiveTrigger::OnFirstOpportunity),
            block: latches.is_armed(PassiveTrigger::OnBlock),
            hit: latches.is_armed(PassiveTrigger::OnHit),
            half_health: latches.state(PassiveTrigger::OnHalfHealth) != LatchState::Fired
                && i64::from(caster.hp) <= threshold,
            join_combat: latches.state(PassiveTrigger::OnJoinCombat) != LatchState::Fired
                && caster.in_combat,
            death: latches.is_armed(PassiveTrigger::OnDeath),
        }
    }

    fn is_open(&self, trigger: PassiveTrigger) -> bool {
        match trigger {
            PassiveTrigger::OnFirstOpportunity => self.first_opportunity,
            PassiveTrigger::OnBlock => self.block,
            PassiveTrigger::OnHit => self.hit,
            PassiveTrigger::OnHalfHealth => self.half_health,
            PassiveTrigger::OnJoinCombat => self.join_combat,
            PassiveTrigger::OnDeath => self.death,
        }
    }
}

pub(super) fn activate_passives(cx: &mut ActivationContext<'_, '_>, caster: &mut CasterState) {
    let engine = cx.engine;
    let window = PassWindow::sample(caster, engine.config().half_health_percent);
    let candidates: Vec<AbilityId> = caster
        .passives
        .iter()
        .chain(caster.item_passives.iter())
        .copied()
        .collect();

    let mut fired: Vec<PassiveTrigger> = Vec::new();
    for id in candidates {
        let Ok(def) = engine.abilities().lookup(id) else {
            tracing::warn!(ability = %id, "passive list holds an invalid power id");
            continue;
        };
        if !def.passive || !window.is_open(def.passive_trigger) {
            continue;
        }

        let pos = caster.pos;
        if let Err(error) = pipeline::activate(cx, id, caster, pos) {
            tracing::debug!(ability = %id, %error, "passive did not fire");
        }
        caster.refresh_stats = true;
        fired.push(def.passive_trigger);
        tracing::debug!(ability = %id, trigger = ?def.passive_trigger, "passive triggered");
    }

    // One-shot triggers stay open until a passive has actually used them.
    for trigger in [
        PassiveTrigger::OnFirstOpportunity,
        PassiveTrigger::OnHalfHealth,
        PassiveTrigger::OnJoinCombat,
    ] {
        if fired.contains(&trigger) {
            caster.latches.fire(trigger);
        }
    }

    caster.latches.reset(PassiveTrigger::OnHit);
    caster.latches.reset(PassiveTrigger::OnDeath);
}

/// Fires a freshly unlocked passive without waiting for the next pass. Only
/// passives without a trigger condition qualify.
pub(super) fn activate_single_passive(
    cx: &mut ActivationContext<'_, '_>,
    caster: &mut CasterState,
    id: AbilityId,
) {
    let engine = cx.engine;
    let Ok(def) = engine.abilities().lookup(id) else {
        tracing::warn!(ability = %id, "cannot activate passive with invalid power id");
        return;
    };
    if !def.passive || def.passive_trigger != PassiveTrigger::OnFirstOpportunity {
        return;
    }

    let pos = caster.pos;
    if let Err(error) = pipeline::activate(cx, id, caster, pos) {
        tracing::debug!(ability = %id, %error, "passive did not fire");
    }
    caster.refresh_stats = true;
    caster.latches.fire(PassiveTrigger::OnFirstOpportunity);
}
