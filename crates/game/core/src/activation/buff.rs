//! Buff path: teleports, post effects, party buffs and immediate chains.

use crate::artifact::LootDrop;
use crate::caster::{ActiveEffect, CasterState, Knockback};
use crate::catalog::{AbilityDefinition, EffectCatalog, EffectKind, PassiveTrigger};
use crate::env::Env;
use crate::geometry::{FPoint, limit_range};

use super::context::ActivationContext;
use super::formula::EffectOrigin;
use super::{OutputQueues, pipeline};

/// Runs the buff path of an ability that has just executed.
pub(super) fn buff(
    cx: &mut ActivationContext<'_, '_>,
    def: &AbilityDefinition,
    caster: &mut CasterState,
    target: FPoint,
) {
    if def.buff.teleport {
        teleport(cx.env, def, caster, target);
    }

    if def.buff.buff || (def.buff.party && caster.is_hero_ally()) {
        let origin = EffectOrigin::of(caster);
        apply_effects(
            cx.engine.effects(),
            def,
            def.passive_trigger,
            &origin,
            caster,
            cx.env,
            cx.out,
        );
    }

    if def.buff.party && !def.passive {
        cx.out.party_buffs.push(def.id);
    }

    if !def.hazard.use_hazard {
        pipeline::chain_post_power(cx, def, caster);
        let pos = caster.pos.floor();
        cx.out.loot.extend(def.loot.iter().map(|entry| LootDrop {
            entry: entry.clone(),
            pos,
        }));
    }
}

fn teleport(env: &mut Env<'_>, def: &AbilityDefinition, caster: &mut CasterState, target: FPoint) {
    let destination = limit_range(def.requirements.target_range, caster.pos, target);
    if def.target_neighbor == 0 {
        caster.teleport = Some(destination);
        return;
    }
    match env.random_neighbor(destination.floor(), def.target_neighbor, false) {
        Some(neighbor) => caster.teleport = Some(neighbor),
        None => tracing::debug!(ability = %def.id, "no free tile near teleport target"),
    }
}

/// Applies every post effect of `def` to `target`.
///
/// Shields and heals roll their magnitude from the origin's mental damage
/// (see [`MagnitudeFormula`](crate::catalog::MagnitudeFormula)), heals restore
/// health immediately up to the maximum, and knockbacks are dropped for
/// targets that cannot move. Every applied effect lands on the target's
/// stack tagged with `trigger`.
pub(super) fn apply_effects(
    effects: &EffectCatalog,
    def: &AbilityDefinition,
    trigger: PassiveTrigger,
    origin: &EffectOrigin,
    target: &mut CasterState,
    env: &mut Env<'_>,
    out: &mut OutputQueues,
) {
    for post in &def.post_effects {
        let definition = effects.resolve(&post.effect);
        let magnitude = definition.formula().evaluate(
            post.magnitude,
            def.hazard.mod_damage,
            origin,
            env.rng(),
        );

        match definition.kind {
            EffectKind::Shield => {
                let text = env.messages().format_number("+%d Shield", magnitude);
                out.buff_text(text, target.pos);
            }
            EffectKind::Heal => {
                let text = env.messages().format_number("+%d HP", magnitude);
                out.buff_text(text, target.pos);
                target.hp = (target.hp + magnitude).min(target.hp_max());
            }
            EffectKind::Knockback => {
                if target.speed_default == 0.0 {
                    continue;
                }
                target.knockback = Some(Knockback {
                    source: origin.pos,
                    destination: target.pos,
                });
            }
            EffectKind::Stat(_) => {}
        }

        target.effects.add(ActiveEffect {
            definition,
            duration: post.duration,
            magnitude,
            trigger,
            passive: def.passive.then_some(def.id),
            source: origin.source,
        });
    }
}
