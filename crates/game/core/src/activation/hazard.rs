//! Hazard assembly.
//!
//! Executors allocate a [`Hazard`] per artifact and let [`init_hazard`]
//! overlay the ability's profile and the caster's stats onto it, then fix
//! up the per-artifact geometry (angle, delay) themselves.

use crate::artifact::Hazard;
use crate::caster::CasterState;
use crate::catalog::{AbilityDefinition, AbilityKind, BaseDamage, StartingPosition};
use crate::env::Env;
use crate::geometry::{Direction, FPoint, limit_range, step_towards};
use crate::stats::StatKind;

pub(super) fn init_hazard(
    def: &AbilityDefinition,
    caster: &CasterState,
    target: FPoint,
    env: &mut Env<'_>,
    hazard: &mut Hazard,
) {
    let profile = &def.hazard;

    // ========================================================================
    // Attribution
    // ========================================================================

    hazard.ability = def.id;
    hazard.caster = Some(caster.id);
    hazard.source_type = profile.source_type.unwrap_or_else(|| caster.source_type());
    hazard.target_party = profile.target_party;
    hazard.target_categories = profile.target_categories.clone();

    // ========================================================================
    // Damage
    // ========================================================================

    hazard.accuracy = caster.stats.get(StatKind::Accuracy);
    if let Some(modifier) = profile.mod_accuracy {
        hazard.accuracy = modifier.apply_scalar(hazard.accuracy);
    }
    hazard.crit_chance = caster.stats.get(StatKind::Crit);
    if let Some(modifier) = profile.mod_crit {
        hazard.crit_chance = modifier.apply_scalar(hazard.crit_chance);
    }

    if !hazard.is_specialized() {
        let (min, max) = match profile.base_damage {
            BaseDamage::None => (0, 0),
            BaseDamage::Melee => (
                caster.stats.get(StatKind::DmgMeleeMin),
                caster.stats.get(StatKind::DmgMeleeMax),
            ),
            BaseDamage::Ranged => (
                caster.stats.get(StatKind::DmgRangedMin),
                caster.stats.get(StatKind::DmgRangedMax),
            ),
            BaseDamage::Mental => (
                caster.stats.get(StatKind::DmgMentMin),
                caster.stats.get(StatKind::DmgMentMax),
            ),
        };
        (hazard.dmg_min, hazard.dmg_max) = match profile.mod_damage {
            Some(modifier) => modifier.apply_range(min, max),
            None => (min, max),
        };
    }

    // ========================================================================
    // Presentation
    // ========================================================================

    let visuals = &def.visuals;
    if visuals.animation.is_some() {
        hazard.animation = visuals.animation.clone();
    }
    // An ability without visual settings keeps the row already on the hazard.
    if visuals.directional {
        hazard.directional = true;
        hazard.animation_kind = u32::from(Direction::between(caster.pos, target).row());
    } else if visuals.visual_random > 0 {
        hazard.animation_kind = env.rng().below(visuals.visual_random);
    } else if visuals.visual_option > 0 {
        hazard.animation_kind = visuals.visual_option;
    }
    hazard.on_floor = visuals.floor;
    hazard.complete_animation = visuals.complete_animation;

    // ========================================================================
    // Behavior
    // ========================================================================

    hazard.lifespan = profile.lifespan;
    hazard.base_lifespan = profile.lifespan;
    hazard.base_speed = profile.speed;
    hazard.radius = profile.radius;
    hazard.trait_elemental = profile.trait_elemental;
    hazard.active = !profile.no_attack;
    hazard.multitarget = profile.multitarget;
    hazard.trait_armor_penetration = profile.trait_armor_penetration;
    hazard.trait_avoidance_ignore = profile.trait_avoidance_ignore;
    hazard.trait_crits_impaired += profile.trait_crits_impaired;
    hazard.hp_steal += profile.hp_steal;
    hazard.mp_steal += profile.mp_steal;
    hazard.beacon = profile.beacon;
    hazard.target_movement = profile.target_movement;
    hazard.walls_block_aoe = profile.walls_block_aoe;
    hazard.missile = def.kind == Some(AbilityKind::Missile);

    // ========================================================================
    // Placement
    // ========================================================================

    hazard.pos = match profile.starting_pos {
        StartingPosition::AtSource => caster.pos,
        StartingPosition::AtTarget => {
            limit_range(def.requirements.target_range, caster.pos, target)
        }
        StartingPosition::AtMeleeReach => {
            step_towards(caster.pos, caster.direction, caster.melee_range)
        }
    };
    if def.target_neighbor > 0
        && let Some(neighbor) = env.random_neighbor(caster.pos.floor(), def.target_neighbor, true)
    {
        hazard.pos = neighbor;
    }

    // ========================================================================
    // Chains
    // ========================================================================

    hazard.post_power = def.post_power;
    hazard.wall_power = def.wall_power;
    if !def.loot.is_empty() {
        hazard.loot = def.loot.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caster::{Allegiance, CasterId};
    use crate::catalog::{AbilityId, SourceType, StatModifier};
    use crate::env::{PassthroughMessages, PcgRng, TileGrid};
    use crate::geometry::Point;
    use crate::stats::StatSnapshot;

    fn caster() -> CasterState {
        let mut caster = CasterState::new(CasterId(3), Allegiance::HeroAlly, Point::new(2, 2).center());
        caster.stats = StatSnapshot::new()
            .with(StatKind::Accuracy, 80)
            .with(StatKind::Crit, 10)
            .with(StatKind::DmgMeleeMin, 4)
            .with(StatKind::DmgMeleeMax, 8);
        caster
    }

    fn build(def: &AbilityDefinition, caster: &CasterState, target: FPoint, hazard: &mut Hazard) {
        let mut grid = TileGrid::new(8, 8);
        let mut rng = PcgRng::new(11);
        let messages = PassthroughMessages;
        let mut env = Env::new(&mut grid, &mut rng, &messages);
        init_hazard(def, caster, target, &mut env, hazard);
    }

    #[test]
    fn copies_damage_from_stats_with_modifiers() {
        let mut def = AbilityDefinition::of_kind(AbilityId(4), AbilityKind::Fixed);
        def.hazard.base_damage = BaseDamage::Melee;
        def.hazard.mod_damage = Some(StatModifier::Multiply(200));
        def.hazard.mod_accuracy = Some(StatModifier::Add(5));
        let caster = caster();
        let mut hazard = Hazard::new();
        build(&def, &caster, caster.pos, &mut hazard);

        assert_eq!((hazard.dmg_min, hazard.dmg_max), (8, 16));
        assert_eq!(hazard.accuracy, 85);
        assert_eq!(hazard.crit_chance, 10);
        assert_eq!(hazard.source_type, SourceType::Ally);
        assert_eq!(hazard.caster, Some(CasterId(3)));
    }

    #[test]
    fn specialized_damage_is_kept() {
        let mut def = AbilityDefinition::of_kind(AbilityId(4), AbilityKind::Fixed);
        def.hazard.base_damage = BaseDamage::Melee;
        let caster = caster();
        let mut hazard = Hazard::new();
        hazard.dmg_min = 1;
        hazard.dmg_max = 2;
        build(&def, &caster, caster.pos, &mut hazard);
        assert_eq!((hazard.dmg_min, hazard.dmg_max), (1, 2));
    }

    #[test]
    fn steal_and_impaired_bonuses_accumulate() {
        let mut def = AbilityDefinition::of_kind(AbilityId(4), AbilityKind::Fixed);
        def.hazard.hp_steal = 5;
        def.hazard.trait_crits_impaired = 20;
        let caster = caster();
        let mut hazard = Hazard::new();
        hazard.hp_steal = 10;
        hazard.trait_crits_impaired = 5;
        build(&def, &caster, caster.pos, &mut hazard);
        assert_eq!(hazard.hp_steal, 15);
        assert_eq!(hazard.trait_crits_impaired, 25);
    }

    #[test]
    fn target_start_is_clamped_to_range() {
        let mut def = AbilityDefinition::of_kind(AbilityId(4), AbilityKind::Fixed);
        def.hazard.starting_pos = StartingPosition::AtTarget;
        def.hazard.source_type = Some(SourceType::Neutral);
        def.requirements.target_range = 2.0;
        let caster = caster();
        let mut hazard = Hazard::new();
        build(&def, &caster, FPoint::new(7.5, 2.5), &mut hazard);
        assert_eq!(hazard.pos, FPoint::new(4.5, 2.5));
        assert_eq!(hazard.source_type, SourceType::Neutral);
    }

    #[test]
    fn directional_animation_faces_target() {
        let mut def = AbilityDefinition::of_kind(AbilityId(4), AbilityKind::Missile);
        def.visuals.directional = true;
        def.visuals.visual_option = 3;
        let caster = caster();
        let mut hazard = Hazard::new();
        build(&def, &caster, FPoint::new(6.5, 2.5), &mut hazard);
        assert_eq!(hazard.animation_kind, 5);
        assert!(hazard.missile);
    }

    #[test]
    fn plain_overlay_keeps_directional_row() {
        let mut base = AbilityDefinition::of_kind(AbilityId(4), AbilityKind::Missile);
        base.visuals.directional = true;
        let overlay = AbilityDefinition::of_kind(AbilityId(5), AbilityKind::Missile);
        let caster = caster();
        let mut hazard = Hazard::new();
        build(&base, &caster, FPoint::new(6.5, 2.5), &mut hazard);
        build(&overlay, &caster, FPoint::new(6.5, 2.5), &mut hazard);
        assert!(hazard.directional);
        assert_eq!(hazard.animation_kind, 5);
        assert_eq!(hazard.ability, AbilityId(5));
    }

    #[test]
    fn non_finite_range_leaves_target_unclamped() {
        let mut def = AbilityDefinition::of_kind(AbilityId(4), AbilityKind::Fixed);
        def.hazard.starting_pos = StartingPosition::AtTarget;
        def.requirements.target_range = f32::NAN;
        let caster = caster();
        let mut hazard = Hazard::new();
        build(&def, &caster, FPoint::new(7.5, 2.5), &mut hazard);
        assert_eq!(hazard.pos, FPoint::new(7.5, 2.5));
    }

    #[test]
    fn target_neighbor_moves_off_caster_tile() {
        let mut def = AbilityDefinition::of_kind(AbilityId(4), AbilityKind::Fixed);
        def.target_neighbor = 1;
        let caster = caster();
        let mut hazard = Hazard::new();
        build(&def, &caster, caster.pos, &mut hazard);
        assert_ne!(hazard.pos.floor(), caster.pos.floor());
        assert!(hazard.pos.distance(caster.pos) < 1.5);
    }
}
