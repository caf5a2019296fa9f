use ability_core::catalog::{
    ItemId, ItemRequirement, LootChance, LootEntry, PostEffect, SpawnLevel, SpawnLimit,
    StartingPosition, StatModifier,
};
use ability_core::{
    AbilityCatalog, AbilityDefinition, AbilityId, AbilityKind, ActivationError, Allegiance,
    CasterId, CasterState, EffectCatalog, EffectDefinition, EffectKind, EngineConfig, Env,
    FPoint, OutputQueues, PassiveTrigger, PassthroughMessages, PcgRng, Point, PowerEngine,
    StatKind, StatSnapshot, TileGrid, TileKind, TransformRequest,
};

// ============================================================================
// Harness
// ============================================================================

struct World {
    grid: TileGrid,
    rng: PcgRng,
    messages: PassthroughMessages,
    out: OutputQueues,
}

impl World {
    fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            grid: TileGrid::new(width, height),
            rng: PcgRng::new(seed),
            messages: PassthroughMessages,
            out: OutputQueues::new(),
        }
    }

    fn activate(
        &mut self,
        engine: &PowerEngine,
        id: u32,
        caster: &mut CasterState,
        target: FPoint,
    ) -> bool {
        let mut env = Env::new(&mut self.grid, &mut self.rng, &self.messages);
        engine.activate(AbilityId(id), caster, target, &mut env, &mut self.out)
    }

    fn try_activate(
        &mut self,
        engine: &PowerEngine,
        id: u32,
        caster: &mut CasterState,
        target: FPoint,
    ) -> Result<(), ActivationError> {
        let mut env = Env::new(&mut self.grid, &mut self.rng, &self.messages);
        engine.try_activate(AbilityId(id), caster, target, &mut env, &mut self.out)
    }

    fn passives(&mut self, engine: &PowerEngine, caster: &mut CasterState) {
        let mut env = Env::new(&mut self.grid, &mut self.rng, &self.messages);
        engine.activate_passives(caster, &mut env, &mut self.out);
    }
}

fn engine(definitions: Vec<AbilityDefinition>) -> PowerEngine {
    let effects: EffectCatalog = [
        EffectDefinition::with_kind("heal", EffectKind::Heal),
        EffectDefinition::with_kind("shield", EffectKind::Shield),
    ]
    .into_iter()
    .collect();
    PowerEngine::new(
        AbilityCatalog::from_definitions(definitions),
        effects,
        EngineConfig::default(),
    )
}

fn hero_at(tile: Point) -> CasterState {
    let mut hero = CasterState::hero(CasterId(1), tile.center());
    hero.stats = StatSnapshot::new()
        .with(StatKind::HpMax, 100)
        .with(StatKind::MpMax, 20)
        .with(StatKind::DmgMentMin, 10)
        .with(StatKind::DmgMentMax, 20);
    hero.restore();
    hero
}

fn fixed(id: u32) -> AbilityDefinition {
    AbilityDefinition::of_kind(AbilityId(id), AbilityKind::Fixed)
}

// ============================================================================
// Catalog bounds
// ============================================================================

#[test]
fn invalid_ids_are_rejected_without_side_effects() {
    let engine = engine(vec![fixed(1), fixed(3)]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));
    let before = hero.clone();

    for id in [0, 2, 4, 99] {
        assert!(!engine.can_activate(AbilityId(id), &hero));
        assert_eq!(
            world.try_activate(&engine, id, &mut hero, FPoint::ORIGIN),
            Err(ActivationError::InvalidId(AbilityId(id)))
        );
    }

    assert_eq!(hero, before);
    assert!(world.out.is_empty());
    assert!(engine.can_activate(AbilityId(3), &hero));
}

#[test]
fn slot_without_kind_cannot_fire() {
    let engine = engine(vec![AbilityDefinition::new(AbilityId(1))]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));
    assert_eq!(
        world.try_activate(&engine, 1, &mut hero, FPoint::ORIGIN),
        Err(ActivationError::MissingKind(AbilityId(1)))
    );
}

// ============================================================================
// Resources
// ============================================================================

#[test]
fn mana_gate_applies_to_heroes_only() {
    let mut ability = fixed(1);
    ability.requirements.mp = 5;
    let engine = engine(vec![ability]);
    let mut world = World::new(4, 4, 1);

    let mut hero = hero_at(Point::new(1, 1));
    hero.mp = 4;
    assert!(!world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
    assert_eq!(hero.mp, 4);

    hero.mp = 5;
    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
    assert_eq!(hero.mp, 0);

    let mut enemy = CasterState::new(CasterId(2), Allegiance::Enemy, FPoint::new(2.5, 2.5));
    enemy.hp = 10;
    assert!(world.activate(&engine, 1, &mut enemy, FPoint::ORIGIN));
    assert_eq!(enemy.mp, 0);
}

#[test]
fn equipped_items_are_consumed_once_per_tick() {
    let mut ability = fixed(1);
    ability.requirements.item = Some(ItemRequirement {
        item: ItemId(40),
        quantity: 2,
    });
    ability.requirements.equipped_item = Some(ItemRequirement {
        item: ItemId(41),
        quantity: 1,
    });
    let engine = engine(vec![ability]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));

    assert_eq!(world.out.used_items, vec![ItemId(40); 4]);
    assert_eq!(world.out.used_equipped_items, vec![ItemId(41)]);

    world.out.clear();
    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
    assert_eq!(world.out.used_equipped_items, vec![ItemId(41)]);
}

#[test]
fn equipped_item_shared_by_two_abilities_is_consumed_once() {
    let equipped = Some(ItemRequirement {
        item: ItemId(41),
        quantity: 1,
    });
    let mut slash = fixed(1);
    slash.requirements.equipped_item = equipped;
    let mut parry = fixed(2);
    parry.requirements.equipped_item = equipped;
    let engine = engine(vec![slash, parry]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
    assert!(world.activate(&engine, 2, &mut hero, FPoint::ORIGIN));

    assert_eq!(world.out.used_equipped_items, vec![ItemId(41)]);
}

#[test]
fn health_cost_clamps_at_zero_for_sacrifices() {
    let mut ability = fixed(1);
    ability.requirements.hp = 150;
    ability.requirements.sacrifice = true;
    let engine = engine(vec![ability]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
    assert_eq!(hero.hp, 0);
}

// ============================================================================
// Hazard executors
// ============================================================================

#[test]
fn missile_fan_is_centered_on_the_aim_bearing() {
    let mut ability = AbilityDefinition::of_kind(AbilityId(1), AbilityKind::Missile);
    ability.count = 3;
    ability.delay = 2;
    ability.missile.angle = 10;
    ability.hazard.speed = 0.5;
    ability.visuals.sound = Some("whoosh".to_string());
    let engine = engine(vec![ability]);
    let mut world = World::new(8, 8, 1);
    let mut hero = hero_at(Point::new(2, 2));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::new(6.5, 2.5)));

    let hazards = &world.out.hazards;
    assert_eq!(hazards.len(), 3);
    for (hazard, expected) in hazards.iter().zip([-10.0f32, 0.0, 10.0]) {
        assert!((hazard.angle - expected.to_radians()).abs() < 1e-5);
        assert!(hazard.missile);
        assert!((hazard.velocity.x - 0.5 * hazard.angle.cos()).abs() < 1e-5);
    }
    let delays: Vec<u32> = hazards.iter().map(|hazard| hazard.delay_frames).collect();
    assert_eq!(delays, vec![0, 2, 4]);
    assert_eq!(world.out.sounds, vec!["whoosh".to_string()]);
}

#[test]
fn wide_missile_fan_offsets_by_whole_angles() {
    let mut ability = AbilityDefinition::of_kind(AbilityId(1), AbilityKind::Missile);
    ability.count = 3;
    ability.missile.angle = 30;
    ability.hazard.speed = 0.5;
    let engine = engine(vec![ability]);
    let mut world = World::new(8, 8, 1);
    let mut hero = hero_at(Point::new(2, 2));

    // Aim straight down the +y axis, a bearing of 90 degrees.
    assert!(world.activate(&engine, 1, &mut hero, FPoint::new(2.5, 6.5)));

    let bearings: Vec<f32> = world
        .out
        .hazards
        .iter()
        .map(|hazard| hazard.angle.to_degrees())
        .collect();
    assert_eq!(bearings.len(), 3);
    for (bearing, expected) in bearings.iter().zip([60.0f32, 90.0, 120.0]) {
        assert!((bearing - expected).abs() < 1e-3, "{bearing} != {expected}");
    }
}

#[test]
fn repeater_stops_at_first_wall() {
    let mut ability = AbilityDefinition::of_kind(AbilityId(1), AbilityKind::Repeater);
    ability.count = 5;
    ability.delay = 3;
    ability.hazard.speed = 1.0;
    ability.requirements.mp = 2;
    let engine = engine(vec![ability]);
    let mut world = World::new(8, 4, 1);
    world.grid.set_tile(Point::new(4, 1), TileKind::Wall);
    let mut hero = hero_at(Point::new(1, 1));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::new(7.5, 1.5)));

    let positions: Vec<FPoint> = world.out.hazards.iter().map(|hazard| hazard.pos).collect();
    assert_eq!(positions, vec![FPoint::new(2.5, 1.5), FPoint::new(3.5, 1.5)]);
    let delays: Vec<u32> = world.out.hazards.iter().map(|hazard| hazard.delay_frames).collect();
    assert_eq!(delays, vec![0, 3]);
    assert_eq!(hero.mp, 18);
}

#[test]
fn fixed_hazards_accumulate_delay() {
    let mut ability = fixed(1);
    ability.hazard.use_hazard = true;
    ability.count = 3;
    ability.delay = 5;
    ability.hazard.starting_pos = StartingPosition::AtTarget;
    let engine = engine(vec![ability]);
    let mut world = World::new(8, 8, 1);
    let mut hero = hero_at(Point::new(1, 1));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::new(4.5, 4.5)));

    let delays: Vec<u32> = world.out.hazards.iter().map(|hazard| hazard.delay_frames).collect();
    assert_eq!(delays, vec![0, 5, 10]);
    assert!(world.out.hazards.iter().all(|hazard| hazard.pos == FPoint::new(4.5, 4.5)));
}

// ============================================================================
// Spawn
// ============================================================================

#[test]
fn blocked_spawn_fails_atomically() {
    let mut ability = AbilityDefinition::of_kind(AbilityId(1), AbilityKind::Spawn);
    ability.spawn_type = "wolf".to_string();
    ability.hazard.starting_pos = StartingPosition::AtTarget;
    ability.requirements.mp = 3;
    ability.buff.buff = true;
    ability.post_effects.push(PostEffect {
        effect: "shield".to_string(),
        magnitude: 0,
        duration: 60,
    });
    let engine = engine(vec![ability]);
    let mut world = World::new(2, 1, 1);
    world.grid.set_occupied(Point::new(0, 0), true);
    world.grid.set_occupied(Point::new(1, 0), true);
    let mut hero = hero_at(Point::new(0, 0));
    let before = hero.clone();

    assert_eq!(
        world.try_activate(&engine, 1, &mut hero, Point::new(1, 0).center()),
        Err(ActivationError::SpawnBlocked)
    );
    assert_eq!(hero, before);
    assert!(world.out.is_empty());
}

#[test]
fn spawn_emits_identical_requests() {
    let mut ability = AbilityDefinition::of_kind(AbilityId(1), AbilityKind::Spawn);
    ability.spawn_type = "wolf".to_string();
    ability.count = 2;
    ability.hazard.starting_pos = StartingPosition::AtTarget;
    ability.spawn.level = SpawnLevel::Fixed(4);
    let engine = engine(vec![ability]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(0, 0));

    assert!(world.activate(&engine, 1, &mut hero, Point::new(2, 0).center()));

    let spawns = &world.out.spawns;
    assert_eq!(spawns.len(), 2);
    assert_eq!(spawns[0], spawns[1]);
    assert_eq!(spawns[0].pos, Point::new(2, 0));
    assert_eq!(spawns[0].creature, "wolf");
    assert_eq!(spawns[0].summoner, Some(CasterId(1)));
    assert_eq!(spawns[0].level, Some(4));
    assert!(spawns[0].hero_ally);
}

#[test]
fn spawn_respects_summon_limit() {
    let mut ability = AbilityDefinition::of_kind(AbilityId(1), AbilityKind::Spawn);
    ability.spawn_type = "wolf".to_string();
    ability.spawn.limit = SpawnLimit::Fixed(2);
    let engine = engine(vec![ability]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));
    hero.active_summons = 2;

    assert_eq!(
        world.try_activate(&engine, 1, &mut hero, FPoint::ORIGIN),
        Err(ActivationError::SpawnLimitReached { limit: 2 })
    );
    assert!(world.out.is_empty());
}

// ============================================================================
// Transform
// ============================================================================

fn transform_engine() -> PowerEngine {
    let mut into = AbilityDefinition::of_kind(AbilityId(1), AbilityKind::Transform);
    into.spawn_type = "wolf".to_string();
    into.transform.duration = 600;
    into.transform.untransform_on_hit = true;
    into.requirements.mp = 1;
    let mut revert = AbilityDefinition::of_kind(AbilityId(2), AbilityKind::Transform);
    revert.spawn_type = "untransform".to_string();
    engine(vec![into, revert])
}

#[test]
fn transform_is_exclusive() {
    let engine = transform_engine();
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
    assert!(matches!(
        hero.transform.request,
        Some(TransformRequest::Into { ref form, .. }) if form == "wolf"
    ));
    assert!(hero.transform.untransform_on_hit);

    hero.transform.transformed = true;
    hero.transform.request = None;
    let mp = hero.mp;
    assert_eq!(
        world.try_activate(&engine, 1, &mut hero, FPoint::ORIGIN),
        Err(ActivationError::AlreadyTransformed)
    );
    assert_eq!(hero.transform.request, None);
    assert_eq!(hero.mp, mp);
    assert_eq!(
        world.out.messages.last().map(String::as_str),
        Some("You are already transformed, untransform first.")
    );
}

#[test]
fn untransform_requires_a_transformation_and_a_legal_tile() {
    let engine = transform_engine();
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));
    world.grid.set_occupied(Point::new(1, 1), true);

    assert_eq!(
        world.try_activate(&engine, 2, &mut hero, FPoint::ORIGIN),
        Err(ActivationError::NotTransformed)
    );

    hero.transform.transformed = true;
    world.grid.set_tile(Point::new(1, 1), TileKind::Pit);
    assert_eq!(
        world.try_activate(&engine, 2, &mut hero, FPoint::ORIGIN),
        Err(ActivationError::UntransformBlocked)
    );
    assert!(world.grid.is_occupied(Point::new(1, 1)));
    assert_eq!(hero.transform.request, None);

    world.grid.set_tile(Point::new(1, 1), TileKind::Floor);
    assert!(world.activate(&engine, 2, &mut hero, FPoint::ORIGIN));
    assert_eq!(hero.transform.request, Some(TransformRequest::Revert));
    assert!(world.grid.is_occupied(Point::new(1, 1)));
}

// ============================================================================
// Block
// ============================================================================

#[test]
fn block_latch_allows_one_block_at_a_time() {
    let mut ability = AbilityDefinition::of_kind(AbilityId(1), AbilityKind::Block);
    ability.post_effects.push(PostEffect {
        effect: "shield".to_string(),
        magnitude: 0,
        duration: 0,
    });
    let engine = engine(vec![ability]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
    assert_eq!(hero.effects.shield(), 20);
    assert_eq!(
        world.try_activate(&engine, 1, &mut hero, FPoint::ORIGIN),
        Err(ActivationError::AlreadyBlocking)
    );

    hero.end_block();
    assert!(hero.effects.is_empty());
    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
}

// ============================================================================
// Effects and chains
// ============================================================================

fn heal_ability() -> AbilityDefinition {
    let mut ability = fixed(1);
    ability.buff.buff = true;
    ability.hazard.mod_damage = Some(StatModifier::Add(5));
    ability.post_effects.push(PostEffect {
        effect: "heal".to_string(),
        magnitude: 0,
        duration: 30,
    });
    ability
}

#[test]
fn heal_rolls_mental_range_with_modifier() {
    let engine = engine(vec![heal_ability()]);
    for seed in 0..32 {
        let mut world = World::new(4, 4, seed);
        let mut hero = hero_at(Point::new(1, 1));
        hero.hp = 50;

        assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));

        let healed = hero.hp - 50;
        assert!((15..=25).contains(&healed), "healed {healed}");
        assert_eq!(world.out.combat_text[0].text, format!("+{healed} HP"));
    }
}

#[test]
fn heal_never_exceeds_max_health() {
    let engine = engine(vec![heal_ability()]);
    let mut world = World::new(4, 4, 9);
    let mut hero = hero_at(Point::new(1, 1));
    hero.hp = 95;

    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
    assert_eq!(hero.hp, 100);
}

#[test]
fn non_hazard_abilities_chain_immediately() {
    let mut first = fixed(1);
    first.post_power = AbilityId(2);
    first.loot.push(LootEntry {
        id: "gold".to_string(),
        chance: LootChance::Percent(50),
        quantity_min: 1,
        quantity_max: 3,
    });
    let mut second = fixed(2);
    second.visuals.sound = Some("chime".to_string());
    let engine = engine(vec![first, second]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(2, 3));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));

    assert_eq!(world.out.sounds, vec!["chime".to_string()]);
    assert_eq!(world.out.loot.len(), 1);
    assert_eq!(world.out.loot[0].pos, Point::new(2, 3));
}

#[test]
fn hazard_abilities_leave_chains_to_the_hazard() {
    let mut first = fixed(1);
    first.hazard.use_hazard = true;
    first.post_power = AbilityId(2);
    let mut second = fixed(2);
    second.visuals.sound = Some("chime".to_string());
    let engine = engine(vec![first, second]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));

    assert!(world.out.sounds.is_empty());
    assert_eq!(world.out.hazards[0].post_power, AbilityId(2));
}

#[test]
fn self_chaining_stops_at_max_depth() {
    let mut ability = fixed(1);
    ability.post_power = AbilityId(1);
    ability.visuals.sound = Some("echo".to_string());
    let engine = engine(vec![ability]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));

    assert!(world.activate(&engine, 1, &mut hero, FPoint::ORIGIN));
    let depth = EngineConfig::DEFAULT_MAX_CHAIN_DEPTH as usize;
    assert_eq!(world.out.sounds.len(), depth + 1);
}

#[test]
fn party_buffs_are_queued_and_teleports_clamped() {
    let mut ability = fixed(1);
    ability.buff.party = true;
    ability.buff.teleport = true;
    ability.requirements.target_range = 2.0;
    let engine = engine(vec![ability]);
    let mut world = World::new(8, 8, 1);
    let mut hero = hero_at(Point::new(1, 1));

    assert!(engine.has_valid_target(
        AbilityId(1),
        &hero,
        FPoint::new(6.5, 1.5),
        &Env::new(&mut world.grid, &mut world.rng, &world.messages),
    ));
    assert!(world.activate(&engine, 1, &mut hero, FPoint::new(6.5, 1.5)));

    assert_eq!(world.out.party_buffs, vec![AbilityId(1)]);
    assert_eq!(hero.teleport, Some(FPoint::new(3.5, 1.5)));
}

// ============================================================================
// Passives
// ============================================================================

fn passive(id: u32, trigger: PassiveTrigger, sound: &str) -> AbilityDefinition {
    let mut ability = fixed(id);
    ability.passive = true;
    ability.passive_trigger = trigger;
    ability.visuals.sound = Some(sound.to_string());
    ability
}

#[test]
fn half_health_passive_fires_exactly_once() {
    let engine = engine(vec![passive(1, PassiveTrigger::OnHalfHealth, "rage")]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));
    hero.passives.push(AbilityId(1));

    hero.hp = 60;
    world.passives(&engine, &mut hero);
    assert!(world.out.sounds.is_empty());

    hero.hp = 50;
    world.passives(&engine, &mut hero);
    assert_eq!(world.out.sounds.len(), 1);
    assert!(hero.refresh_stats);

    for hp in [40, 10, 70, 20] {
        hero.hp = hp;
        world.passives(&engine, &mut hero);
    }
    assert_eq!(world.out.sounds.len(), 1);
}

#[test]
fn half_health_passive_equipped_late_still_fires() {
    let engine = engine(vec![passive(1, PassiveTrigger::OnHalfHealth, "rage")]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));

    hero.hp = 30;
    world.passives(&engine, &mut hero);
    assert!(world.out.sounds.is_empty());

    hero.item_passives.push(AbilityId(1));
    world.passives(&engine, &mut hero);
    world.passives(&engine, &mut hero);
    assert_eq!(world.out.sounds, vec!["rage".to_string()]);
}

#[test]
fn untriggered_passives_fire_together_once() {
    let engine = engine(vec![
        passive(1, PassiveTrigger::OnFirstOpportunity, "a"),
        passive(2, PassiveTrigger::OnFirstOpportunity, "b"),
    ]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));
    hero.passives.push(AbilityId(1));
    hero.item_passives.push(AbilityId(2));

    world.passives(&engine, &mut hero);
    world.passives(&engine, &mut hero);

    assert_eq!(world.out.sounds, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn hit_passives_fire_per_armed_hit() {
    let engine = engine(vec![passive(1, PassiveTrigger::OnHit, "riposte")]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));
    hero.passives.push(AbilityId(1));

    world.passives(&engine, &mut hero);
    assert!(world.out.sounds.is_empty());

    hero.latches.arm(PassiveTrigger::OnHit);
    world.passives(&engine, &mut hero);
    world.passives(&engine, &mut hero);
    hero.latches.arm(PassiveTrigger::OnHit);
    world.passives(&engine, &mut hero);

    assert_eq!(world.out.sounds.len(), 2);
}

#[test]
fn join_combat_passive_fires_on_entering_combat() {
    let engine = engine(vec![passive(1, PassiveTrigger::OnJoinCombat, "horn")]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));
    hero.passives.push(AbilityId(1));

    world.passives(&engine, &mut hero);
    hero.in_combat = true;
    world.passives(&engine, &mut hero);
    world.passives(&engine, &mut hero);

    assert_eq!(world.out.sounds, vec!["horn".to_string()]);
}

#[test]
fn single_passive_activation_skips_triggered_passives() {
    let engine = engine(vec![
        passive(1, PassiveTrigger::OnFirstOpportunity, "aura"),
        passive(2, PassiveTrigger::OnHit, "riposte"),
    ]);
    let mut world = World::new(4, 4, 1);
    let mut hero = hero_at(Point::new(1, 1));

    for id in [1, 2] {
        let mut env = Env::new(&mut world.grid, &mut world.rng, &world.messages);
        engine.activate_single_passive(&mut hero, AbilityId(id), &mut env, &mut world.out);
    }

    assert_eq!(world.out.sounds, vec!["aura".to_string()]);
    assert!(hero.refresh_stats);
}
