//! Artifacts produced by activations.
//!
//! Executors hand these to the caller by value through
//! [`OutputQueues`](crate::activation::OutputQueues); the hazard, spawn and
//! loot services own them from then on.

use crate::caster::CasterId;
use crate::catalog::{AbilityId, LootEntry, MovementMask, SourceType};
use crate::geometry::{Direction, FPoint, Point};

/// Damage-carrying projectile or area effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hazard {
    pub ability: AbilityId,
    pub caster: Option<CasterId>,
    pub source_type: SourceType,
    pub target_party: bool,
    pub target_categories: Vec<String>,

    pub accuracy: i32,
    pub crit_chance: i32,
    pub dmg_min: i32,
    pub dmg_max: i32,

    pub animation: Option<String>,
    pub directional: bool,
    /// Sprite row.
    pub animation_kind: u32,
    pub on_floor: bool,
    pub complete_animation: bool,

    pub lifespan: u32,
    pub base_lifespan: u32,
    pub pos: FPoint,
    pub base_speed: f32,
    /// Bearing in radians.
    pub angle: f32,
    pub velocity: FPoint,
    /// Frames to wait before becoming active.
    pub delay_frames: u32,

    pub radius: f32,
    /// False for hazards that never damage (`no_attack`).
    pub active: bool,
    pub multitarget: bool,
    pub trait_elemental: Option<usize>,
    pub trait_armor_penetration: bool,
    pub trait_avoidance_ignore: bool,
    pub trait_crits_impaired: i32,
    pub hp_steal: i32,
    pub mp_steal: i32,
    pub beacon: bool,
    /// Missiles can be reflected.
    pub missile: bool,
    pub target_movement: MovementMask,
    pub walls_block_aoe: bool,

    pub post_power: AbilityId,
    pub wall_power: AbilityId,
    pub loot: Vec<LootEntry>,
}

impl Hazard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the hazard along `angle`, deriving its velocity from the base
    /// speed.
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.velocity = FPoint::new(self.base_speed * angle.cos(), self.base_speed * angle.sin());
    }

    /// True once base damage has been derived, so later overlays must leave
    /// it alone.
    pub fn is_specialized(&self) -> bool {
        self.dmg_max != 0
    }
}

impl Default for Hazard {
    fn default() -> Self {
        Self {
            ability: AbilityId::NONE,
            caster: None,
            source_type: SourceType::Hero,
            target_party: false,
            target_categories: Vec::new(),
            accuracy: 0,
            crit_chance: 0,
            dmg_min: 0,
            dmg_max: 0,
            animation: None,
            directional: false,
            animation_kind: 0,
            on_floor: false,
            complete_animation: false,
            lifespan: 0,
            base_lifespan: 0,
            pos: FPoint::ORIGIN,
            base_speed: 0.0,
            angle: 0.0,
            velocity: FPoint::ORIGIN,
            delay_frames: 0,
            radius: 0.0,
            active: true,
            multitarget: false,
            trait_elemental: None,
            trait_armor_penetration: false,
            trait_avoidance_ignore: false,
            trait_crits_impaired: 0,
            hp_steal: 0,
            mp_steal: 0,
            beacon: false,
            missile: false,
            target_movement: MovementMask::all(),
            walls_block_aoe: false,
            post_power: AbilityId::NONE,
            wall_power: AbilityId::NONE,
            loot: Vec::new(),
        }
    }
}

/// Creature the spawn service should place.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnRequest {
    pub creature: String,
    pub pos: Point,
    pub direction: Direction,
    pub summoner: Option<CasterId>,
    pub summon_ability: Option<AbilityId>,
    /// Fights for the hero's party.
    pub hero_ally: bool,
    /// Overrides the creature's default level.
    pub level: Option<u32>,
}

/// Loot to roll and drop at a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDrop {
    pub entry: LootEntry,
    pub pos: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatTextKind {
    #[default]
    Buff,
}

/// Floating combat text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatText {
    pub text: String,
    pub pos: FPoint,
    pub kind: CombatTextKind,
}
