//! Ability definitions.
//!
//! A definition is plain authored data: the executors read it, nothing
//! mutates it after load. Fields are grouped by the concern that consumes
//! them (requirements, hazard profile, per-kind parameters, chains).

use crate::stats::{PrimaryStat, StatSnapshot};

/// Catalog slot identifier. Zero is the "no ability" sentinel used by
/// chain references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityId(pub u32);

impl AbilityId {
    pub const NONE: Self = Self(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an inventory item definition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

/// Execution kind. Decides which executor runs the ability.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    /// Hazards at a fixed point, no travel.
    Fixed,
    /// A fan of travelling projectiles.
    Missile,
    /// Hazards laid out along a straight line.
    Repeater,
    /// Creature summon.
    Spawn,
    /// Shape-shift into (or back from) another creature form.
    Transform,
    /// Stationary block with attached effects.
    Block,
}

/// Caster state entered when the ability is used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationState {
    #[default]
    Instant,
    CasterAnimation(String),
}

/// Side a hazard fights for.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SourceType {
    #[default]
    Hero,
    Neutral,
    /// Hero party member. Derived from the caster, never authored.
    #[strum(disabled)]
    Ally,
    Enemy,
}

/// Stat pair a hazard copies its damage range from.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BaseDamage {
    #[default]
    None,
    Melee,
    Ranged,
    #[strum(serialize = "ment")]
    Mental,
}

/// Where hazards and summons appear.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum StartingPosition {
    #[default]
    #[strum(serialize = "source")]
    AtSource,
    /// Aim point, clamped to the ability's range.
    #[strum(serialize = "target")]
    AtTarget,
    /// Melee reach in front of the caster.
    #[strum(serialize = "melee")]
    AtMeleeReach,
}

/// Condition under which a passive ability fires.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PassiveTrigger {
    /// No authored trigger. Fires once per trigger epoch.
    #[default]
    #[strum(disabled)]
    OnFirstOpportunity,
    OnBlock,
    OnHit,
    #[strum(serialize = "on_halfdeath")]
    OnHalfHealth,
    #[strum(serialize = "on_joincombat")]
    OnJoinCombat,
    OnDeath,
}

/// Per-activation adjustment of a copied stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatModifier {
    /// Scale by a percentage.
    Multiply(i32),
    /// Add a flat delta.
    Add(i32),
    /// Replace with a value rolled from `[min, max]`.
    Absolute { min: i32, max: i32 },
}

impl StatModifier {
    /// Applies the modifier to a single value. `Absolute` yields its lower
    /// bound; single-value modifiers are authored with `min == max`.
    pub fn apply_scalar(self, value: i32) -> i32 {
        match self {
            Self::Multiply(percent) => value * percent / 100,
            Self::Add(delta) => value + delta,
            Self::Absolute { min, .. } => min,
        }
    }

    /// Applies the modifier to both ends of a range.
    pub fn apply_range(self, min: i32, max: i32) -> (i32, i32) {
        match self {
            Self::Multiply(percent) => (min * percent / 100, max * percent / 100),
            Self::Add(delta) => (min + delta, max + delta),
            Self::Absolute { min, max } => (min, max),
        }
    }
}

bitflags::bitflags! {
    /// Movement types a hazard can hit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MovementMask: u8 {
        const NORMAL     = 1 << 0;
        const FLYING     = 1 << 1;
        const INTANGIBLE = 1 << 2;
    }
}

impl Default for MovementMask {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRequirement {
    pub item: ItemId,
    pub quantity: u32,
}

/// Gates checked before activation and costs paid after it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requirements {
    /// Mana cost. Only heroes are gated on and pay it.
    pub mp: i32,
    /// Health cost. Refused unless the caster would survive, or `sacrifice`.
    pub hp: i32,
    pub sacrifice: bool,
    pub equip_flags: Vec<String>,
    pub line_of_sight: bool,
    pub empty_target: bool,
    pub item: Option<ItemRequirement>,
    /// At most one unit is consumed per activation.
    pub equipped_item: Option<ItemRequirement>,
    pub targeting: bool,
    /// Maximum aim distance per axis. Zero means unlimited.
    pub target_range: f32,
    /// Cooldown in frames.
    pub cooldown: u32,
}

/// Everything copied onto hazards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardProfile {
    pub use_hazard: bool,
    pub no_attack: bool,
    pub radius: f32,
    /// Lifespan in frames.
    pub lifespan: u32,
    /// Travel speed in map units per frame.
    pub speed: f32,
    pub starting_pos: StartingPosition,
    pub multitarget: bool,
    pub walls_block_aoe: bool,
    pub target_movement: MovementMask,
    pub trait_armor_penetration: bool,
    pub trait_avoidance_ignore: bool,
    pub trait_crits_impaired: i32,
    /// Index into the configured element list.
    pub trait_elemental: Option<usize>,
    pub hp_steal: i32,
    pub mp_steal: i32,
    pub beacon: bool,
    pub target_party: bool,
    pub target_categories: Vec<String>,
    /// Overrides the caster-derived source category.
    pub source_type: Option<SourceType>,
    pub base_damage: BaseDamage,
    pub mod_accuracy: Option<StatModifier>,
    pub mod_damage: Option<StatModifier>,
    pub mod_crit: Option<StatModifier>,
    pub aim_assist: bool,
}

impl Default for HazardProfile {
    fn default() -> Self {
        Self {
            use_hazard: false,
            no_attack: false,
            radius: 0.0,
            lifespan: 0,
            speed: 0.0,
            starting_pos: StartingPosition::AtSource,
            multitarget: false,
            walls_block_aoe: false,
            target_movement: MovementMask::all(),
            trait_armor_penetration: false,
            trait_avoidance_ignore: false,
            trait_crits_impaired: 0,
            trait_elemental: None,
            hp_steal: 0,
            mp_steal: 0,
            beacon: false,
            target_party: false,
            target_categories: Vec::new(),
            source_type: None,
            base_damage: BaseDamage::None,
            mod_accuracy: None,
            mod_damage: None,
            mod_crit: None,
            aim_assist: false,
        }
    }
}

/// Animation and sound cues.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visuals {
    pub animation: Option<String>,
    pub sound: Option<String>,
    /// Sprite sheet has one row per direction.
    pub directional: bool,
    /// Number of interchangeable rows to pick from at random.
    pub visual_random: u32,
    /// Fixed row.
    pub visual_option: u32,
    pub floor: bool,
    pub complete_animation: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissileParams {
    /// Fan spacing between adjacent missiles, degrees.
    pub angle: i32,
    /// Random bearing jitter bound, whole degrees.
    pub angle_variance: i32,
    /// Random speed jitter bound, map units per frame.
    pub speed_variance: f32,
}

/// Cap on a caster's live summons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnLimit {
    Fixed(u32),
    /// `quantity` summons per `every` points of `stat`.
    StatScaled {
        quantity: u32,
        every: u32,
        stat: PrimaryStat,
    },
    #[default]
    Unlimited,
}

impl SpawnLimit {
    /// Maximum live summons, or `None` when unlimited.
    pub fn resolve(&self, stats: &StatSnapshot) -> Option<u32> {
        match *self {
            Self::Fixed(limit) => Some(limit),
            Self::StatScaled {
                quantity,
                every,
                stat,
            } => Some(scaled(quantity, every, stats.primary(stat))),
            Self::Unlimited => None,
        }
    }
}

/// Level stamped on summoned creatures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnLevel {
    /// The creature's own level.
    #[default]
    Default,
    Fixed(u32),
    StatScaled {
        quantity: u32,
        every: u32,
        stat: PrimaryStat,
    },
    CasterLevel {
        quantity: u32,
        every: u32,
    },
}

impl SpawnLevel {
    /// Level for new summons, or `None` to keep the creature default.
    pub fn resolve(&self, stats: &StatSnapshot, caster_level: u32) -> Option<u32> {
        match *self {
            Self::Default => None,
            Self::Fixed(level) => Some(level),
            Self::StatScaled {
                quantity,
                every,
                stat,
            } => Some(scaled(quantity, every, stats.primary(stat))),
            Self::CasterLevel { quantity, every } => {
                Some(scaled(quantity, every, caster_level as i32))
            }
        }
    }
}

fn scaled(quantity: u32, every: u32, value: i32) -> u32 {
    if every == 0 {
        return quantity;
    }
    quantity.saturating_mul(value.max(0) as u32 / every)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnParams {
    pub limit: SpawnLimit,
    pub level: SpawnLevel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformParams {
    /// Duration in frames; zero is permanent.
    pub duration: u32,
    pub manual_untransform: bool,
    pub keep_equipment: bool,
    pub untransform_on_hit: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffProfile {
    /// Apply post effects to the caster.
    pub buff: bool,
    pub teleport: bool,
    /// Apply post effects to hero party members.
    pub party: bool,
    pub party_power: AbilityId,
}

/// Effect applied by the buff path.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PostEffect {
    /// Effect catalog id, or a bare stat/resist key.
    pub effect: String,
    pub magnitude: i32,
    /// Duration in frames.
    pub duration: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LootChance {
    /// Always dropped.
    #[default]
    Fixed,
    Percent(u32),
}

/// Loot table row, resolved by the external loot service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub id: String,
    pub chance: LootChance,
    pub quantity_min: u32,
    pub quantity_max: u32,
}

/// Creature form that reverts a transformation.
pub const UNTRANSFORM: &str = "untransform";

/// Authored ability record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    pub description: String,
    pub icon: Option<u32>,
    /// Unset until a `type` field is read; such slots cannot activate.
    pub kind: Option<AbilityKind>,
    pub new_state: ActivationState,
    pub face: bool,
    pub requirements: Requirements,
    pub hazard: HazardProfile,
    pub visuals: Visuals,
    /// Hazards (or summons) created per activation.
    pub count: u32,
    /// Frames between consecutive hazards.
    pub delay: u32,
    /// Neighbor search radius for teleports, hazards and summons.
    pub target_neighbor: u32,
    pub missile: MissileParams,
    /// Summoned creature type, or the transform target form.
    pub spawn_type: String,
    pub spawn: SpawnParams,
    pub transform: TransformParams,
    pub buff: BuffProfile,
    pub post_effects: Vec<PostEffect>,
    /// Chained on a successful hit.
    pub post_power: AbilityId,
    /// Chained when the hazard hits a wall.
    pub wall_power: AbilityId,
    pub loot: Vec<LootEntry>,
    pub passive: bool,
    pub passive_trigger: PassiveTrigger,
    /// Only usable through an equipment substitution.
    pub meta_power: bool,
}

impl AbilityDefinition {
    pub fn new(id: AbilityId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            icon: None,
            kind: None,
            new_state: ActivationState::Instant,
            face: false,
            requirements: Requirements::default(),
            hazard: HazardProfile::default(),
            visuals: Visuals::default(),
            count: 1,
            delay: 0,
            target_neighbor: 0,
            missile: MissileParams::default(),
            spawn_type: String::new(),
            spawn: SpawnParams::default(),
            transform: TransformParams::default(),
            buff: BuffProfile::default(),
            post_effects: Vec::new(),
            post_power: AbilityId::NONE,
            wall_power: AbilityId::NONE,
            loot: Vec::new(),
            passive: false,
            passive_trigger: PassiveTrigger::OnFirstOpportunity,
            meta_power: false,
        }
    }

    /// Shorthand for a definition of the given kind.
    pub fn of_kind(id: AbilityId, kind: AbilityKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::new(id)
        }
    }

    pub fn is_untransform(&self) -> bool {
        self.spawn_type == UNTRANSFORM
    }
}
