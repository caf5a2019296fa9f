//! Interpretation of authored records.
//!
//! Records arrive as a flat stream of [`RawField`]s, the shape every
//! key/value content format reduces to. The builders turn that stream into
//! catalogs, reporting problems as diagnostics instead of failing.
//!
//! Power records are addressed by their `id` field, which must come first:
//! it selects (and allocates) the slot every following field writes to.
//! Effect records start at their first field and end at
//! [`EffectCatalogBuilder::end_record`].

use core::str::FromStr;

use crate::config::EngineConfig;
use crate::stats::{PrimaryStat, StatKind};

use super::{
    AbilityCatalog, AbilityDefinition, AbilityId, AbilityKind, ActivationState, BaseDamage,
    ConfigError, EffectCatalog, EffectDefinition, EffectKind, ItemId, ItemRequirement,
    LootChance, LootEntry, LoadReport, MagnitudeFormula, MovementMask, PassiveTrigger, PostEffect, SourceType,
    SpawnLevel, SpawnLimit, StartingPosition, StatModifier, Table,
};

/// One `key = value[, value...]` line of an authored record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawField {
    pub key: String,
    pub values: Vec<String>,
}

impl RawField {
    pub fn new<K, I, V>(key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn scalar(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: vec![value.into()],
        }
    }
}

// ============================================================================
// Field reader
// ============================================================================

/// Sequential typed access to a field's values. Parse problems are
/// collected and the default value is returned.
struct FieldReader<'a> {
    field: &'a RawField,
    next: usize,
    config: &'a EngineConfig,
    issues: &'a mut Vec<ConfigError>,
}

impl<'a> FieldReader<'a> {
    fn new(field: &'a RawField, config: &'a EngineConfig, issues: &'a mut Vec<ConfigError>) -> Self {
        Self {
            field,
            next: 0,
            config,
            issues,
        }
    }

    fn issue(&mut self, error: ConfigError) {
        self.issues.push(error);
    }

    fn next_str(&mut self) -> Option<&'a str> {
        let value = self.field.values.get(self.next)?;
        self.next += 1;
        Some(value.trim())
    }

    fn rest(&mut self) -> Vec<&'a str> {
        let mut rest = Vec::new();
        while let Some(value) = self.next_str() {
            rest.push(value);
        }
        rest
    }

    fn string(&mut self) -> String {
        self.next_str().unwrap_or_default().to_string()
    }

    fn number<T: FromStr>(&mut self, default: T) -> T {
        let Some(raw) = self.next_str() else {
            return default;
        };
        match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                let field = self.field.key.clone();
                self.issue(ConfigError::InvalidNumber {
                    field,
                    value: raw.to_string(),
                });
                default
            }
        }
    }

    /// Like [`Self::number`], but NaN and infinities are rejected.
    fn real(&mut self, default: f32) -> f32 {
        let value = self.number(default);
        if value.is_finite() {
            return value;
        }
        let field = self.field.key.clone();
        self.issue(ConfigError::InvalidNumber {
            field,
            value: value.to_string(),
        });
        default
    }

    fn flag(&mut self) -> bool {
        let raw = self.next_str().unwrap_or_default();
        match raw {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" | "" => false,
            other => {
                let field = self.field.key.clone();
                self.issue(ConfigError::InvalidBool {
                    field,
                    value: other.to_string(),
                });
                false
            }
        }
    }

    fn keyword<T: FromStr>(&mut self, what: &str) -> Option<T> {
        let raw = self.next_str().unwrap_or_default();
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.issue(ConfigError::UnknownValue {
                    field: what.to_string(),
                    value: raw.to_string(),
                });
                None
            }
        }
    }

    fn ability(&mut self) -> AbilityId {
        AbilityId(self.number(0))
    }

    /// `"<n>ms"` or `"<n>s"` in frames.
    fn duration(&mut self) -> u32 {
        let Some(raw) = self.next_str() else {
            return 0;
        };
        let split = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        let (digits, unit) = raw.split_at(split);
        let Ok(value) = digits.parse::<u32>() else {
            let field = self.field.key.clone();
            self.issue(ConfigError::InvalidNumber {
                field,
                value: raw.to_string(),
            });
            return 0;
        };
        if value == 0 {
            return 0;
        }
        match unit.trim() {
            "s" => self.config.frames_from_seconds(value),
            "ms" => self.config.frames_from_millis(value),
            "" => {
                self.issue(ConfigError::DurationWithoutUnit(raw.to_string()));
                self.config.frames_from_millis(value)
            }
            other => {
                self.issue(ConfigError::UnknownValue {
                    field: "duration unit".to_string(),
                    value: other.to_string(),
                });
                self.config.frames_from_millis(value)
            }
        }
    }

    /// `<mode>, <value>[, <max>]` with mode one of multiply/add/absolute.
    fn modifier(&mut self, ranged: bool) -> Option<StatModifier> {
        let mode = self.next_str().unwrap_or_default();
        let first: i32 = self.number(0);
        let second: i32 = if ranged { self.number(first) } else { first };
        match mode {
            "multiply" => Some(StatModifier::Multiply(first)),
            "add" => Some(StatModifier::Add(first)),
            "absolute" => Some(StatModifier::Absolute {
                min: first,
                max: second,
            }),
            other => {
                self.issue(ConfigError::UnknownValue {
                    field: "stat_modifier_mode".to_string(),
                    value: other.to_string(),
                });
                None
            }
        }
    }
}

// ============================================================================
// Effects
// ============================================================================

/// Builds an [`EffectCatalog`] from effect records.
#[derive(Debug)]
pub struct EffectCatalogBuilder<'a> {
    config: &'a EngineConfig,
    catalog: EffectCatalog,
    pending: Option<EffectDefinition>,
    report: LoadReport,
}

impl<'a> EffectCatalogBuilder<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            catalog: EffectCatalog::new(),
            pending: None,
            report: LoadReport::new(),
        }
    }

    pub fn push_field(&mut self, field: &RawField) {
        let definition = self.pending.get_or_insert_with(|| EffectDefinition::bare(""));
        let mut issues = Vec::new();
        let mut reader = FieldReader::new(field, self.config, &mut issues);

        match field.key.as_str() {
            "id" => definition.id = reader.string(),
            "type" => definition.kind = EffectKind::parse(&reader.string()),
            "icon" => definition.icon = Some(reader.number(0)),
            "animation" => definition.animation = Some(reader.string()),
            "can_stack" => definition.can_stack = reader.flag(),
            "render_above" => definition.render_above = reader.flag(),
            "magnitude" => {
                definition.magnitude = reader.keyword::<MagnitudeFormula>("magnitude formula")
            }
            other => reader.issue(ConfigError::UnknownKey(other.to_string())),
        }

        let record = Some(definition.id.clone()).filter(|id| !id.is_empty());
        for issue in issues {
            self.report.push(Table::Effects, record.clone(), issue);
        }
    }

    /// Closes the current record. Records without an id are discarded.
    pub fn end_record(&mut self) {
        let Some(definition) = self.pending.take() else {
            return;
        };
        if definition.id.is_empty() {
            self.report.push(Table::Effects, None, ConfigError::MissingEffectId);
            return;
        }
        let record = definition.id.clone();
        if let Err(error) = self.catalog.insert(definition) {
            self.report.push(Table::Effects, Some(record), error);
        }
    }

    pub fn finish(mut self) -> (EffectCatalog, LoadReport) {
        self.end_record();
        (self.catalog, self.report)
    }
}

// ============================================================================
// Powers
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cursor {
    /// No id read yet.
    Unset,
    /// The current record has an invalid id; its fields are ignored.
    Skipping,
    Record(AbilityId),
}

/// Builds an [`AbilityCatalog`] from power records.
#[derive(Debug)]
pub struct AbilityCatalogBuilder<'a> {
    rules: PowerRules<'a>,
    catalog: AbilityCatalog,
    cursor: Cursor,
    fresh: FreshRecord,
    report: LoadReport,
}

/// Lookups a power field is interpreted against.
#[derive(Clone, Copy, Debug)]
struct PowerRules<'a> {
    config: &'a EngineConfig,
    effects: &'a EffectCatalog,
}

/// Repeated keys that have not yet been seen in the current record. The
/// first occurrence replaces inherited entries, later ones append.
#[derive(Debug)]
struct FreshRecord {
    post_effects: bool,
    loot: bool,
}

impl FreshRecord {
    const OPEN: Self = Self {
        post_effects: true,
        loot: true,
    };
}

impl<'a> AbilityCatalogBuilder<'a> {
    pub fn new(config: &'a EngineConfig, effects: &'a EffectCatalog) -> Self {
        Self {
            rules: PowerRules { config, effects },
            catalog: AbilityCatalog::new(),
            cursor: Cursor::Unset,
            fresh: FreshRecord::OPEN,
            report: LoadReport::new(),
        }
    }

    pub fn push_field(&mut self, field: &RawField) {
        if field.key == "id" {
            self.open_record(field);
            return;
        }

        let id = match self.cursor {
            Cursor::Record(id) => id,
            Cursor::Skipping => return,
            Cursor::Unset => {
                self.report.push(
                    Table::Powers,
                    None,
                    ConfigError::FieldBeforeId(field.key.clone()),
                );
                return;
            }
        };

        let Some(definition) = self.catalog.get_mut(id) else {
            return;
        };
        let mut issues = Vec::new();
        self.rules.apply(&mut self.fresh, definition, field, &mut issues);

        for issue in issues {
            self.report.push(Table::Powers, Some(id.to_string()), issue);
        }
    }

    /// Marks the end of a record. Fields after this point need a new id.
    pub fn end_record(&mut self) {
        self.cursor = Cursor::Unset;
    }

    /// Finishes the load, coercing dangling chain references.
    pub fn finish(mut self) -> (AbilityCatalog, LoadReport) {
        self.catalog.verify_references(&mut self.report);
        (self.catalog, self.report)
    }

    fn open_record(&mut self, field: &RawField) {
        let raw = field.values.first().map(|v| v.trim()).unwrap_or_default();
        let id = raw.parse::<i64>().unwrap_or(0);
        self.fresh = FreshRecord::OPEN;

        if id < 1 || id > i64::from(u32::MAX - 1) {
            self.report
                .push(Table::Powers, None, ConfigError::IdOutOfBounds(id));
            self.cursor = Cursor::Skipping;
            return;
        }

        let id = AbilityId(id as u32);
        self.catalog.reserve_slots(id.get() + 1);
        if !self.catalog.contains(id) {
            self.catalog.insert(AbilityDefinition::new(id));
        }
        self.cursor = Cursor::Record(id);
    }
}

impl PowerRules<'_> {
    fn apply(
        &self,
        fresh: &mut FreshRecord,
        def: &mut AbilityDefinition,
        field: &RawField,
        issues: &mut Vec<ConfigError>,
    ) {
        let mut r = FieldReader::new(field, self.config, issues);
        match field.key.as_str() {
            // identity and activation
            "type" => {
                if let Some(kind) = r.keyword::<AbilityKind>("type") {
                    def.kind = Some(kind);
                }
            }
            "name" => def.name = r.string(),
            "description" => def.description = r.string(),
            "icon" => def.icon = Some(r.number(0)),
            "new_state" => {
                let state = r.string();
                def.new_state = if state == "instant" {
                    ActivationState::Instant
                } else {
                    ActivationState::CasterAnimation(state)
                };
            }
            "face" => def.face = r.flag(),
            "source_type" => {
                if let Some(source) = r.keyword::<SourceType>("source_type") {
                    def.hazard.source_type = Some(source);
                }
            }
            "beacon" => def.hazard.beacon = r.flag(),
            "count" => def.count = r.number(1),
            "passive" => def.passive = r.flag(),
            "passive_trigger" => {
                if let Some(trigger) = r.keyword::<PassiveTrigger>("passive trigger") {
                    def.passive_trigger = trigger;
                }
            }
            "meta_power" => def.meta_power = r.flag(),

            // requirements
            "requires_flags" => {
                def.requirements.equip_flags = r
                    .rest()
                    .into_iter()
                    .flat_map(|value| value.split(','))
                    .map(str::trim)
                    .filter(|flag| !flag.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "requires_mp" => def.requirements.mp = r.number(0),
            "requires_hp" => def.requirements.hp = r.number(0),
            "sacrifice" => def.requirements.sacrifice = r.flag(),
            "requires_los" => def.requirements.line_of_sight = r.flag(),
            "requires_empty_target" => def.requirements.empty_target = r.flag(),
            "requires_item" => {
                let item = ItemId(r.number(0));
                let quantity = r.number(1);
                def.requirements.item = Some(ItemRequirement { item, quantity });
            }
            "requires_equipped_item" => {
                let item = ItemId(r.number(0));
                let mut quantity: u32 = r.number(0);
                if quantity > 1 {
                    r.issue(ConfigError::EquippedQuantityClamped);
                    quantity = 1;
                }
                def.requirements.equipped_item = Some(ItemRequirement { item, quantity });
            }
            "requires_targeting" => def.requirements.targeting = r.flag(),
            "cooldown" => def.requirements.cooldown = r.duration(),
            "target_range" => def.requirements.target_range = r.real(0.0),

            // visuals
            "animation" => def.visuals.animation = Some(r.string()),
            "soundfx" => def.visuals.sound = Some(r.string()),
            "directional" => def.visuals.directional = r.flag(),
            "visual_random" => def.visuals.visual_random = r.number(0),
            "visual_option" => def.visuals.visual_option = r.number(0),
            "floor" => def.visuals.floor = r.flag(),
            "complete_animation" => def.visuals.complete_animation = r.flag(),
            "aim_assist" => def.hazard.aim_assist = r.flag(),

            // hazard
            "speed" => def.hazard.speed = self.config.per_frame(r.real(0.0)),
            "lifespan" => def.hazard.lifespan = r.duration(),
            "use_hazard" => def.hazard.use_hazard = r.flag(),
            "no_attack" => def.hazard.no_attack = r.flag(),
            "radius" => def.hazard.radius = r.real(0.0),
            "base_damage" => {
                if let Some(base) = r.keyword::<BaseDamage>("base_damage") {
                    def.hazard.base_damage = base;
                }
            }
            "starting_pos" => {
                if let Some(start) = r.keyword::<StartingPosition>("starting_pos") {
                    def.hazard.starting_pos = start;
                }
            }
            "multitarget" => def.hazard.multitarget = r.flag(),
            "trait_armor_penetration" => def.hazard.trait_armor_penetration = r.flag(),
            "trait_avoidance_ignore" => def.hazard.trait_avoidance_ignore = r.flag(),
            "trait_crits_impaired" => def.hazard.trait_crits_impaired = r.number(0),
            "trait_elemental" => {
                let element = r.string();
                match self.config.element_index(&element) {
                    Some(index) => def.hazard.trait_elemental = Some(index),
                    None => r.issue(ConfigError::UnknownValue {
                        field: "element".to_string(),
                        value: element,
                    }),
                }
            }
            "hp_steal" => def.hazard.hp_steal = r.number(0),
            "mp_steal" => def.hazard.mp_steal = r.number(0),
            "target_party" => def.hazard.target_party = r.flag(),
            "target_categories" => {
                def.hazard.target_categories = r.rest().into_iter().map(str::to_string).collect();
            }
            "modifier_accuracy" => def.hazard.mod_accuracy = r.modifier(false),
            "modifier_damage" => def.hazard.mod_damage = r.modifier(true),
            "modifier_critical" => def.hazard.mod_crit = r.modifier(false),
            "target_movement_normal" => {
                def.hazard.target_movement.set(MovementMask::NORMAL, r.flag())
            }
            "target_movement_flying" => {
                def.hazard.target_movement.set(MovementMask::FLYING, r.flag())
            }
            "target_movement_intangible" => {
                def.hazard.target_movement.set(MovementMask::INTANGIBLE, r.flag())
            }
            "walls_block_aoe" => def.hazard.walls_block_aoe = r.flag(),

            // per-kind parameters
            "missile_angle" => def.missile.angle = r.number(0),
            "angle_variance" => def.missile.angle_variance = r.number(0),
            "speed_variance" => def.missile.speed_variance = r.real(0.0),
            "delay" => def.delay = r.duration(),
            "transform_duration" => def.transform.duration = r.duration(),
            "manual_untransform" => def.transform.manual_untransform = r.flag(),
            "keep_equipment" => def.transform.keep_equipment = r.flag(),
            "untransform_on_hit" => def.transform.untransform_on_hit = r.flag(),
            "spawn_type" => def.spawn_type = r.string(),
            "target_neighbor" => def.target_neighbor = r.number(0),
            "spawn_limit" => {
                if let Some(limit) = spawn_limit(&mut r) {
                    def.spawn.limit = limit;
                }
            }
            "spawn_level" => {
                if let Some(level) = spawn_level(&mut r) {
                    def.spawn.level = level;
                }
            }

            // buffs and chains
            "buff" => def.buff.buff = r.flag(),
            "buff_teleport" => def.buff.teleport = r.flag(),
            "buff_party" => def.buff.party = r.flag(),
            "buff_party_power_id" => def.buff.party_power = r.ability(),
            "post_effect" => {
                if fresh.post_effects {
                    def.post_effects.clear();
                    fresh.post_effects = false;
                }
                let effect = r.string();
                if self.is_valid_effect(&effect) {
                    let magnitude = r.number(0);
                    let duration = r.duration();
                    def.post_effects.push(PostEffect {
                        effect,
                        magnitude,
                        duration,
                    });
                } else {
                    r.issue(ConfigError::UnknownEffect(effect));
                }
            }
            "post_power" => def.post_power = r.ability(),
            "wall_power" => def.wall_power = r.ability(),
            "loot" => {
                if fresh.loot {
                    def.loot.clear();
                    fresh.loot = false;
                }
                def.loot.extend(loot_entries(&mut r));
            }

            other => r.issue(ConfigError::UnknownKey(other.to_string())),
        }
    }

    /// Post effects may name the movement speed, a primary stat, any stat
    /// key, an elemental resistance or an effect catalog entry.
    fn is_valid_effect(&self, id: &str) -> bool {
        id == "speed"
            || PrimaryStat::from_str(id).is_ok()
            || StatKind::from_str(id).is_ok()
            || id
                .strip_suffix("_resist")
                .is_some_and(|element| self.config.element_index(element).is_some())
            || self.effects.lookup_effect(id).is_some()
    }
}

fn spawn_limit(r: &mut FieldReader<'_>) -> Option<SpawnLimit> {
    let mode = r.string();
    match mode.as_str() {
        "unlimited" => Some(SpawnLimit::Unlimited),
        "fixed" => Some(SpawnLimit::Fixed(r.number(0))),
        "stat" => {
            let quantity = r.number(0);
            let every = r.number(0);
            let stat = r.keyword::<PrimaryStat>("spawn_limit_stat")?;
            Some(SpawnLimit::StatScaled {
                quantity,
                every,
                stat,
            })
        }
        _ => {
            r.issue(ConfigError::UnknownValue {
                field: "spawn_limit_mode".to_string(),
                value: mode,
            });
            None
        }
    }
}

fn spawn_level(r: &mut FieldReader<'_>) -> Option<SpawnLevel> {
    let mode = r.string();
    match mode.as_str() {
        "default" => Some(SpawnLevel::Default),
        "fixed" => Some(SpawnLevel::Fixed(r.number(0))),
        "stat" => {
            let quantity = r.number(0);
            let every = r.number(0);
            let stat = r.keyword::<PrimaryStat>("spawn_level_stat")?;
            Some(SpawnLevel::StatScaled {
                quantity,
                every,
                stat,
            })
        }
        "level" => {
            let quantity = r.number(0);
            let every = r.number(0);
            Some(SpawnLevel::CasterLevel { quantity, every })
        }
        _ => {
            r.issue(ConfigError::UnknownValue {
                field: "spawn_level_mode".to_string(),
                value: mode,
            });
            None
        }
    }
}

/// `id, chance, quantity_min, quantity_max` groups; chance is `fixed` or a
/// percentage.
fn loot_entries(r: &mut FieldReader<'_>) -> Vec<LootEntry> {
    let mut entries = Vec::new();
    while let Some(id) = r.next_str() {
        let chance = match r.next_str() {
            None | Some("fixed") => LootChance::Fixed,
            Some(raw) => match raw.parse() {
                Ok(percent) => LootChance::Percent(percent),
                Err(_) => {
                    r.issue(ConfigError::InvalidNumber {
                        field: "loot".to_string(),
                        value: raw.to_string(),
                    });
                    LootChance::Fixed
                }
            },
        };
        let quantity_min = r.number::<u32>(1).max(1);
        let quantity_max = r.number::<u32>(quantity_min).max(quantity_min);
        entries.push(LootEntry {
            id: id.to_string(),
            chance,
            quantity_min,
            quantity_max,
        });
    }
    entries
}
