//! Caster statistics consulted by cost checks, damage derivation and
//! effect magnitudes.
//!
//! The simulation recomputes stats whenever equipment or effects change and
//! hands the engine a [`StatSnapshot`]. Stat names double as the
//! configuration keys used by stat-modifying effects.

use strum::EnumCount;

/// Derived combat statistics.
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
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    #[strum(serialize = "hp")]
    HpMax,
    HpRegen,
    #[strum(serialize = "mp")]
    MpMax,
    MpRegen,
    Accuracy,
    Avoidance,
    DmgMeleeMin,
    DmgMeleeMax,
    DmgRangedMin,
    DmgRangedMax,
    DmgMentMin,
    DmgMentMax,
    AbsorbMin,
    AbsorbMax,
    Crit,
    Poise,
    ReflectChance,
}

/// Primary attributes. Spawn policies scale summon limits and levels by
/// these.
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
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PrimaryStat {
    Physical,
    Mental,
    Offense,
    Defense,
}

/// Point-in-time stat values for one caster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSnapshot {
    stats: [i32; StatKind::COUNT],
    primary: [i32; PrimaryStat::COUNT],
}

impl StatSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: StatKind) -> i32 {
        self.stats[kind as usize]
    }

    pub fn set(&mut self, kind: StatKind, value: i32) {
        self.stats[kind as usize] = value;
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, kind: StatKind, value: i32) -> Self {
        self.set(kind, value);
        self
    }

    pub fn primary(&self, stat: PrimaryStat) -> i32 {
        self.primary[stat as usize]
    }

    pub fn set_primary(&mut self, stat: PrimaryStat, value: i32) {
        self.primary[stat as usize] = value;
    }

    #[must_use]
    pub fn with_primary(mut self, stat: PrimaryStat, value: i32) -> Self {
        self.set_primary(stat, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn stat_keys_match_config_names() {
        assert_eq!(StatKind::from_str("hp"), Ok(StatKind::HpMax));
        assert_eq!(StatKind::from_str("dmg_ment_max"), Ok(StatKind::DmgMentMax));
        assert_eq!(StatKind::ReflectChance.as_ref(), "reflect_chance");
        assert!(StatKind::from_str("luck").is_err());
    }

    #[test]
    fn snapshot_get_set() {
        let stats = StatSnapshot::new()
            .with(StatKind::DmgMentMin, 4)
            .with_primary(PrimaryStat::Mental, 7);
        assert_eq!(stats.get(StatKind::DmgMentMin), 4);
        assert_eq!(stats.get(StatKind::DmgMentMax), 0);
        assert_eq!(stats.primary(PrimaryStat::Mental), 7);
    }
}
