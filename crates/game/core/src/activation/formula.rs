use crate::caster::CasterState;
use crate::catalog::{MagnitudeFormula, SourceType, StatModifier};
use crate::env::RngOracle;
use crate::geometry::FPoint;
use crate::stats::StatKind;

/// Caster-side inputs of an effect application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectOrigin {
    pub pos: FPoint,
    pub ment_min: i32,
    pub ment_max: i32,
    pub source: SourceType,
}

impl EffectOrigin {
    pub fn of(caster: &CasterState) -> Self {
        Self {
            pos: caster.pos,
            ment_min: caster.stats.get(StatKind::DmgMentMin),
            ment_max: caster.stats.get(StatKind::DmgMentMax),
            source: caster.source_type(),
        }
    }
}

impl MagnitudeFormula {
    /// Effect magnitude.
    ///
    /// | formula       | base                      |
    /// |---------------|---------------------------|
    /// | `authored`    | authored magnitude        |
    /// | `mental_max`  | `ment_max`                |
    /// | `mental_roll` | roll in `[ment_min, ment_max]` |
    ///
    /// The mental formulas then apply the damage modifier: `Multiply` scales
    /// the base by percent, `Add` adds to it, `Absolute` replaces it with a
    /// roll in `[min, max]`.
    pub fn evaluate(
        self,
        authored: i32,
        modifier: Option<StatModifier>,
        origin: &EffectOrigin,
        rng: &mut dyn RngOracle,
    ) -> i32 {
        let base = match self {
            Self::Authored => return authored,
            Self::MentalMax => origin.ment_max,
            Self::MentalRoll => rng.range(origin.ment_min, origin.ment_max),
        };
        match modifier {
            None => base,
            Some(StatModifier::Multiply(percent)) => base * percent / 100,
            Some(StatModifier::Add(delta)) => base + delta,
            Some(StatModifier::Absolute { min, max }) => rng.range(min, max),
        }
    }
}
