//! Load-time diagnostics.
//!
//! Content problems never abort a load: the offending field keeps its
//! default, a warning is logged and a [`Diagnostic`] is recorded so callers
//! can surface or assert on it.

use crate::error::{ErrorSeverity, GameError};

use super::AbilityId;

/// Problem found while interpreting authored records.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("'{0}' is not a valid key")]
    UnknownKey(String),

    #[error("unknown {field} '{value}'")]
    UnknownValue { field: String, value: String },

    #[error("'{value}' is not a valid number for '{field}'")]
    InvalidNumber { field: String, value: String },

    #[error("'{value}' is not a valid boolean for '{field}'")]
    InvalidBool { field: String, value: String },

    #[error("power index {0} out of bounds 1-{max}, skipping power", max = u32::MAX - 1)]
    IdOutOfBounds(i64),

    #[error("field '{0}' appears before the record id")]
    FieldBeforeId(String),

    #[error("effect record without an id discarded")]
    MissingEffectId,

    #[error("duplicate effect id '{0}'")]
    DuplicateEffect(String),

    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    #[error("only 1 equipped item can be consumed at a time")]
    EquippedQuantityClamped,

    #[error("duration '{0}' has no unit, assuming ms")]
    DurationWithoutUnit(String),

    #[error("{field} refers to {id}, which is not a valid power id")]
    DanglingReference { field: String, id: AbilityId },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownKey(_) => "CONFIG_UNKNOWN_KEY",
            Self::UnknownValue { .. } => "CONFIG_UNKNOWN_VALUE",
            Self::InvalidNumber { .. } => "CONFIG_INVALID_NUMBER",
            Self::InvalidBool { .. } => "CONFIG_INVALID_BOOL",
            Self::IdOutOfBounds(_) => "CONFIG_ID_OUT_OF_BOUNDS",
            Self::FieldBeforeId(_) => "CONFIG_FIELD_BEFORE_ID",
            Self::MissingEffectId => "CONFIG_MISSING_EFFECT_ID",
            Self::DuplicateEffect(_) => "CONFIG_DUPLICATE_EFFECT",
            Self::UnknownEffect(_) => "CONFIG_UNKNOWN_EFFECT",
            Self::EquippedQuantityClamped => "CONFIG_EQUIPPED_QUANTITY_CLAMPED",
            Self::DurationWithoutUnit(_) => "CONFIG_DURATION_WITHOUT_UNIT",
            Self::DanglingReference { .. } => "CONFIG_DANGLING_REFERENCE",
        }
    }
}

/// Table a diagnostic was raised in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Table {
    Effects,
    Powers,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub table: Table,
    /// Record the field belonged to, when known.
    pub record: Option<String>,
    pub error: ConfigError,
}

/// Diagnostics collected during a load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and records a diagnostic.
    pub fn push(&mut self, table: Table, record: Option<String>, error: ConfigError) {
        tracing::warn!(
            table = %table,
            record = record.as_deref().unwrap_or("-"),
            code = error.error_code(),
            "{error}"
        );
        self.diagnostics.push(Diagnostic {
            table,
            record,
            error,
        });
    }

    pub fn merge(&mut self, other: LoadReport) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// True when some diagnostic matches `predicate`.
    pub fn contains(&self, predicate: impl Fn(&ConfigError) -> bool) -> bool {
        self.diagnostics.iter().any(|diag| predicate(&diag.error))
    }
}
