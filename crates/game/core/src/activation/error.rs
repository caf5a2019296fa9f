//! Activation errors.
//!
//! Every rejection is atomic: when an activation returns one of these, the
//! caster and the output queues are exactly as they were before the call,
//! except for the localized message a rejection may queue.

use crate::catalog::{AbilityId, CatalogError};
use crate::error::{ErrorSeverity, GameError};

// ============================================================================
// Activation Errors
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationError {
    /// Id outside the catalog or an unpopulated slot.
    #[error("{0} is not a valid power id")]
    InvalidId(AbilityId),

    /// Slot populated but no execution kind was authored.
    #[error("power {0} has no type")]
    MissingKind(AbilityId),

    /// Meta power used without an equipment substitution.
    #[error("power {0} is a meta power with no substitute equipped")]
    MetaPowerWithoutSubstitute(AbilityId),

    #[error("not enough mana: requires {required}, has {available}")]
    InsufficientMana { required: i32, available: i32 },

    #[error("health requirement {required} not met with {current} hp")]
    HealthRequirement { required: i32, current: i32 },

    #[error("already blocking")]
    AlreadyBlocking,

    #[error("already transformed")]
    AlreadyTransformed,

    #[error("not transformed")]
    NotTransformed,

    #[error("cannot untransform at this position")]
    UntransformBlocked,

    #[error("no free tile to spawn on")]
    SpawnBlocked,

    #[error("summon limit of {limit} reached")]
    SpawnLimitReached { limit: u32 },

    /// A post-power chain nested deeper than the configured limit.
    #[error("activation chain deeper than {0}")]
    ChainTooDeep(u32),
}

impl ActivationError {
    /// Message key shown to the player, if the failure has one.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyTransformed => Some("You are already transformed, untransform first."),
            Self::UntransformBlocked => Some("Could not untransform at this position."),
            _ => None,
        }
    }
}

impl From<CatalogError> for ActivationError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::InvalidId(id) => Self::InvalidId(id),
        }
    }
}

impl GameError for ActivationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidId(_) | Self::MissingKind(_) | Self::MetaPowerWithoutSubstitute(_) => {
                ErrorSeverity::Validation
            }
            Self::ChainTooDeep(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "ACTIVATION_INVALID_ID",
            Self::MissingKind(_) => "ACTIVATION_MISSING_KIND",
            Self::MetaPowerWithoutSubstitute(_) => "ACTIVATION_META_POWER",
            Self::InsufficientMana { .. } => "ACTIVATION_INSUFFICIENT_MANA",
            Self::HealthRequirement { .. } => "ACTIVATION_HEALTH_REQUIREMENT",
            Self::AlreadyBlocking => "ACTIVATION_ALREADY_BLOCKING",
            Self::AlreadyTransformed => "ACTIVATION_ALREADY_TRANSFORMED",
            Self::NotTransformed => "ACTIVATION_NOT_TRANSFORMED",
            Self::UntransformBlocked => "ACTIVATION_UNTRANSFORM_BLOCKED",
            Self::SpawnBlocked => "ACTIVATION_SPAWN_BLOCKED",
            Self::SpawnLimitReached { .. } => "ACTIVATION_SPAWN_LIMIT",
            Self::ChainTooDeep(_) => "ACTIVATION_CHAIN_TOO_DEEP",
        }
    }
}
