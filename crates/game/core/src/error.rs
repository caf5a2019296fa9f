//! Common error infrastructure for ability-core.
//!
//! Domain errors live next to the code that raises them: catalog lookups in
//! [`crate::catalog`], load-time diagnostics in [`crate::catalog::ConfigError`],
//! and activation rejections in [`crate::activation::ActivationError`]. They all
//! implement [`GameError`] so callers can classify failures uniformly.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (caster regenerates
///   mana, the spawn tile clears up)
/// - **Validation**: the request or content is malformed and will keep failing
/// - **Internal**: an invariant of the engine was violated
/// - **Fatal**: the engine cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Precondition not met right now; retrying later may succeed.
    Recoverable,

    /// Invalid input; should not retry without changes.
    Validation,

    /// Unexpected state inconsistency that should be investigated.
    Internal,

    /// Unrecoverable.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all ability-core errors.
///
/// Error enums derive `thiserror::Error` for their display text and
/// implement this trait for classification.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant, stable enough for
    /// assertions and log filtering.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
