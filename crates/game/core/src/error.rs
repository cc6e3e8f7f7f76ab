//! Common error infrastructure for sight-core.
//!
//! Most of the crate is infallible: lookups return `Option`, the field of view
//! cannot fail, and duplicate coordinates are tolerated. The remaining fallible
//! operations (occupancy transitions, loading observers) return errors that
//! implement [`SightError`] so callers can classify them uniformly.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request may succeed later or with a different target.
    ///
    /// Examples: destination tile currently occupied
    Recoverable,

    /// Invalid input, should not be retried unchanged.
    ///
    /// Examples: unknown tile id, unknown observer id
    Validation,

    /// Unexpected state inconsistency; indicates a bug.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all sight-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait SightError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
