//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`DayWindowError`] via `#[from]` — no stringly-typed variants.

/// Top-level error enum for daywindow operations.
#[derive(Debug, thiserror::Error)]
pub enum DayWindowError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced schedule does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A device-control call could not be issued.
    #[error("device call failed")]
    Device(#[from] DeviceCallError),

    /// The options store failed to read or persist.
    #[error("storage error")]
    Storage(#[from] StorageError),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("schedule needs at least one target")]
    NoTargets,
    #[error("target {0:?} is not of the form `family.identifier`")]
    InvalidTarget(String),
    #[error("unknown option key {0:?}")]
    UnknownOptionKey(String),
    #[error("invalid value for option {key:?}")]
    InvalidOptionValue {
        /// The option key whose value failed to decode.
        key: &'static str,
    },
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Human-readable kind of the missing record (e.g. `"Schedule"`).
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

/// A device-control boundary call failed to enqueue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{domain}.{service}: {reason}")]
pub struct DeviceCallError {
    pub domain: String,
    pub service: String,
    pub reason: String,
}

/// Options-store failure reported by a repository implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct StorageError(pub String);
