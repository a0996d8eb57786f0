//! Error types for epcentra RBAC.

use thiserror::Error;

/// Errors that can occur while building, validating, or loading policy
/// tables, or while resolving authorization context.
///
/// Permission decisions never produce these: evaluation is total and a
/// denied request is an ordinary `false`, not an error.
#[derive(Debug, Error)]
pub enum RbacError {
    /// A grant failed validation (empty resource, empty action set, ...).
    #[error("invalid grant for role '{role}': {reason}")]
    InvalidGrant {
        /// Role the offending grant belongs to.
        role: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The same role name appeared more than once in a table definition.
    #[error("duplicate role name: {0}")]
    DuplicateRole(String),

    /// Configuration problem (unreadable file, missing resolver, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The context resolver reported a storage failure.
    #[error("context resolution failed: {0}")]
    ContextResolution(String),
}
