//! Error types for epcentra-core.

use thiserror::Error;

/// Result type alias for epcentra-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building identity types from external input.
///
/// Authorization decisions themselves are total and never error; these
/// variants only surface while parsing membership records loaded from
/// storage or transport.
#[derive(Debug, Error)]
pub enum Error {
    /// A membership record carried a status string outside the known set.
    #[error("unknown membership status: {0}")]
    UnknownMembershipStatus(String),
}
