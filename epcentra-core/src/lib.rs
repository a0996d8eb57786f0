//! # Epcentra Core
//!
//! Domain vocabulary and caller identity types shared across the epcentra
//! authorization crates.
//!
//! This crate defines the identifiers the platform protects (resource kinds,
//! action verbs, system role names) and the [`Actor`] type — an organization
//! membership projected down to exactly what an authorization decision needs:
//! who is acting, under which role, on which teams, and whether the
//! membership is currently active.
//!
//! Resource kinds, actions, and roles are plain strings throughout. Matching
//! is exact and case-sensitive: an unknown or misspelled identifier never
//! errors, it simply grants nothing. The constants here exist so callers
//! don't scatter string literals across every checkpoint.

#![warn(missing_docs)]

pub mod actor;
pub mod error;
pub mod vocab;

pub use actor::{Actor, MembershipStatus};
pub use error::{Error, Result};
pub use vocab::{Actions, Resources, Roles};
