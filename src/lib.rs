//! # Epcentra
//!
//! Authorization core for the epcentra project management backend.
//!
//! This facade crate re-exports the member crates:
//!
//! - [`epcentra_core`] — domain vocabulary (resource kinds, actions,
//!   system roles) and the [`Actor`](epcentra_core::Actor) identity type.
//! - [`epcentra_rbac`] — permission grants, the role policy table, the
//!   decision function, and the [`Enforcer`](epcentra_rbac::Enforcer)
//!   checkpoint.
//!
//! # Example
//!
//! ```rust
//! use epcentra::rbac::prelude::*;
//!
//! let table = PolicyTable::system();
//! let query = PermissionQuery::new("member", "task", "update")
//!     .with_member_teams(["t-core"])
//!     .with_context_teams(["t-core"]);
//! assert!(table.has_permission(&query));
//! ```

pub use epcentra_core as core;
pub use epcentra_rbac as rbac;

pub use epcentra_core::{Actions, Actor, MembershipStatus, Resources, Roles};
pub use epcentra_rbac::{Enforcer, Grant, PermissionQuery, PolicyTable, RbacError, Scope};
