//! Role-based access control engine for the epcentra backend
//!
//! This crate holds the authorization core of the epcentra project
//! management platform: a declarative policy table mapping each system
//! role to its permission grants, and a pure decision function that
//! evaluates a permission query against those grants.
//!
//! # Model
//!
//! - **Grant**: a role may perform a set of actions on a resource kind,
//!   optionally restricted by a scope.
//! - **Scope**: `all` (unrestricted), `team` (caller and target share a
//!   team), `own` (caller created the target). A grant without a scope
//!   behaves like `all`.
//! - **Decision**: all grants for the query's resource are OR-ed
//!   together. Missing context never errors; it just fails the scoped
//!   grants that need it.
//!
//! The engine resolves nothing on its own. Team memberships and resource
//! ownership are facts the request-handling layer loads from storage and
//! passes in, either directly on a [`PermissionQuery`] or through the
//! [`ContextResolver`] seam consumed by [`Enforcer::authorize`].
//!
//! # Quick Start
//!
//! ```rust
//! use epcentra_rbac::prelude::*;
//!
//! let table = PolicyTable::system();
//!
//! // Owners act organization-wide, no context needed.
//! let query = PermissionQuery::new("owner", "task", "delete");
//! assert!(table.has_permission(&query));
//!
//! // Members reach tasks through a shared team...
//! let query = PermissionQuery::new("member", "task", "update")
//!     .with_member_teams(["t-frontend"])
//!     .with_context_teams(["t-frontend", "t-design"]);
//! assert!(table.has_permission(&query));
//!
//! // ...or through ownership of the task itself.
//! let query = PermissionQuery::new("member", "task", "delete")
//!     .with_owner("u-1")
//!     .with_acting_user("u-1");
//! assert!(table.has_permission(&query));
//! ```
//!
//! # Checkpoints
//!
//! ```rust
//! use epcentra_rbac::prelude::*;
//!
//! let enforcer = Enforcer::builder()
//!     .with_system_roles()
//!     .with_audit_logging(true)
//!     .build();
//!
//! let actor = Actor::new("u-1", "guest").with_teams(["t-1"]);
//! let facts = ResourceFacts::new().with_teams(["t-1"]);
//! assert!(enforcer.check(&actor, "task", "read", &facts));
//! assert!(!enforcer.check(&actor, "task", "delete", &facts));
//! ```

pub mod audit;
pub mod context;
pub mod enforcer;
pub mod error;
pub mod grant;
pub mod policy;
pub mod query;

pub mod prelude {
    //! Common imports for epcentra authorization checkpoints.

    pub use crate::audit::{AuditEvent, AuditLog};
    pub use crate::context::{ContextResolver, InMemoryResolver, ResourceFacts};
    pub use crate::enforcer::{Enforcer, EnforcerBuilder};
    pub use crate::error::RbacError;
    pub use crate::grant::{Grant, Scope};
    pub use crate::policy::{PolicyTable, PolicyTableBuilder, RolePolicy, has_permission};
    pub use crate::query::PermissionQuery;

    // Re-export the identity and vocabulary types checkpoints need.
    pub use epcentra_core::{Actions, Actor, MembershipStatus, Resources, Roles};

    /// Common Result type.
    pub type Result<T> = std::result::Result<T, RbacError>;
}

// Re-export major components at crate level
pub use enforcer::Enforcer;
pub use error::RbacError;
pub use grant::{Grant, Scope};
pub use policy::PolicyTable;
pub use query::PermissionQuery;
