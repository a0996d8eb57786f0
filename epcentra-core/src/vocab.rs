//! Identifier constants for the entity kinds, action verbs, and system
//! roles used by epcentra authorization checkpoints.

/// Resource kind identifiers.
///
/// A resource names a *kind* of protected entity (every task, not one
/// specific task). Instance-level restrictions are expressed through grant
/// scopes, not through the resource identifier.
pub struct Resources;

impl Resources {
    /// The organization itself (settings, membership administration).
    pub const ORGANIZATION: &'static str = "organization";
    /// Projects within an organization.
    pub const PROJECT: &'static str = "project";
    /// Tasks, including subtasks and task comments.
    pub const TASK: &'static str = "task";
    /// Roadmap milestones and phases.
    pub const MILESTONE: &'static str = "milestone";
    /// Teams within an organization.
    pub const TEAM: &'static str = "team";
    /// User accounts and profiles.
    pub const USER: &'static str = "user";
    /// Workflow definitions.
    pub const WORKFLOW: &'static str = "workflow";
    /// Task status definitions.
    pub const STATUS: &'static str = "status";
    /// Task priority definitions.
    pub const PRIORITY: &'static str = "priority";
    /// Labels attachable to tasks and projects.
    pub const LABEL: &'static str = "label";
}

/// Action verb identifiers.
pub struct Actions;

impl Actions {
    /// Create a new entity of the resource kind.
    pub const CREATE: &'static str = "create";
    /// Read an entity or list entities.
    pub const READ: &'static str = "read";
    /// Modify an existing entity.
    pub const UPDATE: &'static str = "update";
    /// Remove an entity.
    pub const DELETE: &'static str = "delete";
    /// Assign an entity (a task) to users.
    pub const ASSIGN: &'static str = "assign";
    /// Comment on an entity.
    pub const COMMENT: &'static str = "comment";
    /// Administrative control over the resource kind.
    pub const MANAGE: &'static str = "manage";
}

/// System role names.
///
/// Role names are matched exactly, with no case folding. A role outside
/// this set is valid input to every decision — it just holds no grants.
pub struct Roles;

impl Roles {
    /// Organization owner, full control.
    pub const OWNER: &'static str = "owner";
    /// Administrator, full control minus organization deletion.
    pub const ADMIN: &'static str = "admin";
    /// Team manager, team-scoped control.
    pub const MANAGER: &'static str = "manager";
    /// Regular member, team-scoped collaboration.
    pub const MEMBER: &'static str = "member";
    /// Read-mostly guest access.
    pub const GUEST: &'static str = "guest";

    /// All system roles, from most to least privileged.
    pub const ALL: [&'static str; 5] = [
        Self::OWNER,
        Self::ADMIN,
        Self::MANAGER,
        Self::MEMBER,
        Self::GUEST,
    ];
}
