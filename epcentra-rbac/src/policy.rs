//! Role policy tables and the permission decision function.

use crate::error::RbacError;
use crate::grant::{Grant, Scope};
use crate::query::PermissionQuery;
use epcentra_core::{Actions, Resources, Roles};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A named role and its ordered list of grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePolicy {
    /// Role name, matched exactly against query roles.
    pub name: String,
    /// Grants held by the role, in declaration order.
    pub grants: Vec<Grant>,
}

/// Mapping from role name to permission grants.
///
/// The table is immutable once built: the canonical system table is
/// constructed once at process start, custom tables come out of
/// [`PolicyTableBuilder`] or a JSON file and are treated the same way.
/// Evaluation borrows the table immutably, so a single instance is safe
/// to share across any number of concurrent callers.
///
/// A role may hold several grants for the same resource with different
/// scopes or action sets; evaluation considers all of them, not just the
/// first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTable {
    roles: Vec<RolePolicy>,
}

impl PolicyTable {
    /// The canonical policy for the five system roles.
    ///
    /// Mirror of the frontend's role table; keep the two in sync.
    pub fn system() -> Self {
        use Scope::{All, Own, Team};

        let owner = RolePolicy {
            name: Roles::OWNER.to_string(),
            grants: vec![
                Grant::new(
                    Resources::ORGANIZATION,
                    &[
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                        Actions::MANAGE,
                    ],
                ),
                Grant::scoped(
                    Resources::PROJECT,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                        Actions::MANAGE,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::TASK,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                        Actions::ASSIGN,
                        Actions::COMMENT,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::MILESTONE,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::TEAM,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                        Actions::MANAGE,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::USER,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                        Actions::MANAGE,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::WORKFLOW,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                        Actions::MANAGE,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::STATUS,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::PRIORITY,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::LABEL,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                    ],
                    All,
                ),
            ],
        };

        let admin = RolePolicy {
            name: Roles::ADMIN.to_string(),
            grants: vec![
                Grant::new(Resources::ORGANIZATION, &[Actions::READ, Actions::UPDATE]),
                Grant::scoped(
                    Resources::PROJECT,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                        Actions::MANAGE,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::TASK,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                        Actions::ASSIGN,
                        Actions::COMMENT,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::MILESTONE,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::TEAM,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                        Actions::MANAGE,
                    ],
                    All,
                ),
                Grant::scoped(
                    Resources::USER,
                    &[Actions::READ, Actions::UPDATE, Actions::MANAGE],
                    All,
                ),
                Grant::scoped(
                    Resources::WORKFLOW,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                    ],
                    All,
                ),
            ],
        };

        let manager = RolePolicy {
            name: Roles::MANAGER.to_string(),
            grants: vec![
                Grant::scoped(
                    Resources::PROJECT,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::MANAGE,
                    ],
                    Team,
                ),
                Grant::scoped(
                    Resources::TASK,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                        Actions::ASSIGN,
                        Actions::COMMENT,
                    ],
                    Team,
                ),
                Grant::scoped(
                    Resources::MILESTONE,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::DELETE,
                    ],
                    Team,
                ),
                Grant::scoped(Resources::TEAM, &[Actions::READ, Actions::UPDATE], Team),
                Grant::scoped(Resources::USER, &[Actions::READ], All),
            ],
        };

        let member = RolePolicy {
            name: Roles::MEMBER.to_string(),
            grants: vec![
                Grant::scoped(Resources::PROJECT, &[Actions::READ], Team),
                Grant::scoped(
                    Resources::TASK,
                    &[
                        Actions::CREATE,
                        Actions::READ,
                        Actions::UPDATE,
                        Actions::COMMENT,
                    ],
                    Team,
                ),
                Grant::scoped(Resources::TASK, &[Actions::UPDATE, Actions::DELETE], Own),
                Grant::scoped(Resources::MILESTONE, &[Actions::READ], Team),
                Grant::scoped(Resources::TEAM, &[Actions::READ], Team),
                Grant::scoped(Resources::USER, &[Actions::READ], All),
            ],
        };

        let guest = RolePolicy {
            name: Roles::GUEST.to_string(),
            grants: vec![
                Grant::scoped(Resources::PROJECT, &[Actions::READ], Team),
                Grant::scoped(Resources::TASK, &[Actions::READ, Actions::COMMENT], Team),
                Grant::scoped(Resources::TEAM, &[Actions::READ], Team),
                Grant::scoped(Resources::USER, &[Actions::READ], All),
            ],
        };

        Self {
            roles: vec![owner, admin, manager, member, guest],
        }
    }

    /// Start building a custom table.
    pub fn builder() -> PolicyTableBuilder {
        PolicyTableBuilder::new()
    }

    /// Grants held by `role`, in declaration order.
    ///
    /// Unknown roles (including the empty string and case mismatches)
    /// yield an empty slice, never an error: a role outside the table is
    /// a valid "no permissions" state.
    pub fn grants_for(&self, role: &str) -> &[Grant] {
        self.roles
            .iter()
            .find(|r| r.name == role)
            .map(|r| r.grants.as_slice())
            .unwrap_or(&[])
    }

    /// Role names in declaration order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|r| r.name.as_str())
    }

    /// Evaluate a permission query against this table.
    ///
    /// Pure and deterministic: no I/O, no side effects, no interior
    /// state. All grants matching the query's resource are considered
    /// and OR-ed together; declaration order decides only which grant
    /// short-circuits, never the final boolean.
    pub fn has_permission(&self, query: &PermissionQuery) -> bool {
        for grant in self.grants_for(&query.role) {
            if !grant.applies_to(&query.resource) {
                continue;
            }
            if !grant.allows(&query.action) {
                continue;
            }
            match grant.scope {
                None | Some(Scope::All) => return true,
                Some(Scope::Team) => {
                    if let Some(context) = &query.context_team_ids
                        && query
                            .member_team_ids
                            .intersection(context)
                            .next()
                            .is_some()
                    {
                        return true;
                    }
                }
                Some(Scope::Own) => {
                    if let (Some(owner), Some(actor)) =
                        (&query.resource_owner_id, &query.acting_user_id)
                        && owner == actor
                    {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Check the table for structural problems: duplicate role names,
    /// grants with an empty resource, grants with no actions, empty
    /// action strings.
    pub fn validate(&self) -> Result<(), RbacError> {
        let mut seen = HashSet::new();
        for role in &self.roles {
            if !seen.insert(role.name.as_str()) {
                return Err(RbacError::DuplicateRole(role.name.clone()));
            }
            for grant in &role.grants {
                if grant.resource.is_empty() {
                    return Err(RbacError::InvalidGrant {
                        role: role.name.clone(),
                        reason: "empty resource".to_string(),
                    });
                }
                if grant.actions.is_empty() {
                    return Err(RbacError::InvalidGrant {
                        role: role.name.clone(),
                        reason: format!("no actions for resource '{}'", grant.resource),
                    });
                }
                if grant.actions.iter().any(|a| a.is_empty()) {
                    return Err(RbacError::InvalidGrant {
                        role: role.name.clone(),
                        reason: format!("empty action for resource '{}'", grant.resource),
                    });
                }
            }
        }
        Ok(())
    }

    /// Load and validate a table from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RbacError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RbacError::Configuration(format!(
                "failed to read policy file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let table: PolicyTable = serde_json::from_str(&content)?;
        table.validate()?;
        Ok(table)
    }

    /// Write the table to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), RbacError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content).map_err(|e| {
            RbacError::Configuration(format!(
                "failed to write policy file {}: {e}",
                path.as_ref().display()
            ))
        })
    }
}

/// Builder for custom policy tables.
pub struct PolicyTableBuilder {
    roles: Vec<RolePolicy>,
}

impl PolicyTableBuilder {
    /// Start with an empty table.
    pub fn new() -> Self {
        Self { roles: Vec::new() }
    }

    /// Seed the builder with the five system roles.
    pub fn with_system_roles(mut self) -> Self {
        self.roles.extend(PolicyTable::system().roles);
        self
    }

    /// Add a role with its grants.
    pub fn with_role<I>(mut self, name: &str, grants: I) -> Self
    where
        I: IntoIterator<Item = Grant>,
    {
        self.roles.push(RolePolicy {
            name: name.to_string(),
            grants: grants.into_iter().collect(),
        });
        self
    }

    /// Validate and produce the table.
    pub fn build(self) -> Result<PolicyTable, RbacError> {
        let table = PolicyTable { roles: self.roles };
        table.validate()?;
        Ok(table)
    }
}

impl Default for PolicyTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Positional form of the decision call, mirroring the shape the
/// request-handling layer historically used: role and member teams from
/// the caller's membership record, creator/user ids and resource teams
/// from the target instance.
#[allow(clippy::too_many_arguments)]
pub fn has_permission(
    table: &PolicyTable,
    role: &str,
    member_team_ids: &HashSet<String>,
    resource: &str,
    action: &str,
    created_by: Option<&str>,
    user_id: Option<&str>,
    context_team_ids: Option<&HashSet<String>>,
) -> bool {
    let query = PermissionQuery {
        role: role.to_string(),
        resource: resource.to_string(),
        action: action.to_string(),
        member_team_ids: member_team_ids.clone(),
        context_team_ids: context_team_ids.cloned(),
        resource_owner_id: created_by.map(str::to_string),
        acting_user_id: user_id.map(str::to_string),
    };
    table.has_permission(&query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_table_has_five_roles() {
        let table = PolicyTable::system();
        let roles: Vec<&str> = table.roles().collect();
        assert_eq!(roles, ["owner", "admin", "manager", "member", "guest"]);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn unknown_role_has_no_grants() {
        let table = PolicyTable::system();
        assert!(table.grants_for("superuser").is_empty());
        assert!(table.grants_for("").is_empty());
        // No case folding.
        assert!(table.grants_for("Owner").is_empty());
    }

    #[test]
    fn member_holds_two_task_grants() {
        let table = PolicyTable::system();
        let task_grants: Vec<_> = table
            .grants_for("member")
            .iter()
            .filter(|g| g.applies_to("task"))
            .collect();
        assert_eq!(task_grants.len(), 2);
        assert_eq!(task_grants[0].scope, Some(Scope::Team));
        assert_eq!(task_grants[1].scope, Some(Scope::Own));
    }

    #[test]
    fn admin_cannot_delete_organization() {
        let table = PolicyTable::system();
        let query = PermissionQuery::new("admin", "organization", "delete");
        assert!(!table.has_permission(&query));
        assert!(table.has_permission(&PermissionQuery::new("owner", "organization", "delete")));
    }

    #[test]
    fn builder_matches_system_table() {
        let built = PolicyTable::builder().with_system_roles().build().unwrap();
        assert_eq!(built, PolicyTable::system());
    }

    #[test]
    fn builder_rejects_duplicate_roles() {
        let result = PolicyTable::builder()
            .with_role("auditor", [Grant::new("task", &["read"])])
            .with_role("auditor", [Grant::new("project", &["read"])])
            .build();
        assert!(matches!(result, Err(RbacError::DuplicateRole(name)) if name == "auditor"));
    }

    #[test]
    fn builder_rejects_empty_action_set() {
        let result = PolicyTable::builder()
            .with_role("auditor", [Grant::new("task", &[])])
            .build();
        assert!(matches!(result, Err(RbacError::InvalidGrant { .. })));
    }

    #[test]
    fn table_round_trips_through_json() {
        let table = PolicyTable::system();
        let json = serde_json::to_string(&table).unwrap();
        let parsed: PolicyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");

        let table = PolicyTable::system();
        table.to_file(&path).unwrap();
        let loaded = PolicyTable::from_file(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn from_file_rejects_invalid_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        std::fs::write(
            &path,
            r#"{"roles":[{"name":"x","grants":[{"resource":"","actions":["read"]}]}]}"#,
        )
        .unwrap();
        assert!(matches!(
            PolicyTable::from_file(&path),
            Err(RbacError::InvalidGrant { .. })
        ));
    }

    #[test]
    fn positional_form_matches_query_form() {
        let table = PolicyTable::system();
        let member_teams: HashSet<String> = ["t-1".to_string()].into();
        let context_teams: HashSet<String> = ["t-1".to_string(), "t-2".to_string()].into();

        assert!(has_permission(
            &table,
            "manager",
            &member_teams,
            "project",
            "manage",
            None,
            None,
            Some(&context_teams),
        ));
        assert!(!has_permission(
            &table,
            "manager",
            &member_teams,
            "project",
            "delete",
            None,
            None,
            Some(&context_teams),
        ));
    }
}
