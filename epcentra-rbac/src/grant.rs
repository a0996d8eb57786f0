//! Permission grants and their scopes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Contextual restriction attached to a grant.
///
/// Exactly three scope behaviors exist, so this is a closed enum rather
/// than an open string. A grant with no scope at all evaluates like
/// [`Scope::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Unrestricted within the organization.
    All,
    /// Caller and target resource must share at least one team.
    Team,
    /// Caller must be the creator of the target resource.
    Own,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all"),
            Scope::Team => write!(f, "team"),
            Scope::Own => write!(f, "own"),
        }
    }
}

/// A declarative unit of policy: a role may perform `actions` on
/// `resource`, optionally restricted by `scope`.
///
/// Grants are static configuration, immutable once constructed. The
/// action set is unordered and de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Identifier of the protected entity kind ("task", "project", ...).
    pub resource: String,
    /// Action verbs granted on that resource.
    pub actions: HashSet<String>,
    /// Optional scope qualifier; absent behaves like [`Scope::All`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl Grant {
    /// Create an unscoped grant.
    pub fn new(resource: &str, actions: &[&str]) -> Self {
        Self {
            resource: resource.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            scope: None,
        }
    }

    /// Create a grant with an explicit scope.
    pub fn scoped(resource: &str, actions: &[&str], scope: Scope) -> Self {
        Self {
            scope: Some(scope),
            ..Self::new(resource, actions)
        }
    }

    /// Whether this grant covers the given resource kind.
    pub fn applies_to(&self, resource: &str) -> bool {
        self.resource == resource
    }

    /// Whether this grant includes the given action verb.
    pub fn allows(&self, action: &str) -> bool {
        self.actions.contains(action)
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<&str> = self.actions.iter().map(String::as_str).collect();
        actions.sort_unstable();
        match self.scope {
            Some(scope) => write!(f, "{}:{} ({})", self.resource, actions.join(","), scope),
            None => write!(f, "{}:{}", self.resource, actions.join(",")),
        }
    }
}
