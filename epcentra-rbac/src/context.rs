//! Context resolution for team- and ownership-scoped decisions.
//!
//! The decision function consumes already-resolved facts. This module is
//! the seam through which the request-handling layer supplies them: a
//! [`ContextResolver`] loads the acting membership and the target
//! instance's attributes (typically from storage, which is why the trait
//! is async), and [`ResourceFacts`] carries what was found. A missing
//! membership or missing facts is not an error — it is insufficient
//! evidence, and insufficient evidence denies.

use crate::error::RbacError;
use async_trait::async_trait;
use epcentra_core::Actor;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Resolved attributes of a target resource instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceFacts {
    /// Teams associated with the instance (a project's team, a task's
    /// project team).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_ids: Option<HashSet<String>>,
    /// Creator of the instance (a task's `created_by`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

impl ResourceFacts {
    /// Facts with no team or ownership information.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the instance's team associations.
    pub fn with_teams<I, S>(mut self, team_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let teams = self.team_ids.get_or_insert_with(HashSet::new);
        teams.extend(team_ids.into_iter().map(Into::into));
        self
    }

    /// Attach the instance's creator.
    pub fn with_owner(mut self, owner_id: &str) -> Self {
        self.owner_id = Some(owner_id.to_string());
        self
    }
}

/// Loads membership and resource attributes for authorization.
///
/// Implementations usually query the membership and resource stores.
/// Failures of that storage surface as [`RbacError::ContextResolution`];
/// an absent record is `Ok(None)` / empty facts and folds into a denial
/// downstream.
#[async_trait]
pub trait ContextResolver: Send + Sync {
    /// Load the acting user's membership within the organization.
    async fn resolve_actor(
        &self,
        org_id: &str,
        user_id: &str,
    ) -> Result<Option<Actor>, RbacError>;

    /// Load the authorization-relevant attributes of a resource instance.
    async fn resolve_facts(
        &self,
        resource: &str,
        resource_id: &str,
    ) -> Result<ResourceFacts, RbacError>;
}

/// Map-backed resolver for tests, demos, and fixtures.
#[derive(Debug, Default)]
pub struct InMemoryResolver {
    actors: HashMap<(String, String), Actor>,
    facts: HashMap<(String, String), ResourceFacts>,
}

impl InMemoryResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a membership.
    pub fn insert_actor(&mut self, org_id: &str, actor: Actor) {
        self.actors
            .insert((org_id.to_string(), actor.user_id.clone()), actor);
    }

    /// Register facts for a resource instance.
    pub fn insert_facts(&mut self, resource: &str, resource_id: &str, facts: ResourceFacts) {
        self.facts
            .insert((resource.to_string(), resource_id.to_string()), facts);
    }
}

#[async_trait]
impl ContextResolver for InMemoryResolver {
    async fn resolve_actor(
        &self,
        org_id: &str,
        user_id: &str,
    ) -> Result<Option<Actor>, RbacError> {
        Ok(self
            .actors
            .get(&(org_id.to_string(), user_id.to_string()))
            .cloned())
    }

    async fn resolve_facts(
        &self,
        resource: &str,
        resource_id: &str,
    ) -> Result<ResourceFacts, RbacError> {
        Ok(self
            .facts
            .get(&(resource.to_string(), resource_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_records_resolve_to_nothing() {
        let resolver = InMemoryResolver::new();
        let actor = resolver.resolve_actor("org-1", "u-1").await.unwrap();
        assert!(actor.is_none());

        let facts = resolver.resolve_facts("task", "task-1").await.unwrap();
        assert!(facts.team_ids.is_none());
        assert!(facts.owner_id.is_none());
    }

    #[tokio::test]
    async fn registered_records_resolve() {
        let mut resolver = InMemoryResolver::new();
        resolver.insert_actor("org-1", Actor::new("u-1", "member").with_teams(["t-1"]));
        resolver.insert_facts(
            "task",
            "task-9",
            ResourceFacts::new().with_teams(["t-1"]).with_owner("u-2"),
        );

        let actor = resolver
            .resolve_actor("org-1", "u-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(actor.role, "member");

        let facts = resolver.resolve_facts("task", "task-9").await.unwrap();
        assert_eq!(facts.owner_id.as_deref(), Some("u-2"));
    }
}
