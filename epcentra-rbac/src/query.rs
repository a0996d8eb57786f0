//! The permission query: everything one decision needs, supplied by the
//! caller.

use crate::context::ResourceFacts;
use epcentra_core::Actor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Inputs to a single permission decision.
///
/// The query carries already-resolved facts. The engine never looks up
/// team membership or resource ownership itself; the request-handling
/// layer loads those from storage and passes them in. Missing optional
/// context is not an error — it simply cannot satisfy `team` or `own`
/// scoped grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionQuery {
    /// The acting user's role name within the organization.
    pub role: String,
    /// The resource kind being accessed.
    pub resource: String,
    /// The action being attempted.
    pub action: String,
    /// Teams the acting user belongs to.
    #[serde(default)]
    pub member_team_ids: HashSet<String>,
    /// Teams associated with the target resource instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_team_ids: Option<HashSet<String>>,
    /// Creator of the target resource instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_owner_id: Option<String>,
    /// Identifier of the acting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acting_user_id: Option<String>,
}

impl PermissionQuery {
    /// Create a query with no team or ownership context.
    pub fn new(role: &str, resource: &str, action: &str) -> Self {
        Self {
            role: role.to_string(),
            resource: resource.to_string(),
            action: action.to_string(),
            member_team_ids: HashSet::new(),
            context_team_ids: None,
            resource_owner_id: None,
            acting_user_id: None,
        }
    }

    /// Create a query for an [`Actor`], carrying over role, team
    /// memberships, and user id.
    pub fn for_actor(actor: &Actor, resource: &str, action: &str) -> Self {
        Self {
            member_team_ids: actor.team_ids.clone(),
            acting_user_id: Some(actor.user_id.clone()),
            ..Self::new(&actor.role, resource, action)
        }
    }

    /// Set the acting user's team memberships.
    pub fn with_member_teams<I, S>(mut self, team_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.member_team_ids
            .extend(team_ids.into_iter().map(Into::into));
        self
    }

    /// Set the teams associated with the target resource instance.
    pub fn with_context_teams<I, S>(mut self, team_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let teams = self.context_team_ids.get_or_insert_with(HashSet::new);
        teams.extend(team_ids.into_iter().map(Into::into));
        self
    }

    /// Set the creator of the target resource instance.
    pub fn with_owner(mut self, owner_id: &str) -> Self {
        self.resource_owner_id = Some(owner_id.to_string());
        self
    }

    /// Set the acting user's id.
    pub fn with_acting_user(mut self, user_id: &str) -> Self {
        self.acting_user_id = Some(user_id.to_string());
        self
    }

    /// Fold resolved resource facts (instance teams, creator) into the
    /// query.
    pub fn with_facts(mut self, facts: &ResourceFacts) -> Self {
        if let Some(teams) = &facts.team_ids {
            self.context_team_ids = Some(teams.clone());
        }
        if let Some(owner) = &facts.owner_id {
            self.resource_owner_id = Some(owner.clone());
        }
        self
    }
}
