//! Caller identity as seen by authorization checkpoints.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Lifecycle state of an organization membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    /// Membership is live; the member's role contributes permissions.
    Active,
    /// Invitation sent but not yet accepted.
    Invited,
    /// Membership suspended by an administrator.
    Suspended,
}

impl std::str::FromStr for MembershipStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "active" => Ok(MembershipStatus::Active),
            "invited" => Ok(MembershipStatus::Invited),
            "suspended" => Ok(MembershipStatus::Suspended),
            _ => Err(Error::UnknownMembershipStatus(s.to_string())),
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipStatus::Active => write!(f, "active"),
            MembershipStatus::Invited => write!(f, "invited"),
            MembershipStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// An organization membership projected to what authorization needs.
///
/// The surrounding API layer loads the membership record (role, team
/// assignments, status) from storage and hands it to checkpoints as an
/// `Actor`. The type carries already-resolved facts; it performs no
/// lookups of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Identifier of the acting user.
    pub user_id: String,
    /// The member's role name within the organization.
    pub role: String,
    /// Identifiers of the teams the member belongs to.
    pub team_ids: HashSet<String>,
    /// Current membership status.
    pub status: MembershipStatus,
}

impl Actor {
    /// Create an active actor with no team assignments.
    pub fn new(user_id: &str, role: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            role: role.to_string(),
            team_ids: HashSet::new(),
            status: MembershipStatus::Active,
        }
    }

    /// Attach team memberships.
    pub fn with_teams<I, S>(mut self, team_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.team_ids.extend(team_ids.into_iter().map(Into::into));
        self
    }

    /// Override the membership status.
    pub fn with_status(mut self, status: MembershipStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether this membership currently contributes permissions.
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role, self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn actor_builders() {
        let actor = Actor::new("u-1", "member").with_teams(["t-1", "t-2"]);
        assert_eq!(actor.role, "member");
        assert!(actor.is_active());
        assert!(actor.team_ids.contains("t-1"));
        assert_eq!(actor.team_ids.len(), 2);
    }

    #[test]
    fn suspended_actor_is_not_active() {
        let actor = Actor::new("u-1", "owner").with_status(MembershipStatus::Suspended);
        assert!(!actor.is_active());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            MembershipStatus::Active,
            MembershipStatus::Invited,
            MembershipStatus::Suspended,
        ] {
            let parsed = MembershipStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
        assert!(MembershipStatus::from_str("banned").is_err());
    }

    #[test]
    fn actor_serializes_with_lowercase_status() {
        let actor = Actor::new("u-1", "guest");
        let json = serde_json::to_value(&actor).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["role"], "guest");
    }
}
