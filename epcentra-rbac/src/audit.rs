//! Audit records for permission decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

/// One recorded permission decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event id.
    pub id: Uuid,
    /// When the decision was made.
    pub at: DateTime<Utc>,
    /// Acting user id.
    pub actor: String,
    /// Role the decision was evaluated under.
    pub role: String,
    /// Resource kind that was accessed.
    pub resource: String,
    /// Action that was attempted.
    pub action: String,
    /// Outcome of the decision.
    pub allowed: bool,
}

impl AuditEvent {
    /// Record a decision, stamping id and timestamp.
    pub fn record(actor: &str, role: &str, resource: &str, action: &str, allowed: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            at: Utc::now(),
            actor: actor.to_string(),
            role: role.to_string(),
            resource: resource.to_string(),
            action: action.to_string(),
            allowed,
        }
    }
}

/// In-process sink for audit events.
///
/// Interior mutability keeps recording compatible with the enforcer's
/// `&self` decision path. Lock poisoning is recovered rather than
/// propagated: an audit sink must never take the decision path down.
#[derive(Debug, Default)]
pub struct AuditLog {
    events: Mutex<Vec<AuditEvent>>,
}

impl AuditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn record(&self, event: AuditEvent) {
        self.lock().push(event);
    }

    /// Remove and return all recorded events.
    pub fn drain(&self) -> Vec<AuditEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the log holds no events.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AuditEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_accumulate_and_drain() {
        let log = AuditLog::new();
        assert!(log.is_empty());

        log.record(AuditEvent::record("u-1", "member", "task", "read", true));
        log.record(AuditEvent::record("u-2", "guest", "task", "delete", false));
        assert_eq!(log.len(), 2);

        let events = log.drain();
        assert_eq!(events.len(), 2);
        assert!(events[0].allowed);
        assert!(!events[1].allowed);
        assert!(log.is_empty());
    }

    #[test]
    fn event_serializes_outcome() {
        let event = AuditEvent::record("u-1", "guest", "user", "delete", false);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["allowed"], false);
        assert_eq!(json["role"], "guest");
        assert!(json["id"].is_string());
    }
}
