//! The authorization checkpoint called by the request-handling layer.

use crate::audit::{AuditEvent, AuditLog};
use crate::context::{ContextResolver, ResourceFacts};
use crate::error::RbacError;
use crate::policy::PolicyTable;
use crate::query::PermissionQuery;
use epcentra_core::Actor;
use tracing::{debug, info, warn};

/// Evaluates permission checks against a fixed policy table, with
/// optional audit logging and context resolution.
///
/// One enforcer is built at process start and shared by every
/// checkpoint; [`check`](Enforcer::check) borrows immutably and is safe
/// for concurrent use.
pub struct Enforcer {
    table: PolicyTable,
    resolver: Option<Box<dyn ContextResolver>>,
    audit_enabled: bool,
    audit_log: AuditLog,
}

impl Enforcer {
    /// Create an enforcer builder.
    pub fn builder() -> EnforcerBuilder {
        EnforcerBuilder::new()
    }

    /// The policy table decisions are evaluated against.
    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    /// Decide whether `actor` may perform `action` on `resource`, given
    /// the resolved `facts` about the target instance.
    ///
    /// A membership that is not active contributes no permissions,
    /// whatever its role says.
    pub fn check(&self, actor: &Actor, resource: &str, action: &str, facts: &ResourceFacts) -> bool {
        let allowed = actor.is_active() && {
            let query = PermissionQuery::for_actor(actor, resource, action).with_facts(facts);
            self.table.has_permission(&query)
        };

        if self.audit_enabled {
            if allowed {
                info!(
                    subject = %actor.user_id,
                    role = %actor.role,
                    resource = %resource,
                    action = %action,
                    result = "granted",
                    "permission check"
                );
            } else {
                warn!(
                    subject = %actor.user_id,
                    role = %actor.role,
                    resource = %resource,
                    action = %action,
                    result = "denied",
                    "permission check"
                );
            }
            self.audit_log.record(AuditEvent::record(
                &actor.user_id,
                &actor.role,
                resource,
                action,
                allowed,
            ));
        }

        allowed
    }

    /// Resolve the acting membership and resource facts through the
    /// configured [`ContextResolver`], then decide.
    ///
    /// Storage failures propagate as errors; an unknown membership is
    /// insufficient evidence and denies.
    pub async fn authorize(
        &self,
        org_id: &str,
        user_id: &str,
        resource: &str,
        action: &str,
        resource_id: &str,
    ) -> Result<bool, RbacError> {
        let resolver = self.resolver.as_ref().ok_or_else(|| {
            RbacError::Configuration("no context resolver configured".to_string())
        })?;

        let Some(actor) = resolver.resolve_actor(org_id, user_id).await? else {
            debug!(
                subject = %user_id,
                org = %org_id,
                "no membership found, denying"
            );
            if self.audit_enabled {
                self.audit_log
                    .record(AuditEvent::record(user_id, "", resource, action, false));
            }
            return Ok(false);
        };

        let facts = resolver.resolve_facts(resource, resource_id).await?;
        Ok(self.check(&actor, resource, action, &facts))
    }

    /// Remove and return the audit events recorded so far.
    pub fn drain_audit(&self) -> Vec<AuditEvent> {
        self.audit_log.drain()
    }
}

/// Builder for [`Enforcer`].
pub struct EnforcerBuilder {
    table: Option<PolicyTable>,
    resolver: Option<Box<dyn ContextResolver>>,
    audit_enabled: bool,
}

impl EnforcerBuilder {
    /// Start with defaults: system table, no resolver, audit off.
    pub fn new() -> Self {
        Self {
            table: None,
            resolver: None,
            audit_enabled: false,
        }
    }

    /// Use the canonical system role table.
    pub fn with_system_roles(mut self) -> Self {
        self.table = Some(PolicyTable::system());
        self
    }

    /// Use a custom policy table.
    pub fn with_table(mut self, table: PolicyTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Enable or disable audit logging.
    pub fn with_audit_logging(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    /// Attach a context resolver for [`Enforcer::authorize`].
    pub fn with_context_resolver<R>(mut self, resolver: R) -> Self
    where
        R: ContextResolver + 'static,
    {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Build the enforcer. Falls back to the system table when none was
    /// set.
    pub fn build(self) -> Enforcer {
        Enforcer {
            table: self.table.unwrap_or_else(PolicyTable::system),
            resolver: self.resolver,
            audit_enabled: self.audit_enabled,
            audit_log: AuditLog::new(),
        }
    }
}

impl Default for EnforcerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
