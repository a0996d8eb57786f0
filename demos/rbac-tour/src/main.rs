//! Walkthrough of the epcentra role policy.
//!
//! Runs a handful of permission checks against the system role table,
//! then drives the enforcer with an in-memory context resolver the way
//! a request handler would.

use anyhow::Result;
use epcentra_rbac::prelude::*;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let table = PolicyTable::system();

    println!("Epcentra role policy tour");
    println!("=========================");

    println!("\nSystem roles:");
    for role in table.roles() {
        let grants = table.grants_for(role);
        println!("  {role} ({} grants)", grants.len());
        for grant in grants {
            println!("    {grant}");
        }
    }

    println!("\nDirect decision checks:");
    let cases = [
        (
            "owner deletes a task, no context",
            PermissionQuery::new("owner", "task", "delete"),
        ),
        (
            "manager manages a shared-team project",
            PermissionQuery::new("manager", "project", "manage")
                .with_member_teams(["t-core"])
                .with_context_teams(["t-core", "t-design"]),
        ),
        (
            "member deletes their own task",
            PermissionQuery::new("member", "task", "delete")
                .with_owner("u-42")
                .with_acting_user("u-42"),
        ),
        (
            "member deletes someone else's task",
            PermissionQuery::new("member", "task", "delete")
                .with_owner("u-1")
                .with_acting_user("u-42"),
        ),
        (
            "guest deletes a user",
            PermissionQuery::new("guest", "user", "delete"),
        ),
    ];
    for (label, query) in cases {
        let verdict = if table.has_permission(&query) {
            "allowed"
        } else {
            "denied"
        };
        println!("  [{verdict}] {label}");
    }

    println!("\nEnforcer with resolved context:");
    let mut resolver = InMemoryResolver::new();
    resolver.insert_actor("org-1", Actor::new("u-42", "member").with_teams(["t-core"]));
    resolver.insert_facts(
        "task",
        "task-7",
        ResourceFacts::new().with_teams(["t-core"]).with_owner("u-42"),
    );

    let enforcer = Enforcer::builder()
        .with_system_roles()
        .with_context_resolver(resolver)
        .with_audit_logging(true)
        .build();

    for action in ["read", "update", "delete", "assign"] {
        let allowed = enforcer
            .authorize("org-1", "u-42", "task", action, "task-7")
            .await?;
        println!("  u-42 {action} task-7: {allowed}");
    }

    println!("\nAudit trail:");
    for event in enforcer.drain_audit() {
        println!("  {}", serde_json::to_string(&event)?);
    }

    Ok(())
}
