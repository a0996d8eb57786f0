//! End-to-end checks of the system role policy.

use epcentra_rbac::prelude::*;
use std::collections::HashSet;

fn teams(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn roles_outside_the_system_set_grant_nothing() {
    let table = PolicyTable::system();
    for role in ["superuser", "root", "OWNER", "Member", "", "owner "] {
        for resource in ["organization", "project", "task", "team", "user"] {
            for action in ["create", "read", "update", "delete", "manage"] {
                let query = PermissionQuery::new(role, resource, action);
                assert!(
                    !table.has_permission(&query),
                    "{role} should not {action} {resource}"
                );
            }
        }
    }
}

#[test]
fn owner_needs_no_context_for_all_scoped_grants() {
    let table = PolicyTable::system();
    let query = PermissionQuery::new("owner", "task", "delete");
    assert!(table.has_permission(&query));
}

#[test]
fn own_grant_authorizes_when_team_context_is_empty() {
    let table = PolicyTable::system();
    // The member's team-scoped task grant fails on empty team sets, but
    // the own-scoped grant still carries the update.
    let query = PermissionQuery::new("member", "task", "update")
        .with_owner("u1")
        .with_acting_user("u1");
    assert!(table.has_permission(&query));
}

#[test]
fn differing_owner_and_actor_deny_when_teams_are_empty() {
    let table = PolicyTable::system();
    let query = PermissionQuery::new("member", "task", "update")
        .with_owner("u1")
        .with_acting_user("u2");
    assert!(!table.has_permission(&query));
}

#[test]
fn team_scope_needs_a_non_empty_intersection() {
    let table = PolicyTable::system();

    let query = PermissionQuery::new("manager", "project", "manage")
        .with_member_teams(["t1"])
        .with_context_teams(["t1", "t2"]);
    assert!(table.has_permission(&query));

    let query = PermissionQuery::new("manager", "project", "manage")
        .with_member_teams(["t3"])
        .with_context_teams(["t1", "t2"]);
    assert!(!table.has_permission(&query));

    // One side empty or absent is an empty intersection.
    let query = PermissionQuery::new("manager", "project", "manage").with_context_teams(["t1"]);
    assert!(!table.has_permission(&query));
    let query = PermissionQuery::new("manager", "project", "manage").with_member_teams(["t1"]);
    assert!(!table.has_permission(&query));
    let query = PermissionQuery::new("manager", "project", "manage")
        .with_member_teams(["t1"])
        .with_context_teams(Vec::<String>::new());
    assert!(!table.has_permission(&query));
}

#[test]
fn guest_never_escalates_past_read_and_comment() {
    let table = PolicyTable::system();
    let query = PermissionQuery::new("guest", "user", "delete")
        .with_member_teams(["t1"])
        .with_context_teams(["t1"])
        .with_owner("u1")
        .with_acting_user("u1");
    assert!(!table.has_permission(&query));

    assert!(table.has_permission(&PermissionQuery::new("guest", "user", "read")));
}

#[test]
fn unknown_resource_or_action_produces_no_match() {
    let table = PolicyTable::system();
    assert!(!table.has_permission(&PermissionQuery::new("owner", "invoice", "read")));
    assert!(!table.has_permission(&PermissionQuery::new("owner", "task", "archive")));
    assert!(!table.has_permission(&PermissionQuery::new("owner", "task", "")));
}

#[test]
fn identical_queries_always_agree() {
    let table = PolicyTable::system();
    let query = PermissionQuery::new("member", "task", "update")
        .with_member_teams(["t1"])
        .with_context_teams(["t1"]);
    let first = table.has_permission(&query);
    for _ in 0..100 {
        assert_eq!(table.has_permission(&query), first);
    }
}

#[test]
fn widening_team_sets_never_revokes() {
    let table = PolicyTable::system();

    let narrow = PermissionQuery::new("member", "milestone", "read")
        .with_member_teams(["t1"])
        .with_context_teams(["t1"]);
    assert!(table.has_permission(&narrow));

    let wider = narrow
        .clone()
        .with_member_teams(["t2", "t3"])
        .with_context_teams(["t4", "t5"]);
    assert!(wider.member_team_ids.is_superset(&narrow.member_team_ids));
    assert!(table.has_permission(&wider));
}

#[test]
fn positional_call_shape_agrees_with_query_shape() {
    let table = PolicyTable::system();
    let member_teams = teams(&["t1"]);
    let context_teams = teams(&["t1", "t2"]);

    let positional = has_permission(
        &table,
        "member",
        &member_teams,
        "task",
        "comment",
        None,
        None,
        Some(&context_teams),
    );
    let query = PermissionQuery::new("member", "task", "comment")
        .with_member_teams(["t1"])
        .with_context_teams(["t1", "t2"]);
    assert_eq!(positional, table.has_permission(&query));
    assert!(positional);
}

#[test]
fn loaded_table_decides_like_the_built_in_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roles.json");

    let table = PolicyTable::system();
    table.to_file(&path).unwrap();
    let loaded = PolicyTable::from_file(&path).unwrap();

    let probes = [
        ("owner", "organization", "delete"),
        ("admin", "organization", "delete"),
        ("manager", "user", "read"),
        ("member", "project", "create"),
        ("guest", "task", "comment"),
    ];
    for (role, resource, action) in probes {
        let query = PermissionQuery::new(role, resource, action)
            .with_member_teams(["t1"])
            .with_context_teams(["t1"]);
        assert_eq!(
            loaded.has_permission(&query),
            table.has_permission(&query),
            "{role}/{resource}/{action}"
        );
    }
}

#[test]
fn custom_roles_evaluate_like_system_ones() {
    let table = PolicyTable::builder()
        .with_system_roles()
        .with_role(
            "auditor",
            [
                Grant::scoped("project", &["read"], Scope::All),
                Grant::scoped("task", &["read"], Scope::All),
            ],
        )
        .build()
        .unwrap();

    assert!(table.has_permission(&PermissionQuery::new("auditor", "task", "read")));
    assert!(!table.has_permission(&PermissionQuery::new("auditor", "task", "update")));
    // System roles still intact alongside the custom one.
    assert!(table.has_permission(&PermissionQuery::new("owner", "label", "create")));
}
