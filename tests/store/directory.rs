//! Integration tests for Directory updates
//!
//! Tests immutability, uniqueness rules, memberships, and status changes.

use mentions_foundation::{ErrorKind, Group, PrincipalId, ProjectId, User, UserStatus};
use mentions_store::Directory;

fn id(raw: u64) -> PrincipalId {
    PrincipalId::new(raw)
}

// =============================================================================
// Immutability
// =============================================================================

#[test]
fn directory_starts_empty() {
    let directory = Directory::new();
    assert_eq!(directory.user_count(), 0);
    assert_eq!(directory.group_count(), 0);
}

#[test]
fn with_user_returns_new_directory() {
    let before = Directory::new();
    let after = before.with_user(User::new(id(1), "a", "A")).unwrap();

    assert_eq!(before.user_count(), 0);
    assert_eq!(after.user_count(), 1);
    assert!(after.contains(id(1)));
}

// =============================================================================
// Uniqueness
// =============================================================================

#[test]
fn ids_are_shared_between_users_and_groups() {
    let directory = Directory::new().with_group(Group::new(id(5), "Ops")).unwrap();
    let err = directory.with_user(User::new(id(5), "x", "X")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicatePrincipal(_)));
}

#[test]
fn logins_are_unique_ignoring_case() {
    let directory = Directory::new().with_user(User::new(id(1), "JDoe", "J")).unwrap();
    let err = directory.with_user(User::new(id(2), "jdoe", "Other")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateLogin(_)));
}

#[test]
fn addresses_are_unique_ignoring_case() {
    let directory = Directory::new()
        .with_user(User::new(id(1), "a", "A").with_email("Shared@Example.com"))
        .unwrap();
    let err = directory
        .with_user(User::new(id(2), "b", "B").with_email("shared@example.com"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateEmail(_)));
}

// =============================================================================
// Memberships and status
// =============================================================================

#[test]
fn memberships_accumulate() {
    let directory = Directory::new()
        .with_user(User::new(id(1), "a", "A"))
        .unwrap()
        .with_membership(id(1), ProjectId(9))
        .unwrap()
        .with_membership(id(1), ProjectId(2))
        .unwrap()
        .with_membership(id(1), ProjectId(9))
        .unwrap();

    assert_eq!(directory.projects_of(id(1)), vec![ProjectId(2), ProjectId(9)]);
    assert!(directory.projects_of(id(2)).is_empty());
}

#[test]
fn membership_requires_known_principal() {
    let err = Directory::new().with_membership(id(1), ProjectId(1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownPrincipal(_)));
}

#[test]
fn status_and_admin_updates() {
    let directory = Directory::new()
        .with_user(User::new(id(1), "a", "A"))
        .unwrap()
        .with_user_status(id(1), UserStatus::Deleted)
        .unwrap()
        .with_admin(id(1), true)
        .unwrap();

    let user = directory.user(id(1)).unwrap();
    assert_eq!(user.status, UserStatus::Deleted);
    assert!(user.admin);

    assert!(directory.with_admin(id(2), true).is_err());
    assert!(directory.with_user_status(id(2), UserStatus::Active).is_err());
}

#[test]
fn iteration_is_in_id_order() {
    let directory = Directory::new()
        .with_user(User::new(id(3), "c", "C"))
        .unwrap()
        .with_user(User::new(id(1), "a", "A"))
        .unwrap()
        .with_group(Group::new(id(9), "Z"))
        .unwrap()
        .with_group(Group::new(id(4), "Y"))
        .unwrap();

    let users: Vec<u64> = directory.users().map(|u| u.id.get()).collect();
    let groups: Vec<u64> = directory.groups().map(|g| g.id.get()).collect();
    assert_eq!(users, vec![1, 3]);
    assert_eq!(groups, vec![4, 9]);
}
