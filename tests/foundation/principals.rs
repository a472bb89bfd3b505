//! Integration tests for principal types
//!
//! Tests ids, users, groups, and the `Principal` sum type.

use mentions_foundation::{Group, Principal, PrincipalId, PrincipalKind, User, UserStatus};

// =============================================================================
// PrincipalId
// =============================================================================

#[test]
fn principal_id_display_and_debug() {
    let id = PrincipalId::new(7);
    assert_eq!(format!("{id}"), "7");
    assert_eq!(format!("{id:?}"), "PrincipalId(7)");
    assert_eq!(id.get(), 7);
    assert_eq!(PrincipalId::from(7), id);
}

#[test]
fn principal_id_ordering() {
    let mut ids = vec![PrincipalId::new(3), PrincipalId::new(1), PrincipalId::new(2)];
    ids.sort();
    assert_eq!(ids, vec![PrincipalId::new(1), PrincipalId::new(2), PrincipalId::new(3)]);
}

// =============================================================================
// Users
// =============================================================================

#[test]
fn user_builder() {
    let user = User::new(PrincipalId::new(1), "jdoe", "Jane Doe")
        .with_email("jane@example.com")
        .with_email("j.doe@example.org")
        .as_admin();

    assert_eq!(user.login, "jdoe");
    assert_eq!(user.emails.len(), 2);
    assert!(user.admin);
    assert!(user.is_active());
}

#[test]
fn user_status() {
    let locked = User::new(PrincipalId::new(1), "a", "A").with_status(UserStatus::Locked);
    assert!(!locked.is_active());

    assert_eq!(UserStatus::parse("DELETED"), Some(UserStatus::Deleted));
    assert_eq!(UserStatus::parse("asleep"), None);
    assert_eq!(UserStatus::default(), UserStatus::Active);
    assert_eq!(UserStatus::Locked.to_string(), "locked");
}

// =============================================================================
// Principal
// =============================================================================

#[test]
fn principal_titles() {
    let user: Principal = User::new(PrincipalId::new(1), "foo", "Foo Barrit").into();
    let group: Principal = Group::new(PrincipalId::new(2), "Developers").into();

    assert_eq!(user.title(), "User Foo Barrit");
    assert_eq!(group.title(), "Group Developers");
    assert_eq!(user.kind(), PrincipalKind::User);
    assert_eq!(group.kind(), PrincipalKind::Group);
    assert_eq!(group.display_name(), "Developers");
    assert_eq!(group.id(), PrincipalId::new(2));
}
