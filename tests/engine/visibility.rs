//! Integration tests for visibility policies
//!
//! A hidden user renders exactly as an unknown one would.

use mentions_engine::{
    MembershipVisibility, MentionFormatter, OpenVisibility, RenderContext, VisibilityMode,
};
use mentions_foundation::{Group, PrincipalId, ProjectId, User, UserStatus};
use mentions_store::Directory;

fn id(raw: u64) -> PrincipalId {
    PrincipalId::new(raw)
}

fn directory() -> Directory {
    Directory::new()
        .with_user(User::new(id(1), "alice", "Alice").with_email("alice@example.com"))
        .unwrap()
        .with_user(User::new(id(2), "bob", "Bob"))
        .unwrap()
        .with_user(User::new(id(3), "carol", "Carol").as_admin())
        .unwrap()
        .with_user(
            User::new(id(4), "dave", "Dave")
                .as_admin()
                .with_status(UserStatus::Locked),
        )
        .unwrap()
        .with_group(Group::new(id(9), "Everyone"))
        .unwrap()
        .with_membership(id(1), ProjectId(1))
        .unwrap()
        .with_membership(id(2), ProjectId(2))
        .unwrap()
}

const TEXT: &str = "user#1 user:\"alice@example.com\" user:\"alice\" group#9";

#[test]
fn open_policy_links_for_everyone() {
    let formatter = MentionFormatter::new(directory()).with_visibility(OpenVisibility);
    let anonymous = formatter.format(TEXT, &RenderContext::anonymous()).unwrap();
    let stranger = formatter.format(TEXT, &RenderContext::for_viewer(id(2))).unwrap();

    assert_eq!(anonymous, stranger);
    assert_eq!(anonymous.matches("href=\"/users/1\"").count(), 3);
}

#[test]
fn hidden_user_renders_like_unknown_user() {
    let formatter = MentionFormatter::new(directory()).with_visibility(MembershipVisibility);
    let out = formatter.format(TEXT, &RenderContext::for_viewer(id(2))).unwrap();

    assert_eq!(
        out,
        "user#1 user:\"<a class=\"op-uc-link\" href=\"mailto:alice@example.com\">alice@example.com</a>\" user:\"alice\" \
         <span class=\"user-mention\" title=\"Group Everyone\">Everyone</span>"
    );
}

#[test]
fn active_admins_see_everyone() {
    let formatter = MentionFormatter::new(directory()).with_visibility(VisibilityMode::Membership);

    let admin = formatter.format("user#1", &RenderContext::for_viewer(id(3))).unwrap();
    assert!(admin.contains("href=\"/users/1\""));

    let locked_admin = formatter.format("user#1", &RenderContext::for_viewer(id(4))).unwrap();
    assert_eq!(locked_admin, "user#1");
}

#[test]
fn groups_render_under_every_policy() {
    for mode in [VisibilityMode::Open, VisibilityMode::Membership] {
        let formatter = MentionFormatter::new(directory()).with_visibility(mode);
        let out = formatter.format("group#9", &RenderContext::anonymous()).unwrap();
        assert!(out.starts_with("<span"), "{} policy", mode.name());
    }
}
