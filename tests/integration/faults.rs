//! Failure paths
//!
//! Store faults, deadlines and bad render settings abort the whole call.

use std::time::{Duration, Instant};

use mentions::{RenderContext, format_mentions};
use mentions_foundation::{Error, ErrorKind, Group, PrincipalId, Result, User};
use mentions_store::{Directory, PrincipalStore};

/// Answers id lookups from a directory; name lookups always fail.
struct FlakyStore {
    inner: Directory,
}

impl PrincipalStore for FlakyStore {
    fn user_by_id(&self, id: PrincipalId) -> Result<Option<User>> {
        self.inner.user_by_id(id)
    }

    fn user_by_email(&self, _address: &str) -> Result<Option<User>> {
        Err(Error::store("directory offline"))
    }

    fn user_by_login(&self, _login: &str) -> Result<Option<User>> {
        Err(Error::store("directory offline"))
    }

    fn group_by_id(&self, id: PrincipalId) -> Result<Option<Group>> {
        self.inner.group_by_id(id)
    }

    fn shares_project(&self, a: PrincipalId, b: PrincipalId) -> Result<bool> {
        self.inner.shares_project(a, b)
    }
}

fn flaky() -> FlakyStore {
    FlakyStore {
        inner: Directory::new()
            .with_user(User::new(PrincipalId::new(1), "ok", "Okay"))
            .unwrap(),
    }
}

#[test]
fn id_mentions_survive_a_flaky_store() {
    let out = format_mentions("user#1", &RenderContext::anonymous(), &flaky()).unwrap();
    assert!(out.contains(">Okay</a>"));
}

#[test]
fn store_fault_names_the_token() {
    let text = "user#1 is fine\n  but user:\"ok\" is not";
    let err = format_mentions(text, &RenderContext::anonymous(), &flaky()).unwrap_err();

    assert!(err.is_store_fault());
    let context = err.context.expect("token context");
    assert_eq!(context.source.as_deref(), Some("user:\"ok\""));
    assert_eq!(context.line, Some(2));
    assert_eq!(context.column, Some(7));
    assert!(!context.stack.is_empty());
}

#[test]
fn expired_deadline_returns_nothing() {
    let ctx = RenderContext::anonymous().with_deadline(Instant::now());
    let err = format_mentions("user#1", &ctx, &flaky()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DeadlineExceeded { .. }));
}

#[test]
fn generous_deadline_is_met() {
    let ctx = RenderContext::anonymous().with_timeout(Duration::from_secs(60));
    assert!(format_mentions("user#1", &ctx, &flaky()).is_ok());
}

#[test]
fn absolute_mode_needs_a_host() {
    let ctx = RenderContext::anonymous().with_only_path(false);
    let err = format_mentions("no mentions here", &ctx, &Directory::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidConfig(_)));
}

#[test]
fn protocol_must_be_a_scheme() {
    let ctx = RenderContext::anonymous()
        .with_only_path(false)
        .with_host("example.com")
        .with_protocol("ht tp");
    let err = format_mentions("user#1", &ctx, &Directory::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidConfig(_)));
}
