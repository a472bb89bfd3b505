//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use mentions_foundation::{Error, ErrorContext, ErrorKind, PrincipalId};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_store_fault() {
    let err = Error::store("connection reset");
    assert!(err.is_store_fault());
    assert_eq!(format!("{err}"), "principal store failure: connection reset");
}

#[test]
fn error_invalid_config() {
    let err = Error::invalid_config("absolute links require a host");
    assert!(matches!(err.kind, ErrorKind::InvalidConfig(_)));
    assert!(!err.is_store_fault());
    assert!(format!("{err}").contains("host"));
}

#[test]
fn error_unknown_principal() {
    let err = Error::unknown_principal(PrincipalId::new(42));
    assert!(matches!(err.kind, ErrorKind::UnknownPrincipal(_)));
    assert!(format!("{err}").contains("42"));
}

#[test]
fn error_deadline_exceeded() {
    let err = Error::deadline_exceeded(250);
    assert!(matches!(err.kind, ErrorKind::DeadlineExceeded { budget_ms: 250 }));
    assert_eq!(format!("{err}"), "formatting deadline of 250ms exceeded");
}

#[test]
fn error_duplicate_kinds_display_value() {
    let login = Error::new(ErrorKind::DuplicateLogin("jdoe".to_string()));
    assert!(format!("{login}").contains("jdoe"));

    let email = Error::new(ErrorKind::DuplicateEmail("a@b.c".to_string()));
    assert!(format!("{email}").contains("a@b.c"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_without_context() {
    let err = Error::store("down");
    assert!(err.context.is_none());
}

#[test]
fn error_with_context() {
    let ctx = ErrorContext::new()
        .with_source("user#42")
        .with_position(3, 7)
        .with_frame("resolving user id");
    let err = Error::store("down").with_context(ctx);

    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.source.as_deref(), Some("user#42"));
    assert_eq!(ctx.line, Some(3));
    assert_eq!(ctx.column, Some(7));
    assert_eq!(ctx.stack, vec!["resolving user id".to_string()]);
}

#[test]
fn context_display() {
    let ctx = ErrorContext::new()
        .with_source("group#7")
        .with_position(1, 5)
        .with_frame("resolving group id");
    let shown = format!("{ctx}");
    assert!(shown.starts_with("at group#7:1:5"));
    assert!(shown.contains("in resolving group id"));
}

#[test]
fn context_default_is_empty() {
    let ctx = ErrorContext::default();
    assert!(ctx.source.is_none());
    assert!(ctx.stack.is_empty());
    assert_eq!(format!("{ctx}"), "");
}
