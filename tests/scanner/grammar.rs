//! Integration tests for the token grammar
//!
//! Tests each token form, word boundaries, and malformed near-misses.

use mentions_scanner::{MentionKind, scan};

fn tokens(text: &str) -> Vec<(MentionKind, String)> {
    scan(text).into_iter().map(|t| (t.kind, t.identifier)).collect()
}

// =============================================================================
// Token forms
// =============================================================================

#[test]
fn all_forms_in_one_text() {
    let found = tokens("user#1, user:\"jdoe\", user:\"j@x.io\" and group#2.");
    assert_eq!(
        found,
        vec![
            (MentionKind::UserById, "1".to_string()),
            (MentionKind::UserByLogin, "jdoe".to_string()),
            (MentionKind::UserByEmail, "j@x.io".to_string()),
            (MentionKind::GroupById, "2".to_string()),
        ]
    );
}

#[test]
fn identifier_excludes_sigils_and_quotes() {
    let text = "see user:\"foo@bar.com\" please";
    let token = &scan(text)[0];
    assert_eq!(token.identifier, "foo@bar.com");
    assert_eq!(token.raw, "user:\"foo@bar.com\"");
    assert_eq!(token.prefix(text), "user:\"");
    assert_eq!(token.suffix(text), "\"");
    assert_eq!(&text[token.span.start..token.span.end], token.raw);
}

#[test]
fn quoted_values_may_contain_spaces() {
    assert_eq!(
        tokens("user:\"Jane Doe\""),
        vec![(MentionKind::UserByLogin, "Jane Doe".to_string())]
    );
}

#[test]
fn punctuation_ends_a_numeric_token() {
    assert_eq!(tokens("(user#12)"), vec![(MentionKind::UserById, "12".to_string())]);
    assert_eq!(tokens("user#12."), vec![(MentionKind::UserById, "12".to_string())]);
}

// =============================================================================
// Non-tokens
// =============================================================================

#[test]
fn bare_sigils_are_not_tokens() {
    assert!(tokens("issue #12 and #user").is_empty());
    assert!(tokens("user# group#x user#").is_empty());
}

#[test]
fn word_boundaries_are_required() {
    assert!(tokens("superuser#1 subgroup#2 poweruser:\"x\"").is_empty());
    assert!(tokens("user#12abc group#3_x").is_empty());
}

#[test]
fn malformed_quotes_are_not_tokens() {
    assert!(tokens("user:\"unterminated").is_empty());
    assert!(tokens("user:\"\"").is_empty());
    assert!(tokens("user:\"split\nacross\"").is_empty());
    assert!(tokens("user:\"a<b\"").is_empty());
    assert!(tokens("user: \"spaced\"").is_empty());
}
