//! Integration tests for markup awareness
//!
//! Tokens never start inside tags, links, code, or comments.

use mentions_scanner::scan;

fn count(text: &str) -> usize {
    scan(text).len()
}

#[test]
fn tag_attributes_are_skipped() {
    assert_eq!(count("<span title=\"user#1\">x</span>"), 0);
    assert_eq!(count("<img alt='group#2'/> group#3"), 1);
}

#[test]
fn link_bodies_are_skipped() {
    assert_eq!(count("<a href=\"/u\">user#1</a> user#2"), 1);
    assert_eq!(count("<A HREF=\"/u\">user#1</A>"), 0);
}

#[test]
fn code_and_pre_are_skipped() {
    assert_eq!(count("<code>user#1</code><pre>\ngroup#2\n</pre> user#3"), 1);
}

#[test]
fn unclosed_opaque_element_swallows_rest() {
    assert_eq!(count("<code>user#1 user#2"), 0);
}

#[test]
fn comments_are_skipped() {
    assert_eq!(count("<!-- user#1 --> user#2"), 1);
    assert_eq!(count("<!-- user#1"), 0);
}

#[test]
fn backtick_spans_are_skipped() {
    assert_eq!(count("`user#1` user#2"), 1);
    assert_eq!(count("``a ` user#1`` user#2"), 1);
}

#[test]
fn unmatched_backticks_are_literal() {
    assert_eq!(count("a ` user#1"), 1);
}

#[test]
fn stray_angle_brackets_are_text() {
    assert_eq!(count("1 < 2 user#1"), 1);
    assert_eq!(count("a<user#1"), 1);
}
