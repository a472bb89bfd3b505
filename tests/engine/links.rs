//! Integration tests for link building and markup
//!
//! Tests relative and absolute links, custom builders, and escaping.

use mentions_engine::{
    LinkBuilder, MarkupClasses, MentionFormatter, RenderContext, UserPathLinks, format_mentions,
};
use mentions_foundation::{PrincipalId, User};
use mentions_store::Directory;

fn directory() -> Directory {
    Directory::new()
        .with_user(User::new(PrincipalId::new(7), "tom", "Tom & \"Jerry\" <TJ>"))
        .unwrap()
}

/// Links to a profile service keyed by login-free numeric ids.
struct ProfileLinks;

impl LinkBuilder for ProfileLinks {
    fn user_path(&self, user: PrincipalId) -> String {
        format!("/profiles?id={user}")
    }

    fn mailto(&self, address: &str) -> String {
        format!("mailto:{address}?subject=Mention")
    }
}

#[test]
fn display_names_are_escaped() {
    let out = format_mentions("user#7", &RenderContext::anonymous(), &directory()).unwrap();
    assert_eq!(
        out,
        "<a class=\"user-mention op-uc-link\" href=\"/users/7\" \
         title=\"User Tom &amp; &quot;Jerry&quot; &lt;TJ&gt;\">Tom &amp; &quot;Jerry&quot; &lt;TJ&gt;</a>"
    );
}

#[test]
fn absolute_links_with_port_and_scheme() {
    let ctx = RenderContext::anonymous()
        .with_only_path(false)
        .with_host("example.com:8080")
        .with_protocol("https");
    let out = format_mentions("user#7", &ctx, &directory()).unwrap();
    assert!(out.contains("href=\"https://example.com:8080/users/7\""));
}

#[test]
fn custom_link_builder() {
    let formatter = MentionFormatter::new(directory()).with_links(ProfileLinks);
    let out = formatter
        .format("user#7 user:\"x@y.z\"", &RenderContext::anonymous())
        .unwrap();
    assert!(out.contains("href=\"/profiles?id=7\""));
    assert!(out.contains("href=\"mailto:x@y.z?subject=Mention\""));
}

#[test]
fn custom_prefix_in_absolute_mode() {
    let formatter =
        MentionFormatter::new(directory()).with_links(UserPathLinks::new().with_prefix("/people"));
    let ctx = RenderContext::anonymous()
        .with_only_path(false)
        .with_host("example.com");
    let out = formatter.format("user#7", &ctx).unwrap();
    assert!(out.contains("href=\"http://example.com/people/7\""));
}

#[test]
fn custom_classes() {
    let classes = MarkupClasses::default()
        .with_mention("mention")
        .with_link("rich-link");
    let formatter = MentionFormatter::new(directory()).with_classes(classes);
    let out = formatter
        .format("user#7 user:\"a@b.c\"", &RenderContext::anonymous())
        .unwrap();
    assert!(out.starts_with("<a class=\"mention rich-link\""));
    assert!(out.contains("<a class=\"rich-link\" href=\"mailto:a@b.c\">"));
}
