//! Mention token types.
//!
//! Tokens are the output of the scanner and input to resolution.

use std::fmt;

use crate::span::Span;

/// What a mention token refers to, and how to look it up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MentionKind {
    /// `user#<digits>`
    UserById,
    /// `user:"<value>"` where the value is not shaped like an address
    UserByLogin,
    /// `user:"<value>"` where the value is shaped like an address
    UserByEmail,
    /// `group#<digits>`
    GroupById,
}

impl MentionKind {
    /// Returns true for the quoted `user:"..."` forms.
    #[must_use]
    pub const fn is_quoted(self) -> bool {
        matches!(self, Self::UserByLogin | Self::UserByEmail)
    }

    /// Returns true if this token can only resolve to a user.
    #[must_use]
    pub const fn targets_user(self) -> bool {
        !matches!(self, Self::GroupById)
    }

    /// Classifies the value of a quoted `user:"..."` token.
    #[must_use]
    pub fn for_quoted(value: &str) -> Self {
        if looks_like_email(value) {
            Self::UserByEmail
        } else {
            Self::UserByLogin
        }
    }
}

impl fmt::Display for MentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UserById => "user id",
            Self::UserByLogin => "user login",
            Self::UserByEmail => "user email",
            Self::GroupById => "group id",
        };
        f.write_str(name)
    }
}

/// A mention found in text, prior to resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionToken {
    /// The token form.
    pub kind: MentionKind,
    /// The whole token, sigil and quotes included.
    pub span: Span,
    /// The value inside the token: digits, login, or address.
    pub identifier: String,
    /// Where `identifier` sits in the source.
    pub identifier_span: Span,
    /// The literal token text.
    pub raw: String,
}

impl MentionToken {
    /// Returns the text before the identifier (`user#`, `user:"`, `group#`).
    #[must_use]
    pub fn prefix<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.identifier_span.start]
    }

    /// Returns the text after the identifier (a closing quote, or nothing).
    #[must_use]
    pub fn suffix<'a>(&self, source: &'a str) -> &'a str {
        &source[self.identifier_span.end..self.span.end]
    }
}

/// Returns true if `value` has exactly one `@` separating a non-empty local
/// part from a non-empty domain, and no whitespace.
#[must_use]
pub fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
