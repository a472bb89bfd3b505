//! Markup-aware scanner for user and group mention tokens.
//!
//! # Grammar
//!
//! ```text
//! user#<digits>          → MentionKind::UserById
//! user:"<value>"         → MentionKind::UserByEmail (address-shaped value)
//!                        → MentionKind::UserByLogin (anything else)
//! group#<digits>         → MentionKind::GroupById
//! ```
//!
//! At each position the forms are tried in that order and the first match
//! wins; the scanner then continues after the full match, so tokens never
//! overlap.
//!
//! This crate provides:
//! - [`Scanner`] - Iterator over the tokens in a text
//! - [`MentionToken`] - A token with its kind, identifier, and spans
//! - [`Span`] - Byte offsets plus line/column

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod scanner;
pub mod span;
pub mod token;

pub use scanner::Scanner;
pub use span::Span;
pub use token::{MentionKind, MentionToken, looks_like_email};

/// Scans `text` and returns every mention token in offset order.
#[must_use]
pub fn scan(text: &str) -> Vec<MentionToken> {
    Scanner::scan_all(text)
}
