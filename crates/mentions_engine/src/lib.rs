//! Mention resolution, visibility, link building, and rendering.
//!
//! This crate provides:
//! - [`PrincipalResolver`] - Token to principal resolution
//! - [`VisibilityPolicy`] - Swappable link gate ([`OpenVisibility`], [`MembershipVisibility`])
//! - [`LinkBuilder`] - Profile and `mailto:` URLs
//! - [`render`] - Fragment splicing
//! - [`MentionFormatter`] - The full pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod formatter;
pub mod link;
pub mod render;
pub mod resolver;
pub mod visibility;

pub use context::{LinkMode, RenderContext};
pub use formatter::{MentionFormatter, format_mentions};
pub use link::{LinkBuilder, UserPathLinks};
pub use render::{Fragment, MarkupClasses, escape_html, render};
pub use resolver::{PrincipalResolver, Resolution};
pub use visibility::{MembershipVisibility, OpenVisibility, VisibilityMode, VisibilityPolicy};
