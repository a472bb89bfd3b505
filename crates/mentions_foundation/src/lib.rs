//! Core principal types and errors for the mentions engine.
//!
//! This crate provides:
//! - [`PrincipalId`] - Ids shared by users and groups
//! - [`Principal`] - The polymorphic mention target ([`User`] or [`Group`])
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod principal;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use principal::{Group, Principal, PrincipalId, PrincipalKind, ProjectId, User, UserStatus};
