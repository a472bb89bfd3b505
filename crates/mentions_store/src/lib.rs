//! Principal lookup interface and in-memory directory for the mentions engine.
//!
//! This crate provides:
//! - [`PrincipalStore`] - The read-only lookup capability the engine consumes
//! - [`Directory`] - Immutable in-memory store with structural sharing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod directory;
pub mod store;

pub use directory::Directory;
pub use store::PrincipalStore;
