//! Mentions - resolve user and group references in rich text
//!
//! This crate re-exports all layers of the mentions system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: mentions_runtime    - REPL, CLI, directory snapshots
//! Layer 3: mentions_engine     - Resolution, visibility, links, rendering
//! Layer 2: mentions_scanner    - Markup-aware mention tokenizer
//! Layer 1: mentions_store      - Principal lookup trait, in-memory directory
//! Layer 0: mentions_foundation - Core types (PrincipalId, User, Group, Error)
//! ```
//!
//! # Example
//!
//! ```
//! use mentions::engine::{RenderContext, format_mentions};
//! use mentions::foundation::{Group, PrincipalId};
//! use mentions::store::Directory;
//!
//! let directory = Directory::new()
//!     .with_group(Group::new(PrincipalId::new(7), "Developers"))
//!     .unwrap();
//! let html = format_mentions("ask group#7", &RenderContext::anonymous(), &directory).unwrap();
//! assert_eq!(
//!     html,
//!     "ask <span class=\"user-mention\" title=\"Group Developers\">Developers</span>"
//! );
//! ```

pub use mentions_engine as engine;
pub use mentions_foundation as foundation;
pub use mentions_runtime as runtime;
pub use mentions_scanner as scanner;
pub use mentions_store as store;

pub use mentions_engine::{MentionFormatter, RenderContext, format_mentions};
