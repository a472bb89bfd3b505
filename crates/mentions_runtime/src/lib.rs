//! REPL, CLI, and directory snapshots for the mentions engine.
//!
//! This crate provides:
//! - [`Repl`] - Interactive loop for trying out mention formatting
//! - [`Session`] - Directory, render context, and visibility policy
//! - Directory serialization and deserialization

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod highlight;
pub mod repl;
pub mod serialize;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use highlight::MentionHighlighter;
pub use repl::{Repl, split_args};
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
pub use session::Session;
