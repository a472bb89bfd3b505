//! End-to-end tests across every layer
//!
//! Formats whole documents through the public entry points, checks the
//! engine's documented properties, and exercises failure paths.

mod faults;
