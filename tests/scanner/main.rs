//! Integration tests for Layer 2: Scanner
//!
//! Tests for the mention grammar, markup awareness, and scan invariants.

mod grammar;
mod markup;
mod properties;
