//! Integration tests for Layer 3: Engine
//!
//! Tests for resolution, visibility policies, link building, and rendering.

mod links;
mod visibility;
