//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: PrincipalId, User, Group, Principal, and Error.

mod errors;
mod principals;
