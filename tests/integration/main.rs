//! Integration tests for rl-rotate.
//!
//! These run the engine against its collaborators: a real directory in a
//! temporary location, and in-memory sources and removers.
//!
//! ```bash
//! cargo test -p rl-integration-tests
//! ```

mod collaborator_test;
mod common;
mod fs_test;
