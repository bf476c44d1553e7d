//! Integration tests for the launcher binary
//!
//! These drive the real binary against scratch project directories with a
//! fake interpreter on `PATH`.

#[path = "../common/mod.rs"]
pub mod common;
