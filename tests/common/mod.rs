//! Shared test utilities for the launcher
//!
//! - Scratch project directories with a manifest and entry point
//! - A fake `python3` that mimics `venv`, `pip` and script execution

pub mod python_fixtures;
