//! Unified error types for the backdrop library.
//!
//! This module provides the single error type surfaced by the strict
//! parsing paths, presenting a consistent API to users.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
