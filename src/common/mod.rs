//! Common types and helpers shared by the fill and background codecs.

// Submodule declarations
pub mod error;
pub mod hex;
pub mod query;
pub mod validate;

// Re-exports for convenience
pub use error::{Error, Result};
pub use validate::{is_valid_color, is_valid_intensity, is_valid_rotation_angle};
