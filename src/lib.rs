//! Backdrop - codec and validator for chat wallpaper background descriptors.
//!
//! A background description names a fill (solid color, two-color gradient,
//! or freeform gradient) and its modifiers (blur, parallax motion, pattern
//! intensity). The same logical value converts losslessly among three
//! representations:
//!
//! - **Link text**: a short URL-like slug such as
//!   `ff0000-00ff00?rotation=45` or `intensity=-50&bg_color=ff0000`
//! - **Client-facing objects**: the structured [`api`] shapes, validated
//!   strictly with stable code-400 errors
//! - **Wire settings**: the compact flag-masked [`wire::WallpaperSettings`]
//!   struct, parsed leniently with anomalies reported to an injected
//!   [`DiagnosticSink`]
//!
//! Everything is purely functional: a representation goes in, a value or a
//! typed error comes out, and no state is retained between calls.
//!
//! # Example - Parsing a fill link
//!
//! ```rust
//! use backdrop::BackgroundFill;
//!
//! let fill = BackgroundFill::from_link("ff0000-00ff00?rotation=45")?;
//! assert_eq!(
//!     fill,
//!     BackgroundFill::Gradient {
//!         top_color: 0xFF0000,
//!         bottom_color: 0x00FF00,
//!         rotation_angle: 45,
//!     }
//! );
//! assert_eq!(fill.to_link(true), "ff0000-00ff00?rotation=45");
//! # Ok::<(), backdrop::Error>(())
//! ```
//!
//! # Example - Lenient wire parsing
//!
//! ```rust
//! use backdrop::{BackgroundType, NullSink};
//! use backdrop::wire::{SettingsFlags, WallpaperSettings};
//!
//! let settings = WallpaperSettings {
//!     flags: SettingsFlags::BACKGROUND_COLOR | SettingsFlags::INTENSITY,
//!     background_color: 0x112233,
//!     intensity: 40,
//!     ..WallpaperSettings::default()
//! };
//! let background = BackgroundType::from_wire(true, Some(settings), &NullSink);
//! assert_eq!(background.get_link(), "intensity=40&bg_color=112233");
//! ```
//!
//! # Example - Strict client input
//!
//! ```rust
//! use backdrop::{api, BackgroundFill, Error};
//!
//! let object = api::Fill::Solid { color: -1 };
//! let error = BackgroundFill::from_object(Some(&object)).unwrap_err();
//! assert_eq!(error.code(), 400);
//! assert_eq!(error.message(), "Invalid solid fill color value");
//! # let _ = Error::MissingFillInfo;
//! ```

/// Client-facing background objects exchanged with API consumers
pub mod api;

/// Complete background descriptions and the link query grammar
pub mod background;

/// Shared error, validation, and formatting helpers
pub mod common;

/// Diagnostic sink for lenient wire parsing
pub mod diag;

/// Background fill codec: link text, objects, wire settings, and ids
pub mod fill;

/// Flag-masked wire representation of wallpaper settings
pub mod wire;

// Re-exports for convenience
pub use background::BackgroundType;
pub use common::error::{Error, Result};
pub use common::validate::{is_valid_color, is_valid_intensity, is_valid_rotation_angle};
pub use diag::{DiagnosticSink, LogSink, NullSink, WireAnomaly};
pub use fill::BackgroundFill;
