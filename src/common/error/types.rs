//! Unified error types for the backdrop library.
//!
//! Client-supplied background descriptions are validated strictly; every
//! rejection is one of the closed set of variants below, each carrying a
//! stable numeric code alongside its message.
use thiserror::Error;

/// Main error type for backdrop operations.
///
/// The message strings are stable: they are shared with other
/// implementations of the background link and object formats and must not
/// be reworded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// No fill object was supplied where one is required
    #[error("Background fill info must be non-empty")]
    MissingFillInfo,

    /// Solid fill color outside the 24-bit RGB range
    #[error("Invalid solid fill color value")]
    InvalidSolidColor,

    /// Gradient top color outside the 24-bit RGB range
    #[error("Invalid top gradient color value")]
    InvalidTopColor,

    /// Gradient bottom color outside the 24-bit RGB range
    #[error("Invalid bottom gradient color value")]
    InvalidBottomColor,

    /// Gradient rotation is not a multiple of 45 degrees in [0, 360)
    #[error("Invalid rotation angle value")]
    InvalidRotationAngle,

    /// Freeform gradient with a color count other than 3 or 4
    #[error("Wrong number of gradient colors")]
    WrongGradientColorCount,

    /// Freeform gradient color outside the 24-bit RGB range
    #[error("Invalid freeform gradient color value")]
    InvalidFreeformColor,

    /// No background type object was supplied where one is required
    #[error("Type must be non-empty")]
    MissingType,

    /// Pattern intensity outside [-100, 100]
    #[error("Wrong intensity value")]
    WrongIntensity,

    /// Malformed background link
    #[error("WALLPAPER_INVALID")]
    InvalidWallpaperLink,
}

impl Error {
    /// Numeric code surfaced alongside the message.
    ///
    /// All client-input validation failures share code 400.
    #[inline]
    pub const fn code(&self) -> i32 {
        400
    }

    /// Stable message text for the error.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Result type for backdrop operations.
pub type Result<T> = std::result::Result<T, Error>;
