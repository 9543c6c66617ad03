//! Wire representation of wallpaper settings.
//!
//! The remote service describes a background's fill and modifiers with a
//! single flat struct gated by a flag word. The flag bit positions are
//! fixed by the wire schema and must not be reassigned.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Field-presence and modifier bits of [`WallpaperSettings`].
    ///
    /// Color, intensity, and rotation fields are always written; the bits
    /// record which of them a reader should trust.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SettingsFlags: u32 {
        /// Primary background color present
        const BACKGROUND_COLOR = 1 << 0;
        /// Background is blurred
        const BLUR = 1 << 1;
        /// Background scrolls with device tilt
        const MOTION = 1 << 2;
        /// Pattern intensity present
        const INTENSITY = 1 << 3;
        /// Second gradient color present
        const SECOND_BACKGROUND_COLOR = 1 << 4;
        /// Third gradient color present
        const THIRD_BACKGROUND_COLOR = 1 << 5;
        /// Fourth gradient color present
        const FOURTH_BACKGROUND_COLOR = 1 << 6;
    }
}

impl Default for SettingsFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Compact wallpaper settings exchanged with the remote service.
///
/// All value fields are written unconditionally when serializing;
/// [`SettingsFlags`] alone decides which of them carry meaning. A missing
/// third or fourth color is written as the `-1` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WallpaperSettings {
    pub flags: SettingsFlags,
    pub background_color: i32,
    pub second_background_color: i32,
    pub third_background_color: i32,
    pub fourth_background_color: i32,
    pub intensity: i32,
    pub rotation: i32,
}
