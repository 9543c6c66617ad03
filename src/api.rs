//! Client-facing background objects.
//!
//! These are the structured shapes exposed to API consumers. Color fields
//! are plain `i32`s so that malformed input is representable; conversion
//! into the validated core types happens in
//! [`BackgroundFill::from_object`](crate::BackgroundFill::from_object) and
//! [`BackgroundType::from_object`](crate::BackgroundType::from_object),
//! which reject anything out of range.

use serde::{Deserialize, Serialize};

/// Client-facing description of a background fill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    /// Single solid color
    Solid { color: i32 },
    /// Two-color gradient
    Gradient {
        top_color: i32,
        bottom_color: i32,
        rotation_angle: i32,
    },
    /// Freeform gradient over 3 or 4 colors
    FreeformGradient { colors: Vec<i32> },
}

/// Client-facing description of a complete background.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    /// Full-size wallpaper image
    Wallpaper { is_blurred: bool, is_moving: bool },
    /// Pattern image drawn over a fill
    Pattern {
        fill: Fill,
        intensity: i32,
        is_moving: bool,
    },
    /// Plain fill without an image
    Fill { fill: Fill },
}
