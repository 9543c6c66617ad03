//! Range predicates shared by the strict and lenient parsing paths.

/// Whether `color` is a 24-bit RGB value.
#[inline]
pub const fn is_valid_color(color: i32) -> bool {
    0 <= color && color <= 0xFF_FFFF
}

/// Whether `rotation_angle` is one of the eight allowed gradient angles.
#[inline]
pub const fn is_valid_rotation_angle(rotation_angle: i32) -> bool {
    0 <= rotation_angle && rotation_angle < 360 && rotation_angle % 45 == 0
}

/// Whether `intensity` lies within the pattern intensity range.
#[inline]
pub const fn is_valid_intensity(intensity: i32) -> bool {
    -100 <= intensity && intensity <= 100
}
