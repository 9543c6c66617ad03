//! Lowercase hex helpers for 24-bit colors.

use super::error::{Error, Result};

/// Append a color as exactly six lowercase hex digits.
pub fn push_color_hex(color: u32, out: &mut String) {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    debug_assert!(color <= 0xFF_FFFF);
    let mut shift = 24;
    while shift > 0 {
        shift -= 4;
        out.push(DIGITS[((color >> shift) & 0xF) as usize] as char);
    }
}

/// Format a color as a six-digit lowercase hex string.
///
/// # Examples
///
/// ```rust
/// use backdrop::common::hex::color_hex;
///
/// assert_eq!(color_hex(0xFF0000), "ff0000");
/// assert_eq!(color_hex(0x00000F), "00000f");
/// ```
pub fn color_hex(color: u32) -> String {
    let mut out = String::with_capacity(6);
    push_color_hex(color, &mut out);
    out
}

/// Parse a color token from a link: one to six hex digits, no sign, no
/// `0x` prefix.
///
/// Longer tokens and non-hex characters are rejected, so an accepted value
/// is always within the 24-bit range.
pub fn parse_color_hex(token: &str) -> Result<u32> {
    if token.is_empty() || token.len() > 6 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidWallpaperLink);
    }
    u32::from_str_radix(token, 16).map_err(|_| Error::InvalidWallpaperLink)
}
