//! Background fill codec and validator.
//!
//! A fill is the color part of a background description: a solid color, a
//! two-color gradient, or a freeform gradient over three or four colors.
//! The same fill converts losslessly among three representations: the short
//! link text (`ff0000-00ff00?rotation=45`), the client-facing
//! [`api::Fill`] object, and the flag-masked
//! [`WallpaperSettings`](crate::wire::WallpaperSettings) wire struct.
//!
//! Trust is asymmetric: client objects are validated strictly and rejected
//! with a typed [`Error`], while wire data is normalized leniently with
//! anomalies reported to a [`DiagnosticSink`].

use memchr::memchr;
use smallvec::SmallVec;

use crate::api;
use crate::common::error::{Error, Result};
use crate::common::hex::{parse_color_hex, push_color_hex};
use crate::common::query::parse_loose_i32;
use crate::common::validate::{is_valid_color, is_valid_rotation_angle};
use crate::diag::{ColorField, DiagnosticSink, WireAnomaly};
use crate::wire::{SettingsFlags, WallpaperSettings};

/// Base of the freeform id range, and exclusive upper bound of the
/// gradient id range.
const FREEFORM_ID_BASE: i64 = 0x8_000008_000008;
/// Distance between consecutive rotation buckets in the gradient id range.
const GRADIENT_ROTATION_STEP: i64 = 0x1_000001_000001;
/// Multiplier of the freeform polynomial id hash.
const FREEFORM_ID_MUL: u64 = 123_456_789;

/// A validated background fill.
///
/// Populated colors are always 24-bit RGB values and gradient rotations
/// are multiples of 45 degrees in `[0, 360)`; every constructor enforces
/// this, so a value in hand can always be re-encoded.
///
/// # Examples
///
/// ```rust
/// use backdrop::BackgroundFill;
///
/// let fill = BackgroundFill::from_link("ff0000~00ff00~0000ff")?;
/// assert_eq!(
///     fill,
///     BackgroundFill::FreeformGradient {
///         first_color: 0xFF0000,
///         second_color: 0x00FF00,
///         third_color: 0x0000FF,
///         fourth_color: None,
///     }
/// );
/// # Ok::<(), backdrop::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundFill {
    /// Single solid color.
    Solid {
        /// 24-bit RGB color
        color: u32,
    },
    /// Two-color gradient rotated by a multiple of 45 degrees.
    Gradient {
        top_color: u32,
        bottom_color: u32,
        rotation_angle: i32,
    },
    /// Freeform gradient over three or four colors.
    FreeformGradient {
        first_color: u32,
        second_color: u32,
        third_color: u32,
        /// Absent for three-color gradients
        fourth_color: Option<u32>,
    },
}

impl BackgroundFill {
    /// Parse a fill from the name part of a background link.
    ///
    /// Grammar, in order of precedence:
    /// - `a~b~c` or `a~b~c~d`: freeform gradient;
    /// - `a~b`: legacy alias for `a-b`, kept for old links;
    /// - `a-b`: gradient, honoring an optional `rotation=` query parameter;
    /// - `rrggbb`: solid color.
    ///
    /// An optional `#fragment` is discarded and an optional `?query` suffix
    /// is consulted only for `rotation`. Color tokens are one to six hex
    /// digits; anything else fails with [`Error::InvalidWallpaperLink`].
    pub fn from_link(link: &str) -> Result<Self> {
        let link = match memchr(b'#', link.as_bytes()) {
            Some(pos) => &link[..pos],
            None => link,
        };
        let (name, parameters) = match memchr(b'?', link.as_bytes()) {
            Some(pos) => (&link[..pos], &link[pos + 1..]),
            None => (link, ""),
        };

        let mut hyphen_pos = memchr(b'-', name.as_bytes());
        if memchr(b'~', name.as_bytes()).is_some() {
            let parts: SmallVec<[&str; 4]> = name.splitn(5, '~').collect();
            if parts.len() == 2 {
                // Legacy alias: a single tilde acts as the gradient hyphen.
                hyphen_pos = Some(parts[0].len());
            } else {
                if parts.len() > 4 {
                    return Err(Error::InvalidWallpaperLink);
                }
                let first_color = parse_color_hex(parts[0])?;
                let second_color = parse_color_hex(parts[1])?;
                let third_color = parse_color_hex(parts[2])?;
                let fourth_color = match parts.get(3) {
                    Some(part) => Some(parse_color_hex(part)?),
                    None => None,
                };
                return Ok(Self::FreeformGradient {
                    first_color,
                    second_color,
                    third_color,
                    fourth_color,
                });
            }
        }

        if let Some(pos) = hyphen_pos {
            let top_color = parse_color_hex(&name[..pos])?;
            let bottom_color = parse_color_hex(&name[pos + 1..])?;
            let mut rotation_angle = 0;
            if let Some(value) = parameters.strip_prefix("rotation=") {
                rotation_angle = parse_loose_i32(value);
                if !is_valid_rotation_angle(rotation_angle) {
                    rotation_angle = 0;
                }
            }
            return Ok(Self::Gradient {
                top_color,
                bottom_color,
                rotation_angle,
            });
        }

        Ok(Self::Solid {
            color: parse_color_hex(name)?,
        })
    }

    /// Build a fill from a client-facing object, rejecting invalid input.
    ///
    /// Strict: any out-of-range color or rotation, or a freeform color
    /// count other than 3 or 4, fails with a code-400 [`Error`]; nothing
    /// is silently corrected.
    pub fn from_object(object: Option<&api::Fill>) -> Result<Self> {
        let Some(object) = object else {
            return Err(Error::MissingFillInfo);
        };
        match *object {
            api::Fill::Solid { color } => {
                if !is_valid_color(color) {
                    return Err(Error::InvalidSolidColor);
                }
                Ok(Self::Solid { color: color as u32 })
            }
            api::Fill::Gradient {
                top_color,
                bottom_color,
                rotation_angle,
            } => {
                if !is_valid_color(top_color) {
                    return Err(Error::InvalidTopColor);
                }
                if !is_valid_color(bottom_color) {
                    return Err(Error::InvalidBottomColor);
                }
                if !is_valid_rotation_angle(rotation_angle) {
                    return Err(Error::InvalidRotationAngle);
                }
                Ok(Self::Gradient {
                    top_color: top_color as u32,
                    bottom_color: bottom_color as u32,
                    rotation_angle,
                })
            }
            api::Fill::FreeformGradient { ref colors } => {
                if colors.len() != 3 && colors.len() != 4 {
                    return Err(Error::WrongGradientColorCount);
                }
                if colors.iter().any(|&color| !is_valid_color(color)) {
                    return Err(Error::InvalidFreeformColor);
                }
                Ok(Self::FreeformGradient {
                    first_color: colors[0] as u32,
                    second_color: colors[1] as u32,
                    third_color: colors[2] as u32,
                    fourth_color: colors.get(3).map(|&color| color as u32),
                })
            }
        }
    }

    /// Read a fill from wire settings, normalizing invalid fields.
    ///
    /// Lenient: never fails. Flagged fields outside their valid range are
    /// reset to 0 and reported to `diagnostics`. An absent struct, or one
    /// without color flags, yields `Solid { color: 0 }`. The third and
    /// fourth color flags select a freeform gradient; otherwise the second
    /// color flag alone selects a gradient.
    pub fn from_wire(settings: Option<&WallpaperSettings>, diagnostics: &dyn DiagnosticSink) -> Self {
        let Some(settings) = settings else {
            return Self::Solid { color: 0 };
        };
        let flags = settings.flags;
        let read_color = |field: ColorField, value: i32| -> u32 {
            if is_valid_color(value) {
                value as u32
            } else {
                diagnostics.report(WireAnomaly::InvalidColor { field, value });
                0
            }
        };

        let first_color = if flags.contains(SettingsFlags::BACKGROUND_COLOR) {
            read_color(ColorField::Background, settings.background_color)
        } else {
            0
        };
        if flags.intersects(
            SettingsFlags::THIRD_BACKGROUND_COLOR | SettingsFlags::FOURTH_BACKGROUND_COLOR,
        ) {
            let second_color =
                read_color(ColorField::SecondBackground, settings.second_background_color);
            let third_color =
                read_color(ColorField::ThirdBackground, settings.third_background_color);
            let fourth_color = flags
                .contains(SettingsFlags::FOURTH_BACKGROUND_COLOR)
                .then(|| read_color(ColorField::FourthBackground, settings.fourth_background_color));
            Self::FreeformGradient {
                first_color,
                second_color,
                third_color,
                fourth_color,
            }
        } else if flags.contains(SettingsFlags::SECOND_BACKGROUND_COLOR) {
            let bottom_color =
                read_color(ColorField::SecondBackground, settings.second_background_color);
            let mut rotation_angle = settings.rotation;
            if !is_valid_rotation_angle(rotation_angle) {
                diagnostics.report(WireAnomaly::InvalidRotation {
                    value: rotation_angle,
                });
                rotation_angle = 0;
            }
            Self::Gradient {
                top_color: first_color,
                bottom_color,
                rotation_angle,
            }
        } else {
            Self::Solid { color: first_color }
        }
    }

    /// Format the fill as link text.
    ///
    /// `is_first_query_parameter` selects whether a gradient's rotation is
    /// appended with `?` or `&`, depending on where the caller places the
    /// text within a larger link.
    pub fn to_link(&self, is_first_query_parameter: bool) -> String {
        match *self {
            Self::Solid { color } => {
                let mut link = String::with_capacity(6);
                push_color_hex(color, &mut link);
                link
            }
            Self::Gradient {
                top_color,
                bottom_color,
                rotation_angle,
            } => {
                let mut link = String::with_capacity(26);
                push_color_hex(top_color, &mut link);
                link.push('-');
                push_color_hex(bottom_color, &mut link);
                link.push(if is_first_query_parameter { '?' } else { '&' });
                link.push_str("rotation=");
                let mut buffer = itoa::Buffer::new();
                link.push_str(buffer.format(rotation_angle));
                link
            }
            Self::FreeformGradient {
                first_color,
                second_color,
                third_color,
                fourth_color,
            } => {
                let mut link = String::with_capacity(27);
                push_color_hex(first_color, &mut link);
                link.push('~');
                push_color_hex(second_color, &mut link);
                link.push('~');
                push_color_hex(third_color, &mut link);
                if let Some(fourth_color) = fourth_color {
                    link.push('~');
                    push_color_hex(fourth_color, &mut link);
                }
                link
            }
        }
    }

    /// Convert to the client-facing object form.
    ///
    /// A three-color freeform gradient produces a three-entry color list;
    /// the absent fourth color is never emitted.
    pub fn to_object(&self) -> api::Fill {
        match *self {
            Self::Solid { color } => api::Fill::Solid { color: color as i32 },
            Self::Gradient {
                top_color,
                bottom_color,
                rotation_angle,
            } => api::Fill::Gradient {
                top_color: top_color as i32,
                bottom_color: bottom_color as i32,
                rotation_angle,
            },
            Self::FreeformGradient {
                first_color,
                second_color,
                third_color,
                fourth_color,
            } => {
                let mut colors = vec![first_color as i32, second_color as i32, third_color as i32];
                if let Some(fourth_color) = fourth_color {
                    colors.push(fourth_color as i32);
                }
                api::Fill::FreeformGradient { colors }
            }
        }
    }

    /// Stable 64-bit identifier of the fill.
    ///
    /// The three variants map to disjoint ranges: solid ids are
    /// `1..=0x1000000`, gradient ids lie strictly between the solid range
    /// and `0x8000008000008`, and freeform ids occupy
    /// `0x8000008000008..0x10000010000010`. The arithmetic is shared
    /// with the remote service and must stay bit-exact; the freeform hash
    /// is a wrapping polynomial and therefore not collision-free, but its
    /// range never overlaps the other two.
    pub fn id(&self) -> i64 {
        match *self {
            Self::Solid { color } => i64::from(color) + 1,
            Self::Gradient {
                top_color,
                bottom_color,
                rotation_angle,
            } => {
                i64::from(rotation_angle / 45) * GRADIENT_ROTATION_STEP
                    + (i64::from(top_color) << 24)
                    + i64::from(bottom_color)
                    + (1 << 24)
                    + 1
            }
            Self::FreeformGradient {
                first_color,
                second_color,
                third_color,
                fourth_color,
            } => {
                // An absent fourth color enters the hash as -1 cast to u64.
                let fourth = fourth_color.map_or(u64::MAX, u64::from);
                let mut hash = u64::from(first_color);
                hash = hash
                    .wrapping_mul(FREEFORM_ID_MUL)
                    .wrapping_add(u64::from(second_color));
                hash = hash
                    .wrapping_mul(FREEFORM_ID_MUL)
                    .wrapping_add(u64::from(third_color));
                hash = hash.wrapping_mul(FREEFORM_ID_MUL).wrapping_add(fourth);
                FREEFORM_ID_BASE + (hash % FREEFORM_ID_BASE as u64) as i64
            }
        }
    }

    /// Whether `id` falls within one of the three fill id ranges.
    #[inline]
    pub const fn is_valid_id(id: i64) -> bool {
        0 < id && id < 2 * FREEFORM_ID_BASE
    }

    /// Whether every populated color is dark, i.e. has the high bit of all
    /// three channels unset.
    pub fn is_dark(&self) -> bool {
        const HIGH_BITS: u32 = 0x80_8080;
        match *self {
            Self::Solid { color } => color & HIGH_BITS == 0,
            Self::Gradient {
                top_color,
                bottom_color,
                ..
            } => top_color & HIGH_BITS == 0 && bottom_color & HIGH_BITS == 0,
            Self::FreeformGradient {
                first_color,
                second_color,
                third_color,
                fourth_color,
            } => {
                first_color & HIGH_BITS == 0
                    && second_color & HIGH_BITS == 0
                    && third_color & HIGH_BITS == 0
                    && fourth_color.is_none_or(|color| color & HIGH_BITS == 0)
            }
        }
    }

    /// Wire values for the four color slots.
    ///
    /// Unpopulated slots carry the values the wire schema expects: a solid
    /// fill mirrors its color into the second slot, and missing third and
    /// fourth colors are the `-1` sentinel.
    pub(crate) fn wire_colors(&self) -> (i32, i32, i32, i32) {
        match *self {
            Self::Solid { color } => (color as i32, color as i32, -1, -1),
            Self::Gradient {
                top_color,
                bottom_color,
                ..
            } => (top_color as i32, bottom_color as i32, -1, -1),
            Self::FreeformGradient {
                first_color,
                second_color,
                third_color,
                fourth_color,
            } => (
                first_color as i32,
                second_color as i32,
                third_color as i32,
                fourth_color.map_or(-1, |color| color as i32),
            ),
        }
    }

    /// Rotation written to the wire; only gradients carry one.
    pub(crate) fn wire_rotation(&self) -> i32 {
        match *self {
            Self::Gradient { rotation_angle, .. } => rotation_angle,
            _ => 0,
        }
    }

    /// Presence flags contributed by the fill's populated color slots.
    pub(crate) fn wire_color_flags(&self) -> SettingsFlags {
        let mut flags = SettingsFlags::BACKGROUND_COLOR;
        match *self {
            Self::Solid { .. } => {}
            Self::Gradient { .. } => flags |= SettingsFlags::SECOND_BACKGROUND_COLOR,
            Self::FreeformGradient { fourth_color, .. } => {
                flags |=
                    SettingsFlags::SECOND_BACKGROUND_COLOR | SettingsFlags::THIRD_BACKGROUND_COLOR;
                if fourth_color.is_some() {
                    flags |= SettingsFlags::FOURTH_BACKGROUND_COLOR;
                }
            }
        }
        flags
    }
}
