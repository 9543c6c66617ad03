//! Complete background descriptions and their link grammar.
//!
//! A [`BackgroundType`] combines a fill with the modifiers a share link can
//! carry: blur, parallax motion, and pattern intensity. It owns the
//! link-level query grammar (`mode`, `intensity`, `bg_color`, `rotation`)
//! and the conversions to the client-facing and wire representations.

use std::fmt;

use crate::api;
use crate::common::error::{Error, Result};
use crate::common::query::{QueryParams, parse_loose_i32};
use crate::common::validate::is_valid_intensity;
use crate::diag::{DiagnosticSink, WireAnomaly};
use crate::fill::BackgroundFill;
use crate::wire::{SettingsFlags, WallpaperSettings};

/// A complete background description.
///
/// # Examples
///
/// ```rust
/// use backdrop::{BackgroundFill, BackgroundType};
///
/// let mut background = BackgroundType::Pattern {
///     fill: BackgroundFill::Solid { color: 0 },
///     intensity: 0,
///     is_moving: false,
/// };
/// background.apply_parameters_from_link("intensity=-50&bg_color=ff0000");
/// assert_eq!(background.get_link(), "intensity=-50&bg_color=ff0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundType {
    /// Full-size wallpaper image with optional blur and parallax motion.
    Wallpaper { is_blurred: bool, is_moving: bool },
    /// Pattern image drawn over a fill at the given intensity. Patterns
    /// cannot be blurred.
    Pattern {
        fill: BackgroundFill,
        intensity: i32,
        is_moving: bool,
    },
    /// Plain fill without an image.
    Fill { fill: BackgroundFill },
}

impl BackgroundType {
    /// Apply the query parameters of a background link to this type.
    ///
    /// Resets blur and motion, then reads the space-separated `mode`
    /// tokens (`blur` is ignored for patterns, `motion` applies to any
    /// type that carries it). For patterns only: `intensity` (missing or
    /// invalid values become 50) and `bg_color`, re-parsed as a fill with
    /// the `rotation` parameter forwarded. A malformed `bg_color` leaves
    /// the current fill unchanged.
    pub fn apply_parameters_from_link(&mut self, parameters: &str) {
        let query = QueryParams::parse(parameters);

        let is_pattern = matches!(self, Self::Pattern { .. });
        let mut blurred = false;
        let mut moving = false;
        for token in query.get("mode").unwrap_or("").split(' ') {
            if !is_pattern && token.eq_ignore_ascii_case("blur") {
                blurred = true;
            }
            if token.eq_ignore_ascii_case("motion") {
                moving = true;
            }
        }

        match self {
            Self::Wallpaper {
                is_blurred,
                is_moving,
            } => {
                *is_blurred = blurred;
                *is_moving = moving;
            }
            Self::Pattern {
                fill,
                intensity,
                is_moving,
            } => {
                *is_moving = moving;

                let mut new_intensity = match query.get("intensity") {
                    Some(value) if !value.is_empty() => parse_loose_i32(value),
                    _ => -101,
                };
                if !is_valid_intensity(new_intensity) {
                    new_intensity = 50;
                }
                *intensity = new_intensity;

                if let Some(bg_color) = query.get("bg_color") {
                    if !bg_color.is_empty() {
                        let rotation = query.get("rotation").unwrap_or("");
                        let candidate = format!(
                            "{}?rotation={}",
                            urlencoding::encode(bg_color),
                            urlencoding::encode(rotation)
                        );
                        if let Ok(new_fill) = BackgroundFill::from_link(&candidate) {
                            *fill = new_fill;
                        }
                    }
                }
            }
            Self::Fill { .. } => {}
        }
    }

    /// Format the background as the query part of a share link.
    ///
    /// A wallpaper without modifiers yields an empty string; a plain fill
    /// yields its fill text directly, so a gradient's rotation starts the
    /// query with `?`.
    pub fn get_link(&self) -> String {
        let mut mode = String::new();
        let (blurred, moving) = match *self {
            Self::Wallpaper {
                is_blurred,
                is_moving,
            } => (is_blurred, is_moving),
            Self::Pattern { is_moving, .. } => (false, is_moving),
            Self::Fill { .. } => (false, false),
        };
        if blurred {
            mode.push_str("blur");
        }
        if moving {
            if !mode.is_empty() {
                mode.push('+');
            }
            mode.push_str("motion");
        }

        match *self {
            Self::Wallpaper { .. } => {
                if mode.is_empty() {
                    String::new()
                } else {
                    let mut link = String::with_capacity(16);
                    link.push_str("mode=");
                    link.push_str(&mode);
                    link
                }
            }
            Self::Pattern {
                ref fill,
                intensity,
                ..
            } => {
                let mut buffer = itoa::Buffer::new();
                let mut link = String::with_capacity(64);
                link.push_str("intensity=");
                link.push_str(buffer.format(intensity));
                link.push_str("&bg_color=");
                link.push_str(&fill.to_link(false));
                if !mode.is_empty() {
                    link.push_str("&mode=");
                    link.push_str(&mode);
                }
                link
            }
            Self::Fill { ref fill } => fill.to_link(true),
        }
    }

    /// Build a background from a client-facing object, rejecting invalid
    /// input.
    ///
    /// Fills go through the strict fill path; a pattern's intensity must
    /// lie in `[-100, 100]`.
    pub fn from_object(object: Option<&api::Background>) -> Result<Self> {
        let Some(object) = object else {
            return Err(Error::MissingType);
        };
        match *object {
            api::Background::Wallpaper {
                is_blurred,
                is_moving,
            } => Ok(Self::Wallpaper {
                is_blurred,
                is_moving,
            }),
            api::Background::Pattern {
                ref fill,
                intensity,
                is_moving,
            } => {
                let fill = BackgroundFill::from_object(Some(fill))?;
                if !is_valid_intensity(intensity) {
                    return Err(Error::WrongIntensity);
                }
                Ok(Self::Pattern {
                    fill,
                    intensity,
                    is_moving,
                })
            }
            api::Background::Fill { ref fill } => Ok(Self::Fill {
                fill: BackgroundFill::from_object(Some(fill))?,
            }),
        }
    }

    /// Read a background from wire settings.
    ///
    /// Lenient: never fails, and consumes the settings. `is_pattern`
    /// selects between a pattern over the decoded fill and a plain
    /// wallpaper, which is how the remote service tells the two apart.
    /// A flagged intensity outside `[-100, 100]` is reset to 50 with a
    /// diagnostic; an unflagged one is 0.
    pub fn from_wire(
        is_pattern: bool,
        settings: Option<WallpaperSettings>,
        diagnostics: &dyn DiagnosticSink,
    ) -> Self {
        let fill = BackgroundFill::from_wire(settings.as_ref(), diagnostics);
        let mut is_blurred = false;
        let mut is_moving = false;
        let mut intensity = 0;
        if let Some(settings) = settings {
            is_blurred = settings.flags.contains(SettingsFlags::BLUR);
            is_moving = settings.flags.contains(SettingsFlags::MOTION);
            if settings.flags.contains(SettingsFlags::INTENSITY) {
                intensity = settings.intensity;
                if !is_valid_intensity(intensity) {
                    diagnostics.report(WireAnomaly::InvalidIntensity { value: intensity });
                    intensity = 50;
                }
            }
        }
        if is_pattern {
            Self::Pattern {
                fill,
                intensity,
                is_moving,
            }
        } else {
            Self::Wallpaper {
                is_blurred,
                is_moving,
            }
        }
    }

    /// Convert to the client-facing object form.
    pub fn to_object(&self) -> api::Background {
        match *self {
            Self::Wallpaper {
                is_blurred,
                is_moving,
            } => api::Background::Wallpaper {
                is_blurred,
                is_moving,
            },
            Self::Pattern {
                ref fill,
                intensity,
                is_moving,
            } => api::Background::Pattern {
                fill: fill.to_object(),
                intensity,
                is_moving,
            },
            Self::Fill { ref fill } => api::Background::Fill {
                fill: fill.to_object(),
            },
        }
    }

    /// Serialize to wire settings.
    ///
    /// Only patterns and plain fills carry a fill; calling this on a
    /// wallpaper is a programming error and panics. All value fields are
    /// written unconditionally; the flag mask records which of them the
    /// receiver should trust, with the intensity flag set only for a
    /// non-zero intensity.
    pub fn to_wire(&self) -> WallpaperSettings {
        let (fill, intensity, is_moving) = match *self {
            Self::Wallpaper { .. } => {
                panic!("wallpaper backgrounds have no wire settings representation")
            }
            Self::Pattern {
                ref fill,
                intensity,
                is_moving,
            } => (fill, intensity, is_moving),
            Self::Fill { ref fill } => (fill, 0, false),
        };

        let mut flags = fill.wire_color_flags();
        if is_moving {
            flags |= SettingsFlags::MOTION;
        }
        if intensity != 0 {
            flags |= SettingsFlags::INTENSITY;
        }

        let (background_color, second_background_color, third_background_color, fourth_background_color) =
            fill.wire_colors();
        WallpaperSettings {
            flags,
            background_color,
            second_background_color,
            third_background_color,
            fourth_background_color,
            intensity,
            rotation: fill.wire_rotation(),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Wallpaper { .. } => "Wallpaper",
            Self::Pattern { .. } => "Pattern",
            Self::Fill { .. } => "Fill",
        }
    }
}

impl fmt::Display for BackgroundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {}[{}]", self.kind_name(), self.get_link())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingSink(RefCell<Vec<WireAnomaly>>);

    impl DiagnosticSink for RecordingSink {
        fn report(&self, anomaly: WireAnomaly) {
            self.0.borrow_mut().push(anomaly);
        }
    }

    fn pattern(fill: BackgroundFill, intensity: i32) -> BackgroundType {
        BackgroundType::Pattern {
            fill,
            intensity,
            is_moving: false,
        }
    }

    #[test]
    fn test_apply_parameters_mode_tokens() {
        let mut wallpaper = BackgroundType::Wallpaper {
            is_blurred: false,
            is_moving: false,
        };
        wallpaper.apply_parameters_from_link("mode=blur+motion");
        assert_eq!(
            wallpaper,
            BackgroundType::Wallpaper {
                is_blurred: true,
                is_moving: true,
            }
        );

        // Parameters always reset the previous modifiers.
        wallpaper.apply_parameters_from_link("mode=MOTION");
        assert_eq!(
            wallpaper,
            BackgroundType::Wallpaper {
                is_blurred: false,
                is_moving: true,
            }
        );
    }

    #[test]
    fn test_apply_parameters_blur_is_ignored_for_patterns() {
        let mut background = pattern(BackgroundFill::Solid { color: 0 }, 50);
        background.apply_parameters_from_link("intensity=50&mode=blur+motion");
        assert_eq!(
            background,
            BackgroundType::Pattern {
                fill: BackgroundFill::Solid { color: 0 },
                intensity: 50,
                is_moving: true,
            }
        );
    }

    #[test]
    fn test_apply_parameters_pattern_round_trip() {
        let mut background = pattern(BackgroundFill::Solid { color: 0xFFFFFF }, 0);
        background.apply_parameters_from_link("intensity=-50&bg_color=ff0000");
        assert_eq!(background.get_link(), "intensity=-50&bg_color=ff0000");
    }

    #[test]
    fn test_apply_parameters_intensity_defaults_to_50() {
        let mut background = pattern(BackgroundFill::Solid { color: 0 }, 10);
        background.apply_parameters_from_link("bg_color=ff0000");
        assert_eq!(background, pattern(BackgroundFill::Solid { color: 0xFF0000 }, 50));

        let mut background = pattern(BackgroundFill::Solid { color: 0 }, 10);
        background.apply_parameters_from_link("intensity=999");
        assert_eq!(background, pattern(BackgroundFill::Solid { color: 0 }, 50));

        let mut background = pattern(BackgroundFill::Solid { color: 0 }, 10);
        background.apply_parameters_from_link("intensity=");
        assert_eq!(background, pattern(BackgroundFill::Solid { color: 0 }, 50));
    }

    #[test]
    fn test_apply_parameters_bad_bg_color_keeps_fill() {
        let fill = BackgroundFill::Solid { color: 0x123456 };
        let mut background = pattern(fill, 0);
        background.apply_parameters_from_link("intensity=40&bg_color=nothex");
        assert_eq!(background, pattern(fill, 40));
    }

    #[test]
    fn test_apply_parameters_forwards_rotation_to_bg_color() {
        let mut background = pattern(BackgroundFill::Solid { color: 0 }, 0);
        background.apply_parameters_from_link("intensity=40&bg_color=ff0000-00ff00&rotation=90");
        assert_eq!(
            background,
            pattern(
                BackgroundFill::Gradient {
                    top_color: 0xFF0000,
                    bottom_color: 0x00FF00,
                    rotation_angle: 90,
                },
                40,
            )
        );
    }

    #[test]
    fn test_get_link_shapes() {
        let wallpaper = BackgroundType::Wallpaper {
            is_blurred: false,
            is_moving: false,
        };
        assert_eq!(wallpaper.get_link(), "");

        let wallpaper = BackgroundType::Wallpaper {
            is_blurred: true,
            is_moving: true,
        };
        assert_eq!(wallpaper.get_link(), "mode=blur+motion");

        let background = BackgroundType::Pattern {
            fill: BackgroundFill::Gradient {
                top_color: 0xFF0000,
                bottom_color: 0x00FF00,
                rotation_angle: 45,
            },
            intensity: 50,
            is_moving: true,
        };
        assert_eq!(
            background.get_link(),
            "intensity=50&bg_color=ff0000-00ff00&rotation=45&mode=motion"
        );

        let background = BackgroundType::Fill {
            fill: BackgroundFill::Gradient {
                top_color: 0xFF0000,
                bottom_color: 0x00FF00,
                rotation_angle: 45,
            },
        };
        assert_eq!(background.get_link(), "ff0000-00ff00?rotation=45");
    }

    #[test]
    fn test_from_object_strict_validation() {
        assert_eq!(BackgroundType::from_object(None), Err(Error::MissingType));

        let object = api::Background::Pattern {
            fill: api::Fill::Solid { color: 0 },
            intensity: 101,
            is_moving: false,
        };
        assert_eq!(
            BackgroundType::from_object(Some(&object)),
            Err(Error::WrongIntensity)
        );

        // A bad fill takes precedence over a bad intensity.
        let object = api::Background::Pattern {
            fill: api::Fill::Solid { color: -1 },
            intensity: 101,
            is_moving: false,
        };
        assert_eq!(
            BackgroundType::from_object(Some(&object)),
            Err(Error::InvalidSolidColor)
        );
    }

    #[test]
    fn test_object_round_trip() {
        let backgrounds = [
            BackgroundType::Wallpaper {
                is_blurred: true,
                is_moving: false,
            },
            pattern(BackgroundFill::Solid { color: 0xFF0000 }, -50),
            BackgroundType::Fill {
                fill: BackgroundFill::FreeformGradient {
                    first_color: 1,
                    second_color: 2,
                    third_color: 3,
                    fourth_color: None,
                },
            },
        ];
        for background in backgrounds {
            assert_eq!(
                BackgroundType::from_object(Some(&background.to_object())),
                Ok(background)
            );
        }
    }

    #[test]
    fn test_to_wire_flag_mask() {
        let background = pattern(BackgroundFill::Solid { color: 0xFF0000 }, 0);
        let settings = background.to_wire();
        assert_eq!(settings.flags, SettingsFlags::BACKGROUND_COLOR);
        assert_eq!(settings.background_color, 0xFF0000);
        assert_eq!(settings.third_background_color, -1);
        assert_eq!(settings.fourth_background_color, -1);
        assert_eq!(settings.intensity, 0);

        let background = BackgroundType::Pattern {
            fill: BackgroundFill::Gradient {
                top_color: 1,
                bottom_color: 2,
                rotation_angle: 90,
            },
            intensity: -50,
            is_moving: true,
        };
        let settings = background.to_wire();
        assert_eq!(
            settings.flags,
            SettingsFlags::BACKGROUND_COLOR
                | SettingsFlags::SECOND_BACKGROUND_COLOR
                | SettingsFlags::INTENSITY
                | SettingsFlags::MOTION
        );
        assert_eq!(settings.rotation, 90);
        assert_eq!(settings.intensity, -50);

        let background = BackgroundType::Fill {
            fill: BackgroundFill::FreeformGradient {
                first_color: 1,
                second_color: 2,
                third_color: 3,
                fourth_color: Some(4),
            },
        };
        let settings = background.to_wire();
        assert_eq!(
            settings.flags,
            SettingsFlags::BACKGROUND_COLOR
                | SettingsFlags::SECOND_BACKGROUND_COLOR
                | SettingsFlags::THIRD_BACKGROUND_COLOR
                | SettingsFlags::FOURTH_BACKGROUND_COLOR
        );
        assert_eq!(settings.fourth_background_color, 4);
    }

    #[test]
    #[should_panic(expected = "no wire settings")]
    fn test_to_wire_panics_for_wallpapers() {
        let background = BackgroundType::Wallpaper {
            is_blurred: false,
            is_moving: false,
        };
        let _ = background.to_wire();
    }

    #[test]
    fn test_wire_round_trip_preserves_fill_and_intensity() {
        let sink = RecordingSink::default();
        let fills = [
            BackgroundFill::Solid { color: 0xABCDEF },
            BackgroundFill::Gradient {
                top_color: 0xFF0000,
                bottom_color: 0x00FF00,
                rotation_angle: 135,
            },
            BackgroundFill::FreeformGradient {
                first_color: 1,
                second_color: 2,
                third_color: 3,
                fourth_color: None,
            },
            BackgroundFill::FreeformGradient {
                first_color: 1,
                second_color: 2,
                third_color: 3,
                fourth_color: Some(4),
            },
        ];
        for fill in fills {
            let background = BackgroundType::Pattern {
                fill,
                intensity: -73,
                is_moving: true,
            };
            let decoded = BackgroundType::from_wire(true, Some(background.to_wire()), &sink);
            assert_eq!(decoded, background);

            // The fill survives independently of the pattern wrapper.
            let settings = BackgroundType::Fill { fill }.to_wire();
            assert_eq!(BackgroundFill::from_wire(Some(&settings), &sink), fill);
        }
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn test_from_wire_wallpaper_reads_modifier_flags() {
        let sink = RecordingSink::default();
        let settings = WallpaperSettings {
            flags: SettingsFlags::BLUR | SettingsFlags::MOTION,
            ..WallpaperSettings::default()
        };
        assert_eq!(
            BackgroundType::from_wire(false, Some(settings), &sink),
            BackgroundType::Wallpaper {
                is_blurred: true,
                is_moving: true,
            }
        );
        assert_eq!(
            BackgroundType::from_wire(false, None, &sink),
            BackgroundType::Wallpaper {
                is_blurred: false,
                is_moving: false,
            }
        );
    }

    #[test]
    fn test_from_wire_normalizes_invalid_intensity() {
        let sink = RecordingSink::default();
        let settings = WallpaperSettings {
            flags: SettingsFlags::BACKGROUND_COLOR | SettingsFlags::INTENSITY,
            background_color: 0x123456,
            intensity: 120,
            ..WallpaperSettings::default()
        };
        assert_eq!(
            BackgroundType::from_wire(true, Some(settings), &sink),
            pattern(BackgroundFill::Solid { color: 0x123456 }, 50)
        );
        assert_eq!(
            *sink.0.borrow(),
            vec![WireAnomaly::InvalidIntensity { value: 120 }]
        );
    }

    #[test]
    fn test_display() {
        let background = BackgroundType::Wallpaper {
            is_blurred: true,
            is_moving: false,
        };
        assert_eq!(background.to_string(), "type Wallpaper[mode=blur]");

        let background = BackgroundType::Fill {
            fill: BackgroundFill::Solid { color: 0xFF0000 },
        };
        assert_eq!(background.to_string(), "type Fill[ff0000]");
    }
}
