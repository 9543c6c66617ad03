//! Diagnostics for lenient wire parsing.
//!
//! Wire data is trusted enough that parsing never fails, but out-of-range
//! fields are normalized to a safe default and reported to an injected
//! sink. The sink keeps the codec free of any logging backend while still
//! letting callers log, count, or assert on anomalies.

use std::fmt;

/// Which wire color field an anomaly refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
    Background,
    SecondBackground,
    ThirdBackground,
    FourthBackground,
}

impl fmt::Display for ColorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Background => "background_color",
            Self::SecondBackground => "second_background_color",
            Self::ThirdBackground => "third_background_color",
            Self::FourthBackground => "fourth_background_color",
        })
    }
}

/// An irregularity found while reading a wire object.
///
/// Each variant names the field that was normalized and the value it held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireAnomaly {
    /// A flagged color field was outside the 24-bit RGB range; reset to 0
    InvalidColor { field: ColorField, value: i32 },
    /// The rotation field was not a multiple of 45 in [0, 360); reset to 0
    InvalidRotation { value: i32 },
    /// The flagged intensity was outside [-100, 100]; reset to 50
    InvalidIntensity { value: i32 },
}

impl fmt::Display for WireAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor { field, value } => {
                write!(f, "invalid {field} value {value}, reset to 0")
            }
            Self::InvalidRotation { value } => {
                write!(f, "invalid rotation value {value}, reset to 0")
            }
            Self::InvalidIntensity { value } => {
                write!(f, "invalid intensity value {value}, reset to 50")
            }
        }
    }
}

/// Receiver for wire anomalies.
///
/// Implementations must not fail; reporting is purely informational and
/// the parse result does not depend on it.
pub trait DiagnosticSink {
    /// Record one anomaly.
    fn report(&self, anomaly: WireAnomaly);
}

/// Sink that forwards anomalies to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, anomaly: WireAnomaly) {
        log::warn!("wallpaper settings: {anomaly}");
    }
}

/// Sink that discards all anomalies.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _anomaly: WireAnomaly) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_display_names_the_field() {
        let anomaly = WireAnomaly::InvalidColor {
            field: ColorField::ThirdBackground,
            value: -5,
        };
        assert_eq!(
            anomaly.to_string(),
            "invalid third_background_color value -5, reset to 0"
        );
        assert_eq!(
            WireAnomaly::InvalidIntensity { value: 200 }.to_string(),
            "invalid intensity value 200, reset to 50"
        );
    }
}
