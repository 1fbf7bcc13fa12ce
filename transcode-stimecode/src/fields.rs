//! Timecode fields and their canonical string rendering.

use crate::framerate::Framerate;
use serde::{Deserialize, Serialize};

/// Sign of a timecode relative to `00:00:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sign {
    /// At or after the origin.
    #[default]
    Positive,
    /// Before the origin.
    Negative,
}

impl Sign {
    /// Sign of a frame number; zero is positive.
    #[must_use]
    pub fn of(frame_number: i64) -> Self {
        if frame_number < 0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// `1` or `-1`.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }

    /// Whether this is [`Sign::Negative`].
    #[must_use]
    pub fn is_negative(self) -> bool {
        self == Self::Negative
    }
}

/// The last timecode field: a frame index, or a fraction of a second when
/// fractional display is on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrameField {
    /// Frame within the second (milliseconds at the `ms` rate).
    Index(u32),
    /// Fraction of a second, rounded to three decimals.
    Fraction(f64),
}

impl FrameField {
    /// Whether the field is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Index(frames) => *frames == 0,
            Self::Fraction(fraction) => *fraction == 0.0,
        }
    }

    /// The field as a float.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Index(frames) => *frames as f64,
            Self::Fraction(fraction) => *fraction,
        }
    }

    /// The field as an integer frame index (fractions truncate).
    #[must_use]
    pub fn as_index(&self) -> u32 {
        match self {
            Self::Index(frames) => *frames,
            Self::Fraction(fraction) => fraction.trunc() as u32,
        }
    }
}

impl Default for FrameField {
    fn default() -> Self {
        Self::Index(0)
    }
}

/// Hours, minutes, seconds, frames and sign of a timecode.
///
/// There is no negative zero: the sign is forced positive whenever every
/// numeric field is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimecodeFields {
    /// Hours (0-23 after encoding; unbounded when decoding)
    pub hours: u32,
    /// Minutes
    pub minutes: u32,
    /// Seconds
    pub seconds: u32,
    /// Frames or fraction of a second
    pub frames: FrameField,
    /// Sign
    pub sign: Sign,
}

impl TimecodeFields {
    /// Create fields, normalizing the sign of zero.
    #[must_use]
    pub fn new(hours: u32, minutes: u32, seconds: u32, frames: FrameField, sign: Sign) -> Self {
        let mut fields = Self {
            hours,
            minutes,
            seconds,
            frames,
            sign,
        };
        if fields.is_zero() {
            fields.sign = Sign::Positive;
        }
        fields
    }

    /// Whether every numeric field is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.frames.is_zero()
    }
}

/// Formatting flags that can change after construction.
///
/// Neither flag affects the stored frame number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayMode {
    /// Render the last field as a fraction of a second (`HH:MM:SS.sss`).
    pub fractional: bool,
    /// Render the last field as three-digit milliseconds.
    pub milliseconds: bool,
}

impl DisplayMode {
    /// Default display mode for a framerate.
    #[must_use]
    pub fn for_framerate(rate: &Framerate) -> Self {
        Self {
            fractional: false,
            milliseconds: rate.is_ms(),
        }
    }
}

/// Separator between seconds and frames.
#[must_use]
pub fn frame_delimiter(rate: &Framerate, mode: DisplayMode) -> char {
    if rate.is_drop_frame() {
        ';'
    } else if mode.milliseconds || mode.fractional {
        '.'
    } else {
        ':'
    }
}

/// Render fields as `[-]HH:MM:SS:FF`, `[-]HH:MM:SS;FF`, `[-]HH:MM:SS.mmm`
/// or, in fractional mode, `[-]HH:MM:SS.sss`.
#[must_use]
pub fn format_fields(fields: &TimecodeFields, rate: &Framerate, mode: DisplayMode) -> String {
    let sign = if fields.sign.is_negative() { "-" } else { "" };

    if mode.fractional {
        let seconds = fields.seconds as f64 + fields.frames.as_f64();
        return format!(
            "{sign}{:02}:{:02}:{seconds:06.3}",
            fields.hours, fields.minutes
        );
    }

    let width = if mode.milliseconds { 3 } else { 2 };
    format!(
        "{sign}{:02}:{:02}:{:02}{}{:0width$}",
        fields.hours,
        fields.minutes,
        fields.seconds,
        frame_delimiter(rate, mode),
        fields.frames.as_index(),
    )
}
