//! Timecode parsing from text and packed 32-bit timecode words.

use crate::error::{Result, TimecodeError};
use crate::fields::{FrameField, Sign, TimecodeFields};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A value that can be decoded into a frame number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimecodeInput {
    /// `[-]HH:MM:SS:FF`, `[-]HH:MM:SS;FF` or `[-]HH:MM:SS.FFF`.
    Text(String),
    /// Packed word whose hex digits read as decimal `HH MM SS FF`,
    /// e.g. `0x01020304` is `01:02:03:04`. Negative words are negative
    /// timecodes.
    Packed(i64),
    /// Frame number of an existing timecode, copied as is.
    Timecode {
        /// The copied frame number.
        frame_number: i64,
    },
}

impl TimecodeInput {
    /// Whether the input is blank (empty text or a zero packed word) and
    /// should defer to the next construction source.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Packed(word) => *word == 0,
            Self::Timecode { .. } => false,
        }
    }

    /// Short name of the input kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "str",
            Self::Packed(_) => "int",
            Self::Timecode { .. } => "STimecode",
        }
    }
}

impl From<&str> for TimecodeInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TimecodeInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for TimecodeInput {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<i64> for TimecodeInput {
    fn from(word: i64) -> Self {
        Self::Packed(word)
    }
}

impl From<i32> for TimecodeInput {
    fn from(word: i32) -> Self {
        Self::Packed(word as i64)
    }
}

impl From<u32> for TimecodeInput {
    fn from(word: u32) -> Self {
        Self::Packed(word as i64)
    }
}

/// Split a timecode into fields.
///
/// Text accepts `:`, `;` and `.` interchangeably as separators and an
/// optional leading `-`. Packed words are read from their first eight hex
/// digits, two per field. An existing timecode carries a frame number
/// rather than fields and is not accepted here.
pub fn parse_timecode(input: impl Into<TimecodeInput>) -> Result<TimecodeFields> {
    match input.into() {
        TimecodeInput::Text(text) => parse_text(&text),
        TimecodeInput::Packed(word) => parse_packed(word),
        other => Err(TimecodeError::unsupported_input(other.kind())),
    }
}

fn parse_text(text: &str) -> Result<TimecodeFields> {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => (Sign::Negative, rest),
        None => (Sign::Positive, text),
    };

    let normalized = body.replace([';', '.'], ":");
    let parts: Vec<&str> = normalized.split(':').collect();
    let [hours, minutes, seconds, frames] = parts.as_slice() else {
        return Err(TimecodeError::invalid_format(format!(
            "Expected HH:MM:SS:FF, HH:MM:SS;FF or HH:MM:SS.FFF, got {text:?}"
        )));
    };

    Ok(TimecodeFields::new(
        parse_field("hours", hours)?,
        parse_field("minutes", minutes)?,
        parse_field("seconds", seconds)?,
        FrameField::Index(parse_field("frames", frames)?),
        sign,
    ))
}

fn parse_field(name: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| TimecodeError::invalid_format(format!("Invalid {name}: {value}")))
}

fn parse_packed(word: i64) -> Result<TimecodeFields> {
    let hex = format!("{:08x}", word.unsigned_abs());

    let mut groups = [0u32; 4];
    for (i, group) in groups.iter_mut().enumerate() {
        let digits = &hex[i * 2..i * 2 + 2];
        *group = digits.parse().map_err(|_| {
            TimecodeError::invalid_format(format!(
                "Packed timecode {hex} has non-decimal digits {digits}"
            ))
        })?;
    }

    let [hours, minutes, seconds, frames] = groups;
    Ok(TimecodeFields::new(
        hours,
        minutes,
        seconds,
        FrameField::Index(frames),
        Sign::of(word),
    ))
}

impl FromStr for TimecodeFields {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        parse_text(s)
    }
}
