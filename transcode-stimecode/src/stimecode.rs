//! The signed timecode value type.
//!
//! An [`STimecode`] stores a single signed frame number together with its
//! resolved [`Framerate`]. Hours, minutes, seconds and frames are derived
//! on demand, so arithmetic never has to carry between fields.

use crate::codec::{decode_timecode, encode_timecode, frame_number_to_fields};
use crate::error::{Result, TimecodeError};
use crate::fields::{DisplayMode, FrameField, Sign, TimecodeFields};
use crate::framerate::{parse_framerate, Framerate, FramerateSpec};
use crate::parse::TimecodeInput;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Construction options for [`STimecode::with_config`].
///
/// When several start positions are set, the timecode wins over the frame
/// number, which wins over seconds. With none set the timecode starts at
/// `00:00:00:00`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimecodeConfig {
    /// Start timecode. Blank input (empty text, zero word) is ignored.
    pub start_timecode: Option<TimecodeInput>,
    /// Start frame number, zero or negative allowed.
    pub frame_number: Option<i64>,
    /// Start position in seconds, truncated to whole frames.
    pub start_seconds: Option<f64>,
    /// Use non-drop-frame numbering for 29.97 and 59.94.
    pub force_non_drop_frame: bool,
}

/// Signed SMPTE timecode.
///
/// Frame numbers before `00:00:00:00` are negative and render with a
/// leading `-`:
///
/// ```rust
/// use transcode_stimecode::STimecode;
///
/// let tc = STimecode::from_frame_number(25, -30).unwrap();
/// assert_eq!(tc.to_string(), "-00:00:01:05");
/// assert_eq!(tc.frames(), 31);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct STimecode {
    pub(crate) framerate: Framerate,
    pub(crate) frame_number: i64,
    pub(crate) force_non_drop_frame: bool,
    pub(crate) mode: DisplayMode,
}

impl STimecode {
    /// Create a timecode from construction options.
    pub fn with_config(
        framerate: impl Into<FramerateSpec>,
        config: TimecodeConfig,
    ) -> Result<Self> {
        let framerate = parse_framerate(framerate, config.force_non_drop_frame)?;
        let mut tc = Self::from_parts(framerate, 0, config.force_non_drop_frame);

        if let Some(input) = config.start_timecode.filter(|input| !input.is_blank()) {
            tc.set_timecode(input)?;
        } else if let Some(frame_number) = config.frame_number {
            tc.frame_number = frame_number;
        } else if let Some(seconds) = config.start_seconds {
            tc.frame_number = tc.seconds_to_frame_number(seconds);
        }

        Ok(tc)
    }

    /// Parse a timecode at the given framerate.
    ///
    /// ```rust
    /// use transcode_stimecode::STimecode;
    ///
    /// let tc = STimecode::new("29.97", "00:01:00;02").unwrap();
    /// assert_eq!(tc.frame_number(), 1800);
    /// ```
    pub fn new(
        framerate: impl Into<FramerateSpec>,
        timecode: impl Into<TimecodeInput>,
    ) -> Result<Self> {
        Self::with_config(
            framerate,
            TimecodeConfig {
                start_timecode: Some(timecode.into()),
                ..Default::default()
            },
        )
    }

    /// Create a timecode at a frame number.
    pub fn from_frame_number(
        framerate: impl Into<FramerateSpec>,
        frame_number: i64,
    ) -> Result<Self> {
        Self::with_config(
            framerate,
            TimecodeConfig {
                frame_number: Some(frame_number),
                ..Default::default()
            },
        )
    }

    /// Create a timecode from seconds, truncated to whole frames.
    pub fn from_seconds(framerate: impl Into<FramerateSpec>, seconds: f64) -> Result<Self> {
        Self::with_config(
            framerate,
            TimecodeConfig {
                start_seconds: Some(seconds),
                ..Default::default()
            },
        )
    }

    /// Build from an already resolved framerate.
    pub(crate) fn from_parts(
        framerate: Framerate,
        frame_number: i64,
        force_non_drop_frame: bool,
    ) -> Self {
        let mode = DisplayMode::for_framerate(&framerate);
        Self {
            framerate,
            frame_number,
            force_non_drop_frame,
            mode,
        }
    }

    /// A fresh timecode at this framerate and drop-frame policy.
    pub(crate) fn derive(&self, frame_number: i64) -> Self {
        Self::from_parts(self.framerate.clone(), frame_number, self.force_non_drop_frame)
    }

    fn seconds_to_frame_number(&self, seconds: f64) -> i64 {
        (seconds * self.framerate.integer_rate() as f64).trunc() as i64
    }

    /// The resolved framerate.
    #[must_use]
    pub fn framerate(&self) -> &Framerate {
        &self.framerate
    }

    /// Signed, zero-based frame number.
    #[must_use]
    pub fn frame_number(&self) -> i64 {
        self.frame_number
    }

    /// Set the signed frame number.
    pub fn set_frame_number(&mut self, frame_number: i64) {
        self.frame_number = frame_number;
    }

    /// 1-based frame count, `|frame_number| + 1`.
    #[must_use]
    pub fn frames(&self) -> i64 {
        self.frame_number.saturating_abs().saturating_add(1)
    }

    /// Set the 1-based frame count. The frame number becomes `frames - 1`.
    pub fn set_frames(&mut self, frames: i64) -> Result<()> {
        if frames < 1 {
            return Err(TimecodeError::invalid_frame_count(frames));
        }
        self.frame_number = frames - 1;
        Ok(())
    }

    /// Decode a timecode and move to it.
    ///
    /// Fractional-second text switches the display to fractional mode.
    pub fn set_timecode(&mut self, timecode: impl Into<TimecodeInput>) -> Result<()> {
        let decoded = decode_timecode(timecode, &self.framerate, self.mode)?;
        if decoded.fractional && !self.mode.fractional {
            debug!(frame_number = decoded.frame_number, "switching to fractional display");
            self.mode.fractional = true;
        }
        self.frame_number = decoded.frame_number;
        Ok(())
    }

    /// Sign of the frame number.
    #[must_use]
    pub fn sign(&self) -> Sign {
        Sign::of(self.frame_number)
    }

    /// Encoded fields for the current frame number.
    #[must_use]
    pub fn fields(&self) -> TimecodeFields {
        frame_number_to_fields(self.frame_number, &self.framerate, self.mode)
    }

    /// Hours field.
    #[must_use]
    pub fn hours(&self) -> u32 {
        self.fields().hours
    }

    /// Minutes field.
    #[must_use]
    pub fn minutes(&self) -> u32 {
        self.fields().minutes
    }

    /// Seconds field.
    #[must_use]
    pub fn seconds(&self) -> u32 {
        self.fields().seconds
    }

    /// Frames field (a fraction of a second in fractional mode).
    #[must_use]
    pub fn frame_field(&self) -> FrameField {
        self.fields().frames
    }

    /// Frame number in seconds at the integer rate.
    #[must_use]
    pub fn as_seconds(&self) -> f64 {
        self.frame_number as f64 / self.framerate.integer_rate() as f64
    }

    /// Whether drop-frame numbering is in use.
    #[must_use]
    pub fn is_drop_frame(&self) -> bool {
        self.framerate.is_drop_frame()
    }

    /// Whether 29.97/59.94 were forced to non-drop numbering.
    #[must_use]
    pub fn force_non_drop_frame(&self) -> bool {
        self.force_non_drop_frame
    }

    /// Current display mode.
    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Whether the last field renders as a fraction of a second.
    #[must_use]
    pub fn is_fractional(&self) -> bool {
        self.mode.fractional
    }

    /// Whether the last field renders as milliseconds.
    #[must_use]
    pub fn is_millisecond(&self) -> bool {
        self.mode.milliseconds
    }

    /// Toggle fractional-second display.
    pub fn set_fractional(&mut self, state: bool) {
        self.mode.fractional = state;
    }

    /// Toggle millisecond display.
    pub fn set_millisecond(&mut self, state: bool) {
        self.mode.milliseconds = state;
    }

    /// Step one frame forward.
    pub fn next_frame(&mut self) -> Result<&mut Self> {
        self.add_frame_number(1)?;
        Ok(self)
    }

    /// Step one frame back.
    pub fn back(&mut self) -> Result<&mut Self> {
        self.sub_frame_number(1)?;
        Ok(self)
    }

    /// Add to the frame number in place.
    pub fn add_frame_number(&mut self, frames: i64) -> Result<()> {
        self.frame_number = self
            .frame_number
            .checked_add(frames)
            .ok_or(TimecodeError::Overflow)?;
        Ok(())
    }

    /// Subtract from the frame number in place.
    pub fn sub_frame_number(&mut self, frames: i64) -> Result<()> {
        let negated = frames.checked_neg().ok_or(TimecodeError::Overflow)?;
        self.add_frame_number(negated)
    }

    /// Multiply the frame number in place.
    pub fn mult_frame_number(&mut self, factor: i64) -> Result<()> {
        self.frame_number = self
            .frame_number
            .checked_mul(factor)
            .ok_or(TimecodeError::Overflow)?;
        Ok(())
    }

    /// Divide the frame number in place, truncating toward zero.
    pub fn div_frame_number(&mut self, divisor: i64) -> Result<()> {
        if divisor == 0 {
            return Err(TimecodeError::DivisionByZero);
        }
        self.frame_number = self
            .frame_number
            .checked_div(divisor)
            .ok_or(TimecodeError::Overflow)?;
        Ok(())
    }

    /// Same as [`add_frame_number`](Self::add_frame_number).
    pub fn add_frames(&mut self, frames: i64) -> Result<()> {
        self.add_frame_number(frames)
    }

    /// Same as [`sub_frame_number`](Self::sub_frame_number).
    pub fn sub_frames(&mut self, frames: i64) -> Result<()> {
        self.sub_frame_number(frames)
    }

    /// Scale the 1-based frame count: `frames = (frame_number + sign) * factor`.
    ///
    /// Fails without modifying `self` when the new count is below 1, which
    /// is always the case for negative timecodes scaled by a positive factor.
    pub fn mult_frames(&mut self, factor: i64) -> Result<()> {
        let count = self
            .signed_count()?
            .checked_mul(factor)
            .ok_or(TimecodeError::Overflow)?;
        self.set_frames(count)
    }

    /// Divide the 1-based frame count: `frames = (frame_number + sign) / divisor`.
    pub fn div_frames(&mut self, divisor: i64) -> Result<()> {
        if divisor == 0 {
            return Err(TimecodeError::DivisionByZero);
        }
        let count = self
            .signed_count()?
            .checked_div(divisor)
            .ok_or(TimecodeError::Overflow)?;
        self.set_frames(count)
    }

    /// `frame_number + sign`, the signed 1-based count.
    pub(crate) fn signed_count(&self) -> Result<i64> {
        self.frame_number
            .checked_add(self.sign().as_i64())
            .ok_or(TimecodeError::Overflow)
    }
}

impl fmt::Display for STimecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_timecode(self.frame_number, &self.framerate, self.mode))
    }
}

impl From<&STimecode> for TimecodeInput {
    fn from(tc: &STimecode) -> Self {
        Self::Timecode {
            frame_number: tc.frame_number,
        }
    }
}
