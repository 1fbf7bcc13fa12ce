//! Signed SMPTE Timecode Library for Transcode
//!
//! This crate converts between SMPTE timecode strings and signed frame
//! numbers, and provides arithmetic and comparison over them:
//!
//! - **Signed timecode**: frames before `00:00:00:00` render as `-HH:MM:SS:FF`
//! - **Drop-frame**: 29.97 and 59.94 fps skip frame labels to track wall-clock time
//! - **Fractional seconds**: `HH:MM:SS.sss` at any rate
//! - **Milliseconds**: the `ms` pseudo-rate (1000 fps) with `HH:MM:SS.mmm` fields
//! - **Rational rates**: `30000/1001`, `(24000, 1001)` and friends
//! - **24-hour rollover** when rendering
//!
//! # Quick Start
//!
//! ```rust
//! use transcode_stimecode::STimecode;
//!
//! // Parse from string
//! let tc = STimecode::new(25, "00:00:01:05").unwrap();
//! assert_eq!(tc.frame_number(), 30);
//!
//! // Arithmetic produces new timecodes
//! let earlier = (&tc - 60).unwrap();
//! assert_eq!(earlier.to_string(), "-00:00:01:05");
//! ```
//!
//! # Drop-Frame Timecode
//!
//! ```rust
//! use transcode_stimecode::STimecode;
//!
//! let tc = STimecode::from_frame_number("29.97", 1800).unwrap();
//! assert_eq!(tc.to_string(), "00:01:00;02");
//! ```
//!
//! # Comparisons
//!
//! Timecodes at different framerates never compare equal, less or greater:
//!
//! ```rust
//! use transcode_stimecode::STimecode;
//!
//! let film = STimecode::from_frame_number(24, 10).unwrap();
//! let pal = STimecode::from_frame_number(25, 10).unwrap();
//! assert!(film != pal);
//! assert!(film.partial_cmp(&pal).is_none());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod codec;
pub mod dropframe;
pub mod error;
pub mod fields;
pub mod framerate;
pub mod ops;
pub mod parse;
pub mod rational;
pub mod stimecode;

// Re-export main types
pub use codec::{decode_timecode, encode_timecode, fields_to_frame_number, frame_number_to_fields};
pub use error::{Result, TimecodeError};
pub use fields::{format_fields, DisplayMode, FrameField, Sign, TimecodeFields};
pub use framerate::{parse_framerate, Framerate, FramerateSpec};
pub use ops::{Comparison, Operand};
pub use parse::{parse_timecode, TimecodeInput};
pub use rational::Rational;
pub use stimecode::{STimecode, TimecodeConfig};

// Re-export drop-frame utilities
pub use dropframe::{is_dropped_frame, DropFrameConfig};

/// Framerate literals with dedicated handling.
pub const KNOWN_FRAMERATES: &[&str] = &[
    "23.976", "23.98", "24", "25", "29.97", "30", "50", "59.94", "60", "ms", "frames",
];

/// Duration between two timecodes in frames.
///
/// Only meaningful when both share a framerate; the frame numbers are
/// subtracted as they are.
#[must_use]
pub fn duration_frames(start: &STimecode, end: &STimecode) -> i64 {
    end.frame_number().saturating_sub(start.frame_number())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_framerates_resolve() {
        for spec in KNOWN_FRAMERATES {
            let rate = parse_framerate(*spec, false).unwrap();
            assert!(rate.integer_rate() >= 1, "{spec}");
        }
    }

    #[test]
    fn test_duration_frames() {
        let start = STimecode::new(24, "00:00:00:00").unwrap();
        let end = STimecode::new(24, "00:00:01:00").unwrap();
        assert_eq!(duration_frames(&start, &end), 24);
        assert_eq!(duration_frames(&end, &start), -24);
    }

    #[test]
    fn test_drop_frame_parse_roundtrip() {
        let original = "12:34:56;07";
        let tc = STimecode::new("29.97", original).unwrap();
        assert!(tc.is_drop_frame());
        assert_eq!(tc.to_string(), original);
    }

    #[test]
    fn test_negative_parse_roundtrip() {
        let original = "-12:34:56:07";
        let tc = STimecode::new(24, original).unwrap();
        assert!(tc.frame_number() < 0);
        assert_eq!(tc.to_string(), original);
    }

    #[test]
    fn test_frame_number_roundtrip() {
        for frame in [0, 1, 24, 100, 1000, 86399, -1, -86399] {
            let tc = STimecode::from_frame_number(24, frame).unwrap();
            let back = STimecode::new(24, tc.to_string()).unwrap();
            assert_eq!(frame, back.frame_number(), "Frame {} roundtrip failed", frame);
        }
    }

    #[test]
    fn test_drop_frame_roundtrip() {
        for frame in [0, 1, 29, 30, 1799, 1800, 1801, 17982, -1800] {
            let tc = STimecode::from_frame_number("29.97", frame).unwrap();
            let back = STimecode::new("29.97", tc.to_string()).unwrap();
            assert_eq!(
                frame,
                back.frame_number(),
                "Drop-frame {} roundtrip failed via {}",
                frame,
                tc
            );
        }
    }
}
