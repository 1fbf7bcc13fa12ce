//! Property-based tests for signed timecode conversion.
//!
//! Uses proptest to check that rendering a frame number and parsing the
//! result gives the same frame number back at every supported framerate.

use proptest::prelude::*;
use transcode_stimecode::{DropFrameConfig, STimecode, TimecodeError};

const RATES: &[&str] = &[
    "23.976", "23.98", "24", "25", "29.97", "30", "50", "59.94", "60", "ms", "frames",
    "30000/1001", "60000/1001",
];

fn frames_per_day(rate: &str) -> i64 {
    let tc = STimecode::from_frame_number(rate, 0).unwrap();
    DropFrameConfig::for_framerate(tc.framerate()).frames_per_24_hours
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

proptest! {
    /// Any frame within a day survives encode then decode, at every rate.
    #[test]
    fn roundtrip_within_a_day(rate in prop::sample::select(RATES), position in -1.0f64..1.0) {
        let limit = frames_per_day(rate) - 1;
        let frame_number = (position * limit as f64) as i64;

        let tc = STimecode::from_frame_number(rate, frame_number).unwrap();
        let back = STimecode::new(rate, tc.to_string()).unwrap();

        prop_assert_eq!(back.frame_number(), frame_number, "via {}", tc);
    }

    /// Forced non-drop NTSC timecodes round-trip on the 30/60 fps grid.
    #[test]
    fn roundtrip_forced_non_drop(frame_number in -2_591_999i64..2_592_000) {
        let config = transcode_stimecode::TimecodeConfig {
            frame_number: Some(frame_number),
            force_non_drop_frame: true,
            ..Default::default()
        };
        let tc = STimecode::with_config("29.97", config).unwrap();
        let text = tc.to_string();
        prop_assert!(!text.contains(';'));

        let config = transcode_stimecode::TimecodeConfig {
            start_timecode: Some(text.into()),
            force_non_drop_frame: true,
            ..Default::default()
        };
        let back = STimecode::with_config("29.97", config).unwrap();
        prop_assert_eq!(back.frame_number(), frame_number);
    }

    /// Frame numbers a whole number of days apart render identically.
    #[test]
    fn rollover_after_24_hours(rate in prop::sample::select(RATES), frame_number in 0i64..100_000) {
        let day = frames_per_day(rate);
        let tc = STimecode::from_frame_number(rate, frame_number).unwrap();
        let next_day = STimecode::from_frame_number(rate, frame_number + day).unwrap();
        prop_assert_eq!(tc.to_string(), next_day.to_string());
    }

    /// Drop-frame timecode never shows a skipped label.
    #[test]
    fn drop_frame_never_shows_skipped_labels(frame_number in 0i64..2_589_408) {
        let tc = STimecode::from_frame_number("29.97", frame_number).unwrap();
        let fields = tc.fields();
        if fields.seconds == 0 && fields.minutes % 10 != 0 {
            prop_assert!(fields.frames.as_index() >= 2, "{} shows a dropped label", tc);
        }
    }
}

// =============================================================================
// Frame Count Tests
// =============================================================================

proptest! {
    /// `frames()` is always `|frame_number| + 1`.
    #[test]
    fn display_count_matches_frame_number(frame_number in -1_000_000i64..1_000_000) {
        let tc = STimecode::from_frame_number(25, frame_number).unwrap();
        prop_assert_eq!(tc.frames(), frame_number.abs() + 1);
    }

    /// Setting a positive count stores `count - 1`.
    #[test]
    fn setting_display_count(count in 1i64..1_000_000) {
        let mut tc = STimecode::from_frame_number(25, 0).unwrap();
        tc.set_frames(count).unwrap();
        prop_assert_eq!(tc.frame_number(), count - 1);
    }

    /// Non-positive counts are rejected.
    #[test]
    fn rejecting_non_positive_count(count in -1_000_000i64..1) {
        let mut tc = STimecode::from_frame_number(25, 7).unwrap();
        prop_assert_eq!(tc.set_frames(count), Err(TimecodeError::invalid_frame_count(count)));
        prop_assert_eq!(tc.frame_number(), 7);
    }
}

// =============================================================================
// Arithmetic Tests
// =============================================================================

proptest! {
    /// Adding then subtracting the same frame count is the identity.
    #[test]
    fn add_then_subtract(start in -1_000_000i64..1_000_000, delta in -1_000_000i64..1_000_000) {
        let tc = STimecode::from_frame_number("59.94", start).unwrap();
        let moved = (&tc + delta).unwrap();
        let back = (&moved - delta).unwrap();
        prop_assert_eq!(back, tc);
    }

    /// Negation flips the sign and keeps the framerate.
    #[test]
    fn negation_flips_sign(frame_number in -1_000_000i64..1_000_000) {
        let tc = STimecode::from_frame_number("29.97", frame_number).unwrap();
        let negated = (-&tc).unwrap();
        prop_assert_eq!(negated.frame_number(), -frame_number);
        prop_assert!(negated.is_drop_frame());
    }

    /// Same-rate ordering agrees with frame numbers.
    #[test]
    fn ordering_follows_frame_numbers(a in -100_000i64..100_000, b in -100_000i64..100_000) {
        let left = STimecode::from_frame_number(24, a).unwrap();
        let right = STimecode::from_frame_number(24, b).unwrap();
        prop_assert_eq!(left < right, a < b);
        prop_assert_eq!(left == right, a == b);
    }
}
