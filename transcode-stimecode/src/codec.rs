//! Conversion between signed frame numbers and timecode fields.
//!
//! Frame numbers count frames from `00:00:00:00` and may be negative. The
//! encoder works on the magnitude, rolls it over every 24 hours and puts
//! the sign back on the fields; the decoder does the reverse without any
//! rollover.

use crate::dropframe::DropFrameConfig;
use crate::error::{Result, TimecodeError};
use crate::fields::{format_fields, DisplayMode, FrameField, Sign, TimecodeFields};
use crate::framerate::Framerate;
use crate::parse::{parse_timecode, TimecodeInput};

/// Result of decoding a timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Signed frame number.
    pub frame_number: i64,
    /// The source used fractional seconds (`HH:MM:SS.sss`), so the
    /// instance should switch to fractional display.
    pub fractional: bool,
}

/// Convert a signed frame number to timecode fields.
#[must_use]
pub fn frame_number_to_fields(
    frame_number: i64,
    rate: &Framerate,
    mode: DisplayMode,
) -> TimecodeFields {
    let sign = Sign::of(frame_number);
    let config = DropFrameConfig::for_framerate(rate);

    // Rolls over after 24 hours.
    let in_day = (frame_number.unsigned_abs() % config.frames_per_24_hours as u64) as i64;
    let label = config.reinsert_dropped(in_day);

    let fps = config.nominal_fps;
    let frames = label % fps;
    let frames = if mode.fractional {
        FrameField::Fraction(round_to_millis(frames as f64 / fps as f64))
    } else {
        FrameField::Index(frames as u32)
    };

    let total_seconds = label / fps;
    TimecodeFields::new(
        (total_seconds / 3600) as u32,
        ((total_seconds / 60) % 60) as u32,
        (total_seconds % 60) as u32,
        frames,
        sign,
    )
}

/// Convert timecode fields to a signed frame number.
///
/// A [`FrameField::Fraction`] is read as a fraction of a second at the
/// nominal rate. Drop-frame rates subtract the labels skipped before the
/// given minute. Fails with [`TimecodeError::Overflow`] when the frame
/// number does not fit in an `i64`.
pub fn fields_to_frame_number(fields: &TimecodeFields, rate: &Framerate) -> Result<i64> {
    let config = DropFrameConfig::for_framerate(rate);
    let fps = config.nominal_fps;

    let hours = fields.hours as i64;
    let minutes = fields.minutes as i64;
    let seconds = fields.seconds as i64;
    let frames = match fields.frames {
        FrameField::Index(frames) => frames as i64,
        FrameField::Fraction(fraction) => (fraction * rate.nominal_rate()).round_ties_even() as i64,
    };

    let total_minutes = 60 * hours + minutes;
    let frame_number = checked_sum(&[
        fps.checked_mul(3600).and_then(|f| f.checked_mul(hours)),
        fps.checked_mul(60).and_then(|f| f.checked_mul(minutes)),
        fps.checked_mul(seconds),
        Some(frames),
    ])
    .and_then(|n| n.checked_sub(config.dropped_before(total_minutes)))
    .ok_or(TimecodeError::Overflow)?;

    Ok(frame_number * fields.sign.as_i64())
}

fn checked_sum(terms: &[Option<i64>]) -> Option<i64> {
    terms
        .iter()
        .try_fold(0i64, |total, term| total.checked_add((*term)?))
}

/// Decode any supported timecode input at the given framerate.
///
/// Text with a single `.` is read as fractional seconds unless `mode`
/// displays milliseconds, in which case the digits are the frame index.
pub fn decode_timecode(
    input: impl Into<TimecodeInput>,
    rate: &Framerate,
    mode: DisplayMode,
) -> Result<Decoded> {
    let input = input.into();

    if let TimecodeInput::Timecode { frame_number } = input {
        return Ok(Decoded {
            frame_number,
            fractional: false,
        });
    }

    let fractional_digits = match &input {
        TimecodeInput::Text(text) if !mode.milliseconds && text.split('.').count() == 2 => {
            text.rsplit('.').next().map(str::to_string)
        }
        _ => None,
    };

    let mut fields = parse_timecode(input)?;
    if let Some(digits) = &fractional_digits {
        let fraction: f64 = format!("0.{digits}")
            .parse()
            .map_err(|_| TimecodeError::invalid_format(format!("Invalid fraction: .{digits}")))?;
        fields.frames = FrameField::Fraction(fraction);
    }

    Ok(Decoded {
        frame_number: fields_to_frame_number(&fields, rate)?,
        fractional: fractional_digits.is_some(),
    })
}

/// Render a frame number as its canonical timecode string.
#[must_use]
pub fn encode_timecode(frame_number: i64, rate: &Framerate, mode: DisplayMode) -> String {
    format_fields(&frame_number_to_fields(frame_number, rate, mode), rate, mode)
}

fn round_to_millis(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framerate::parse_framerate;
    use pretty_assertions::assert_eq;

    fn rate(spec: &str) -> Framerate {
        parse_framerate(spec, false).unwrap()
    }

    fn encode(frame_number: i64, spec: &str) -> String {
        let rate = rate(spec);
        encode_timecode(frame_number, &rate, DisplayMode::for_framerate(&rate))
    }

    fn decode(text: &str, spec: &str) -> i64 {
        let rate = rate(spec);
        decode_timecode(text, &rate, DisplayMode::for_framerate(&rate))
            .unwrap()
            .frame_number
    }

    #[test]
    fn test_encode_non_drop() {
        assert_eq!(encode(0, "25"), "00:00:00:00");
        assert_eq!(encode(30, "25"), "00:00:01:05");
        assert_eq!(encode(90_000, "25"), "01:00:00:00");
        assert_eq!(encode(-30, "25"), "-00:00:01:05");
    }

    #[test]
    fn test_encode_drop_frame_skips_labels() {
        assert_eq!(encode(1799, "29.97"), "00:00:59;29");
        assert_eq!(encode(1800, "29.97"), "00:01:00;02");
        assert_eq!(encode(17982, "29.97"), "00:10:00;00");
        assert_eq!(encode(107_892, "29.97"), "01:00:00;00");
        assert_eq!(encode(3600, "59.94"), "00:01:00;04");
    }

    #[test]
    fn test_decode_drop_frame() {
        assert_eq!(decode("00:01:00;02", "29.97"), 1800);
        assert_eq!(decode("00:10:00;00", "29.97"), 17982);
        assert_eq!(decode("01:00:00;00", "29.97"), 107_892);
        assert_eq!(decode("00:01:00;04", "59.94"), 3600);
    }

    #[test]
    fn test_rollover() {
        assert_eq!(encode(2_160_000, "25"), "00:00:00:00");
        assert_eq!(encode(2_160_001, "25"), "00:00:00:01");
        assert_eq!(encode(2_589_408, "29.97"), "00:00:00;00");

        let fields = frame_number_to_fields(-2_160_000, &rate("25"), DisplayMode::default());
        assert_eq!(fields.sign, Sign::Positive);
    }

    #[test]
    fn test_encode_milliseconds() {
        assert_eq!(encode(661_040, "ms"), "00:11:01.040");
        assert_eq!(decode("00:11:01.040", "ms"), 661_040);
    }

    #[test]
    fn test_decode_fractional_seconds() {
        let rate = rate("25");
        let decoded = decode_timecode("00:00:00.040", &rate, DisplayMode::default()).unwrap();
        assert_eq!(
            decoded,
            Decoded {
                frame_number: 1,
                fractional: true
            }
        );

        let decoded = decode_timecode("-00:00:01.5", &rate, DisplayMode::default()).unwrap();
        // 0.5 * 25 = 12.5 rounds to even
        assert_eq!(decoded.frame_number, -37);
    }

    #[test]
    fn test_encode_fractional_seconds() {
        let rate = rate("25");
        let mode = DisplayMode {
            fractional: true,
            milliseconds: false,
        };
        assert_eq!(encode_timecode(26, &rate, mode), "00:00:01.040");
        assert_eq!(encode_timecode(0, &rate, mode), "00:00:00.000");
    }

    #[test]
    fn test_decode_packed_word() {
        let rate = rate("25");
        let decoded = decode_timecode(0x0000_0105_i64, &rate, DisplayMode::default()).unwrap();
        assert_eq!(decoded.frame_number, 30);
        assert!(!decoded.fractional);

        let decoded = decode_timecode(-0x0000_0105_i64, &rate, DisplayMode::default()).unwrap();
        assert_eq!(decoded.frame_number, -30);
    }

    #[test]
    fn test_decode_existing_timecode_ignores_rate() {
        let decoded = decode_timecode(
            TimecodeInput::Timecode { frame_number: 42 },
            &rate("29.97"),
            DisplayMode::default(),
        )
        .unwrap();
        assert_eq!(decoded.frame_number, 42);
    }

    #[test]
    fn test_signed_zero() {
        assert_eq!(decode("00:00:00:00", "25"), 0);
        assert_eq!(decode("-00:00:00:00", "25"), 0);
        assert_eq!(encode(0, "25"), "00:00:00:00");
    }

    #[test]
    fn test_decode_overflow_is_an_error() {
        let mhz_rate = rate("1000000");
        assert_eq!(
            decode_timecode("4000000000:00:00:00", &mhz_rate, DisplayMode::default()).unwrap_err(),
            TimecodeError::Overflow
        );

        let fields = TimecodeFields::new(u32::MAX, 59, 59, FrameField::Index(0), Sign::Negative);
        assert_eq!(
            fields_to_frame_number(&fields, &rate("4000000000")),
            Err(TimecodeError::Overflow)
        );
        assert_eq!(
            fields_to_frame_number(&fields, &rate("25")),
            Ok(-386_547_056_639_975)
        );
    }

    #[test]
    fn test_frames_rate() {
        assert_eq!(encode(61, "frames"), "00:01:01:00");
        assert_eq!(decode("00:01:01:00", "frames"), 61);
    }
}
