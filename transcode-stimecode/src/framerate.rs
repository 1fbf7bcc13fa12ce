//! Framerate resolution.
//!
//! A framerate can be given as an integer, a decimal, a [`Rational`] or a
//! string (`"29.97"`, `"30000/1001"`, `"ms"`, `"frames"`, ...). Every form is
//! normalized to a canonical string first and then resolved to a
//! [`Framerate`] descriptor:
//!
//! | Canonical              | Integer rate | Notes                         |
//! |------------------------|--------------|-------------------------------|
//! | `29.97`                | 30           | drop-frame unless forced NDF  |
//! | `59.94`                | 60           | drop-frame unless forced NDF  |
//! | `23.976*`, `23.98*`    | 24           |                               |
//! | `ms`, `1000`           | 1000         | millisecond fields            |
//! | `frames`               | 1            | raw frame counting            |
//! | anything else          | `int(float)` |                               |

use crate::error::{Result, TimecodeError};
use crate::rational::Rational;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// An unresolved framerate as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FramerateSpec {
    /// Integer literal, e.g. `25`.
    Integer(i64),
    /// Decimal literal, e.g. `29.97`.
    Decimal(f64),
    /// Exact ratio, e.g. `30000/1001`.
    Rational(Rational),
    /// Textual form, including `"N/D"`, `"ms"` and `"frames"`.
    Text(String),
}

impl From<i32> for FramerateSpec {
    fn from(n: i32) -> Self {
        Self::Integer(n as i64)
    }
}

impl From<i64> for FramerateSpec {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<u32> for FramerateSpec {
    fn from(n: u32) -> Self {
        Self::Integer(n as i64)
    }
}

impl From<f64> for FramerateSpec {
    fn from(x: f64) -> Self {
        Self::Decimal(x)
    }
}

impl From<Rational> for FramerateSpec {
    fn from(r: Rational) -> Self {
        Self::Rational(r)
    }
}

impl From<(i64, i64)> for FramerateSpec {
    fn from(pair: (i64, i64)) -> Self {
        Self::Rational(pair.into())
    }
}

impl From<(i32, i32)> for FramerateSpec {
    fn from(pair: (i32, i32)) -> Self {
        Self::Rational(pair.into())
    }
}

impl From<&str> for FramerateSpec {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FramerateSpec {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for FramerateSpec {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<&Framerate> for FramerateSpec {
    fn from(rate: &Framerate) -> Self {
        Self::Text(rate.canonical.clone())
    }
}

/// A resolved framerate.
///
/// `integer_rate` drives the modular field arithmetic, `nominal_rate` the
/// drop-frame cadence and fractional-second conversion. Two framerates are
/// the same rate when their canonical strings match.
///
/// Serializes as its canonical string plus the non-drop override, and
/// deserializes through [`parse_framerate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FramerateRepr", into = "FramerateRepr")]
pub struct Framerate {
    canonical: String,
    nominal_rate: f64,
    integer_rate: u32,
    drop_frame: bool,
    ms_mode: bool,
}

impl Framerate {
    /// Canonical string used for rate equality.
    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Decimal rate (29.97 for NTSC, 1000 for `ms`).
    #[must_use]
    pub fn nominal_rate(&self) -> f64 {
        self.nominal_rate
    }

    /// Rounded rate used for field arithmetic (30 for 29.97).
    #[must_use]
    pub fn integer_rate(&self) -> u32 {
        self.integer_rate
    }

    /// Whether drop-frame numbering is active.
    #[must_use]
    pub fn is_drop_frame(&self) -> bool {
        self.drop_frame
    }

    /// Whether this is the millisecond pseudo-rate.
    #[must_use]
    pub fn is_ms(&self) -> bool {
        self.ms_mode
    }

    /// Whether both framerates share a canonical form.
    #[must_use]
    pub fn same_rate(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }

    /// Rate used to size the 10-minute and 24-hour cycles when encoding.
    ///
    /// Only drop-frame timecode follows the fractional rate; everything else
    /// cycles on the integer rate.
    #[must_use]
    pub fn cycle_rate(&self) -> f64 {
        if self.drop_frame {
            self.nominal_rate
        } else {
            self.integer_rate as f64
        }
    }
}

/// Serialized form of a [`Framerate`].
#[derive(Serialize, Deserialize)]
struct FramerateRepr {
    rate: String,
    #[serde(default)]
    force_non_drop_frame: bool,
}

impl From<Framerate> for FramerateRepr {
    fn from(rate: Framerate) -> Self {
        let ntsc = matches!(rate.canonical.as_str(), "29.97" | "59.94");
        Self {
            force_non_drop_frame: ntsc && !rate.drop_frame,
            rate: rate.canonical,
        }
    }
}

impl TryFrom<FramerateRepr> for Framerate {
    type Error = TimecodeError;

    fn try_from(repr: FramerateRepr) -> Result<Self> {
        parse_framerate(repr.rate, repr.force_non_drop_frame)
    }
}

impl fmt::Display for Framerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for Framerate {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        parse_framerate(s, false)
    }
}

/// Resolve a framerate specifier.
///
/// `force_non_drop_frame` only matters for 29.97 and 59.94, which otherwise
/// use drop-frame numbering.
pub fn parse_framerate(
    spec: impl Into<FramerateSpec>,
    force_non_drop_frame: bool,
) -> Result<Framerate> {
    let canonical = match spec.into() {
        FramerateSpec::Rational(r) => {
            if !r.is_defined() {
                return Err(TimecodeError::invalid_frame_rate(r.to_string()));
            }
            let r = r.reduce();
            ratio_to_canonical(r.to_f64(), &r.to_string())?
        }
        FramerateSpec::Text(s) if s.contains('/') => {
            let parts: Vec<&str> = s.split('/').collect();
            let [num, den] = parts.as_slice() else {
                return Err(TimecodeError::type_mismatch("framerate", format!("ratio {s}")));
            };
            let parse_part = |part: &str| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| TimecodeError::type_mismatch("framerate", format!("ratio {s}")))
            };
            let (num, den) = (parse_part(*num)?, parse_part(*den)?);
            if den == 0.0 {
                return Err(TimecodeError::invalid_frame_rate(s.as_str()));
            }
            ratio_to_canonical(num / den, &s)?
        }
        FramerateSpec::Text(s) => s,
        FramerateSpec::Integer(n) => n.to_string(),
        FramerateSpec::Decimal(x) => x.to_string(),
    };

    resolve(canonical, force_non_drop_frame)
}

/// Round a ratio to two decimals; integral results lose their fraction.
fn ratio_to_canonical(ratio: f64, original: &str) -> Result<String> {
    let rate = (ratio * 100.0).round_ties_even() / 100.0;
    if !rate.is_finite() {
        return Err(TimecodeError::invalid_frame_rate(original));
    }
    let canonical = if rate.fract() == 0.0 {
        format!("{}", rate as i64)
    } else {
        rate.to_string()
    };
    debug!(ratio = original, rate = %canonical, "coerced rational framerate");
    Ok(canonical)
}

fn resolve(canonical: String, force_non_drop_frame: bool) -> Result<Framerate> {
    let (integer_rate, drop_frame, ms_mode) = match canonical.as_str() {
        "29.97" => (30, !force_non_drop_frame, false),
        "59.94" => (60, !force_non_drop_frame, false),
        s if s.starts_with("23.976") || s.starts_with("23.98") => (24, false, false),
        "ms" | "1000" => (1000, false, true),
        "frames" => (1, false, false),
        s => {
            let value: f64 = s
                .trim()
                .parse()
                .map_err(|_| TimecodeError::invalid_frame_rate(s))?;
            if !value.is_finite() || value < 1.0 || value > u32::MAX as f64 {
                return Err(TimecodeError::invalid_frame_rate(s));
            }
            (value.trunc() as u32, false, false)
        }
    };
    let canonical = if ms_mode { "ms".to_string() } else { canonical };

    let nominal_rate = if ms_mode || canonical == "frames" {
        integer_rate as f64
    } else {
        canonical.trim().parse().unwrap_or(integer_rate as f64)
    };

    trace!(
        rate = %canonical,
        integer_rate,
        drop_frame,
        ms_mode,
        "resolved framerate"
    );

    Ok(Framerate {
        canonical,
        nominal_rate,
        integer_rate,
        drop_frame,
        ms_mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ntsc_rates_are_drop_frame() {
        let rate = parse_framerate("29.97", false).unwrap();
        assert_eq!(rate.integer_rate(), 30);
        assert!(rate.is_drop_frame());
        assert!((rate.nominal_rate() - 29.97).abs() < 1e-9);

        let rate = parse_framerate(59.94, false).unwrap();
        assert_eq!(rate.integer_rate(), 60);
        assert!(rate.is_drop_frame());
    }

    #[test]
    fn test_force_non_drop_frame_keeps_integer_rate() {
        let rate = parse_framerate("29.97", true).unwrap();
        assert_eq!(rate.integer_rate(), 30);
        assert!(!rate.is_drop_frame());
        assert_eq!(rate.canonical(), "29.97");
    }

    #[test]
    fn test_film_rates() {
        for spec in ["23.976", "23.98", "23.976023"] {
            let rate = parse_framerate(spec, false).unwrap();
            assert_eq!(rate.integer_rate(), 24, "{spec}");
            assert!(!rate.is_drop_frame());
        }
    }

    #[test]
    fn test_rational_rates() {
        let rate = parse_framerate(Rational::new(30000, 1001), false).unwrap();
        assert_eq!(rate.canonical(), "29.97");
        assert!(rate.is_drop_frame());

        let rate = parse_framerate("24000/1001", false).unwrap();
        assert_eq!(rate.canonical(), "23.98");
        assert_eq!(rate.integer_rate(), 24);

        let rate = parse_framerate(Rational::new(60000, 2002), false).unwrap();
        assert_eq!(rate.canonical(), "29.97");

        let rate = parse_framerate((50, 2), false).unwrap();
        assert_eq!(rate.canonical(), "25");
        assert_eq!(rate.integer_rate(), 25);
    }

    #[test]
    fn test_ms_and_frames() {
        let ms = parse_framerate("ms", false).unwrap();
        assert_eq!(ms.integer_rate(), 1000);
        assert!(ms.is_ms());

        let thousand = parse_framerate(1000, false).unwrap();
        assert!(thousand.is_ms());
        assert!(ms.same_rate(&thousand));

        let frames = parse_framerate("frames", false).unwrap();
        assert_eq!(frames.integer_rate(), 1);
        assert!((frames.nominal_rate() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_generic_rates_truncate() {
        assert_eq!(parse_framerate(25, false).unwrap().integer_rate(), 25);
        assert_eq!(parse_framerate("25.5", false).unwrap().integer_rate(), 25);
        assert_eq!(parse_framerate(48.0, false).unwrap().canonical(), "48");
    }

    #[test]
    fn test_invalid_rates() {
        assert!(matches!(
            parse_framerate("fast", false),
            Err(TimecodeError::InvalidFrameRate { .. })
        ));
        assert!(matches!(
            parse_framerate(0, false),
            Err(TimecodeError::InvalidFrameRate { .. })
        ));
        assert!(matches!(
            parse_framerate(Rational::new(30, 0), false),
            Err(TimecodeError::InvalidFrameRate { .. })
        ));
    }

    #[test]
    fn test_undecomposable_ratio_is_type_mismatch() {
        assert!(matches!(
            parse_framerate("30000/abc", false),
            Err(TimecodeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            parse_framerate("1/2/3", false),
            Err(TimecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_serialization_goes_through_parser() {
        let rate = parse_framerate("29.97", true).unwrap();
        let json = serde_json::to_string(&rate).unwrap();
        assert_eq!(json, r#"{"rate":"29.97","force_non_drop_frame":true}"#);
        let decoded: Framerate = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, rate);

        let decoded: Framerate = serde_json::from_str(r#"{"rate":"59.94"}"#).unwrap();
        assert!(decoded.is_drop_frame());
        assert_eq!(decoded.integer_rate(), 60);

        assert!(serde_json::from_str::<Framerate>(r#"{"rate":"0"}"#).is_err());
        assert!(serde_json::from_str::<Framerate>(r#"{"rate":"fast"}"#).is_err());
        let resolved = r#"{"canonical":"25","nominal_rate":25.0,"integer_rate":0,
            "drop_frame":false,"ms_mode":false}"#;
        assert!(serde_json::from_str::<Framerate>(resolved).is_err());
    }

    #[test]
    fn test_decimal_and_integer_literals_share_a_rate() {
        let decimal = parse_framerate(48.0, false).unwrap();
        let integer = parse_framerate(48, false).unwrap();
        assert_eq!(decimal.canonical(), "48");
        assert!(decimal.same_rate(&integer));
        assert_eq!(parse_framerate(23.976, false).unwrap().canonical(), "23.976");
    }

    #[test]
    fn test_framerate_from_str() {
        let rate: Framerate = "50".parse().unwrap();
        assert_eq!(rate.to_string(), "50");
    }
}
