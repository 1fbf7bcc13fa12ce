//! Arithmetic and comparison over frame numbers.
//!
//! Every binary operation takes an [`Operand`]: another timecode, a raw
//! frame count or timecode text. Arithmetic rejects text with
//! [`TimecodeError::TypeMismatch`]; comparisons decode it.
//!
//! Results are new timecodes at the left operand's framerate. Frame
//! numbers are never normalized across framerates, so `a + b` and `b + a`
//! differ when the rates do.
//!
//! Multiplying or dividing by a frame count goes through the 1-based frame
//! count (`frame_number + sign`) rather than the frame number. Only
//! non-negative timecodes survive this; see [`STimecode::multiply`].

use crate::error::{Result, TimecodeError};
use crate::stimecode::STimecode;
use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};
use tracing::debug;

/// Right-hand side of a timecode operation.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// Another timecode.
    Timecode(&'a STimecode),
    /// A raw frame count.
    Frames(i64),
    /// Timecode text, decoded at the left operand's framerate.
    Text(&'a str),
}

impl Operand<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Timecode(_) => "STimecode",
            Self::Frames(_) => "int",
            Self::Text(_) => "str",
        }
    }
}

impl<'a> From<&'a STimecode> for Operand<'a> {
    fn from(tc: &'a STimecode) -> Self {
        Self::Timecode(tc)
    }
}

impl From<i64> for Operand<'_> {
    fn from(frames: i64) -> Self {
        Self::Frames(frames)
    }
}

impl From<i32> for Operand<'_> {
    fn from(frames: i32) -> Self {
        Self::Frames(frames as i64)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

/// Relation tested by [`STimecode::compare_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `==`
    Eq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl Comparison {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
        }
    }
}

fn arithmetic_mismatch(operand: &Operand<'_>) -> TimecodeError {
    TimecodeError::type_mismatch("arithmetic", operand.kind())
}

impl STimecode {
    /// `self + other` at this framerate.
    #[allow(clippy::should_implement_trait)]
    pub fn add<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        let other: Operand<'a> = other.into();
        let frames = match other {
            Operand::Timecode(tc) => tc.frame_number,
            Operand::Frames(frames) => frames,
            Operand::Text(_) => return Err(arithmetic_mismatch(&other)),
        };
        let sum = self
            .frame_number
            .checked_add(frames)
            .ok_or(TimecodeError::Overflow)?;
        Ok(self.derive(sum))
    }

    /// `self - other` at this framerate.
    pub fn subtract<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        let other: Operand<'a> = other.into();
        let frames = match other {
            Operand::Timecode(tc) => tc.frame_number,
            Operand::Frames(frames) => frames,
            Operand::Text(_) => return Err(arithmetic_mismatch(&other)),
        };
        let difference = self
            .frame_number
            .checked_sub(frames)
            .ok_or(TimecodeError::Overflow)?;
        Ok(self.derive(difference))
    }

    /// `self * other` at this framerate.
    ///
    /// Two timecodes multiply their frame numbers. This is a plain product,
    /// not a duration times a duration.
    ///
    /// A frame count scales the 1-based count instead:
    /// `frames = (frame_number + sign) * factor`. The result must be a
    /// positive count, so negative timecodes fail with
    /// [`TimecodeError::InvalidFrameCount`], and `x * 1` is only the
    /// identity for `x >= 0`.
    pub fn multiply<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        let other: Operand<'a> = other.into();
        match other {
            Operand::Timecode(tc) => {
                let product = self
                    .frame_number
                    .checked_mul(tc.frame_number)
                    .ok_or(TimecodeError::Overflow)?;
                Ok(self.derive(product))
            }
            Operand::Frames(factor) => {
                let mut result = self.derive(self.frame_number);
                result.mult_frames(factor)?;
                Ok(result)
            }
            Operand::Text(_) => Err(arithmetic_mismatch(&other)),
        }
    }

    /// `self / other` at this framerate, truncating toward zero.
    ///
    /// Divides the 1-based count: `frames = (frame_number + sign) / d`,
    /// where `d` is the frame count or the other timecode's frame number.
    pub fn divide<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        let other: Operand<'a> = other.into();
        let divisor = match other {
            Operand::Timecode(tc) => tc.frame_number,
            Operand::Frames(divisor) => divisor,
            Operand::Text(_) => return Err(arithmetic_mismatch(&other)),
        };
        let mut result = self.derive(self.frame_number);
        result.div_frames(divisor)?;
        Ok(result)
    }

    /// `-self` at this framerate.
    pub fn negate(&self) -> Result<Self> {
        let negated = self
            .frame_number
            .checked_neg()
            .ok_or(TimecodeError::Overflow)?;
        Ok(self.derive(negated))
    }

    /// This frame number at another timecode's framerate and drop-frame
    /// policy.
    fn rebased_on(&self, other: &STimecode) -> Self {
        debug!(
            from = %self.framerate,
            to = %other.framerate,
            frame_number = self.frame_number,
            "re-expressing timecode at operand framerate"
        );
        other.derive(self.frame_number)
    }

    /// Left-hand timecode whose rate differs from ours, if any.
    fn foreign_rate<'a>(&self, other: &Operand<'a>) -> Option<&'a STimecode> {
        match other {
            Operand::Timecode(tc) if !self.framerate.same_rate(&tc.framerate) => Some(*tc),
            _ => None,
        }
    }

    /// `other + self`.
    ///
    /// A timecode at another framerate takes precedence: `self` is first
    /// re-expressed at that rate and the result uses it.
    pub fn radd<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        let other: Operand<'a> = other.into();
        match self.foreign_rate(&other) {
            Some(tc) => self.rebased_on(tc).add(other),
            None => self.add(other),
        }
    }

    /// `other - self`, computed as `-(self - other)`.
    pub fn rsub<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        let other: Operand<'a> = other.into();
        let difference = match self.foreign_rate(&other) {
            Some(tc) => self.rebased_on(tc).subtract(other)?,
            None => self.subtract(other)?,
        };
        difference.negate()
    }

    /// `other * self`.
    pub fn rmul<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        let other: Operand<'a> = other.into();
        match self.foreign_rate(&other) {
            Some(tc) => self.rebased_on(tc).multiply(other),
            None => self.multiply(other),
        }
    }

    /// `other / self` for a timecode `other`, truncating toward zero.
    ///
    /// Divides the plain frame numbers; the result takes `other`'s
    /// framerate when the rates differ.
    pub fn rdiv<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        let other: Operand<'a> = other.into();
        let Operand::Timecode(tc) = other else {
            return Err(arithmetic_mismatch(&other));
        };
        if self.frame_number == 0 {
            return Err(TimecodeError::DivisionByZero);
        }
        let quotient = tc
            .frame_number
            .checked_div(self.frame_number)
            .ok_or(TimecodeError::Overflow)?;

        if self.framerate.same_rate(&tc.framerate) {
            Ok(self.derive(quotient))
        } else {
            Ok(tc.derive(quotient))
        }
    }

    /// Test a relation between `self` and `other`.
    ///
    /// Timecodes at different framerates are never equal, less or greater:
    /// every relation is `false`. Text is decoded at this framerate with
    /// the rate's own drop-frame numbering, even when this timecode forces
    /// non-drop-frame.
    pub fn compare_to<'a>(
        &self,
        other: impl Into<Operand<'a>>,
        relation: Comparison,
    ) -> Result<bool> {
        let other: Operand<'a> = other.into();
        let frame_number = match other {
            Operand::Timecode(tc) => {
                if !self.framerate.same_rate(&tc.framerate) {
                    return Ok(false);
                }
                tc.frame_number
            }
            Operand::Frames(frames) => frames,
            Operand::Text(text) => STimecode::new(&self.framerate, text)?.frame_number,
        };
        Ok(relation.holds(self.frame_number.cmp(&frame_number)))
    }
}

impl PartialEq for STimecode {
    fn eq(&self, other: &Self) -> bool {
        self.framerate.same_rate(&other.framerate) && self.frame_number == other.frame_number
    }
}

impl PartialOrd for STimecode {
    /// `None` when the framerates differ.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.framerate.same_rate(&other.framerate) {
            Some(self.frame_number.cmp(&other.frame_number))
        } else {
            None
        }
    }
}

impl PartialEq<i64> for STimecode {
    fn eq(&self, other: &i64) -> bool {
        self.frame_number == *other
    }
}

impl PartialOrd<i64> for STimecode {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.frame_number.cmp(other))
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl $trait<&STimecode> for &STimecode {
            type Output = Result<STimecode>;

            fn $method(self, rhs: &STimecode) -> Result<STimecode> {
                STimecode::$inherent(self, rhs)
            }
        }

        impl $trait<i64> for &STimecode {
            type Output = Result<STimecode>;

            fn $method(self, rhs: i64) -> Result<STimecode> {
                STimecode::$inherent(self, rhs)
            }
        }
    };
}

forward_binop!(Add, add, add);
forward_binop!(Sub, sub, subtract);
forward_binop!(Mul, mul, multiply);
forward_binop!(Div, div, divide);

macro_rules! reflected_binop {
    ($trait:ident, $method:ident, $reflected:ident) => {
        impl $trait<&STimecode> for i64 {
            type Output = Result<STimecode>;

            fn $method(self, rhs: &STimecode) -> Result<STimecode> {
                rhs.$reflected(self)
            }
        }
    };
}

reflected_binop!(Add, add, radd);
reflected_binop!(Sub, sub, rsub);
reflected_binop!(Mul, mul, rmul);

impl Neg for &STimecode {
    type Output = Result<STimecode>;

    fn neg(self) -> Result<STimecode> {
        self.negate()
    }
}
