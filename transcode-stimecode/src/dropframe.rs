//! Drop-frame cadence for 29.97 and 59.94 fps.
//!
//! Drop-frame timecode keeps the displayed time in step with the wall clock
//! by skipping frame *numbers* (never frames):
//! - frames 0 and 1 (0-3 at 59.94) are skipped at the start of each minute
//! - except for minutes 0, 10, 20, 30, 40, 50
//!
//! The number of skipped labels is 6.6666% of the nominal rate, rounded.

use crate::framerate::Framerate;
use serde::{Deserialize, Serialize};

/// Ratio of the nominal rate that is skipped per minute.
const DROP_RATIO: f64 = 0.066666;

/// Cycle lengths derived from a framerate.
///
/// For non-drop rates `frames_dropped_per_minute` is zero and the cycles
/// are plain multiples of the integer rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropFrameConfig {
    /// Frame labels skipped per minute (except every 10th minute)
    pub frames_dropped_per_minute: i64,
    /// Integer frame rate used for field arithmetic
    pub nominal_fps: i64,
    /// Frames per 10 minutes (accounting for drops)
    pub frames_per_10_minutes: i64,
    /// Frames per minute (accounting for drops, for non-10th minutes)
    pub frames_per_minute: i64,
    /// Frames before the clock rolls over to 00:00:00:00
    pub frames_per_24_hours: i64,
}

impl DropFrameConfig {
    /// Derive the cadence for a resolved framerate.
    #[must_use]
    pub fn for_framerate(rate: &Framerate) -> Self {
        let fps = rate.cycle_rate();
        let dropped = frames_dropped_per_minute(rate);

        Self {
            frames_dropped_per_minute: dropped,
            nominal_fps: rate.integer_rate() as i64,
            frames_per_10_minutes: (fps * 600.0).round_ties_even() as i64,
            frames_per_minute: fps.round_ties_even() as i64 * 60 - dropped,
            frames_per_24_hours: (fps * 86_400.0).round_ties_even() as i64,
        }
    }

    /// Whether any frame labels are skipped.
    #[must_use]
    pub fn is_drop_frame(&self) -> bool {
        self.frames_dropped_per_minute > 0
    }

    /// Labels skipped before `total_minutes` (counted from 00:00).
    #[must_use]
    pub fn dropped_before(&self, total_minutes: i64) -> i64 {
        self.frames_dropped_per_minute * (total_minutes - total_minutes / 10)
    }

    /// Map a non-negative frame number inside one day onto the label space
    /// by adding back the skipped labels.
    #[must_use]
    pub fn reinsert_dropped(&self, frame_number: i64) -> i64 {
        if !self.is_drop_frame() {
            return frame_number;
        }

        let drop = self.frames_dropped_per_minute;
        let ten_minute_blocks = frame_number / self.frames_per_10_minutes;
        let remainder = frame_number % self.frames_per_10_minutes;

        if remainder > drop {
            frame_number
                + drop * 9 * ten_minute_blocks
                + drop * ((remainder - drop) / self.frames_per_minute)
        } else {
            frame_number + drop * 9 * ten_minute_blocks
        }
    }
}

/// Number of frame labels a drop-frame rate skips per minute; zero otherwise.
#[must_use]
pub fn frames_dropped_per_minute(rate: &Framerate) -> i64 {
    if rate.is_drop_frame() {
        (rate.nominal_rate() * DROP_RATIO).round_ties_even() as i64
    } else {
        0
    }
}

/// Check whether a label is one that drop-frame numbering never shows.
#[must_use]
pub fn is_dropped_frame(minutes: u32, seconds: u32, frames: u32, rate: &Framerate) -> bool {
    let dropped = frames_dropped_per_minute(rate);
    seconds == 0 && minutes % 10 != 0 && (frames as i64) < dropped
}
