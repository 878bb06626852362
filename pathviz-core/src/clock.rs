/// Animation progress and frame pacing
use crate::mapper::wrap_unit;
use crate::style::Style;

/// Shortest gap between accepted frames, in seconds
pub const MIN_FRAME_INTERVAL: f64 = 1.0 / 120.0;

/// Progress fraction in `[0, 1)` after `elapsed` seconds.
///
/// Time stays `f64` until the cycle is wrapped so long sessions keep sub-frame resolution.
pub fn progress(elapsed: f64, style: &Style) -> f32 {
    let cycles = elapsed * f64::from(style.speed) * f64::from(style.radius_shift_speed);
    wrap_unit(cycles.rem_euclid(1.0) as f32)
}

/// Drops frames that arrive sooner than `min_interval` after the last accepted one
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    min_interval: f64,
    last: Option<f64>,
}

impl FrameLimiter {
    pub fn new(min_interval: f64) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Whether a frame at `elapsed` seconds should be computed; accepting it resets the gap
    pub fn ready(&mut self, elapsed: f64) -> bool {
        if let Some(last) = self.last {
            if elapsed - last < self.min_interval {
                return false;
            }
        }
        self.last = Some(elapsed);
        true
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new(MIN_FRAME_INTERVAL)
    }
}
