/// Debug-panel knobs: the style settings a host exposes for live tweaking
use tracing::warn;

use crate::style::{Style, MAX_COLS, MAX_ROWS};

/// One tweakable setting with its label, range and step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Knob {
    Speed,
    CurveMagnitude,
    CurvePeriod,
    RadiusShiftSpeed,
    RotationSpeed,
    Rings,
    RingDensity,
}

impl Knob {
    pub const ALL: [Knob; 7] = [
        Knob::Speed,
        Knob::CurveMagnitude,
        Knob::CurvePeriod,
        Knob::RadiusShiftSpeed,
        Knob::RotationSpeed,
        Knob::Rings,
        Knob::RingDensity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Knob::Speed => "Animation Speed",
            Knob::CurveMagnitude => "Bulbousness",
            Knob::CurvePeriod => "Bulbs",
            Knob::RadiusShiftSpeed => "Bulb Speed",
            Knob::RotationSpeed => "Rotation Speed",
            Knob::Rings => "Rings",
            Knob::RingDensity => "Ring Density",
        }
    }

    /// `(min, max, step)`
    pub fn range(self) -> (f32, f32, f32) {
        match self {
            Knob::Speed => (0.1, 0.5, 0.05),
            Knob::CurveMagnitude => (0.0, 1.0, 0.01),
            Knob::CurvePeriod => (0.0, 6.0, 1.0),
            Knob::RadiusShiftSpeed => (-4.0, 4.0, 0.25),
            Knob::RotationSpeed => (-6.0, 6.0, 1.0),
            Knob::Rings => (1.0, MAX_COLS as f32, 1.0),
            Knob::RingDensity => (1.0, MAX_ROWS as f32, 1.0),
        }
    }

    /// Grid knobs only take effect on the next regenerate
    pub fn needs_regenerate(self) -> bool {
        matches!(self, Knob::Rings | Knob::RingDensity)
    }

    pub fn next(self) -> Knob {
        let index = Knob::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Knob::ALL[(index + 1) % Knob::ALL.len()]
    }

    pub fn previous(self) -> Knob {
        let index = Knob::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Knob::ALL[(index + Knob::ALL.len() - 1) % Knob::ALL.len()]
    }
}

impl Style {
    pub fn knob(&self, knob: Knob) -> f32 {
        match knob {
            Knob::Speed => self.speed,
            Knob::CurveMagnitude => self.curve_magnitude,
            Knob::CurvePeriod => self.curve_period,
            Knob::RadiusShiftSpeed => self.radius_shift_speed,
            Knob::RotationSpeed => self.rotation_speed,
            Knob::Rings => self.cols as f32,
            Knob::RingDensity => self.rows as f32,
        }
    }

    /// Set a knob, clamped to its range and snapped to its step. Returns the stored value.
    pub fn set_knob(&mut self, knob: Knob, value: f32) -> f32 {
        let (min, max, step) = knob.range();
        if !value.is_finite() {
            warn!(knob = knob.label(), value, "ignoring non-finite knob value");
            return self.knob(knob);
        }
        let snapped = (min + ((value - min) / step).round() * step).clamp(min, max);
        match knob {
            Knob::Speed => self.speed = snapped,
            Knob::CurveMagnitude => self.curve_magnitude = snapped,
            Knob::CurvePeriod => self.curve_period = snapped,
            Knob::RadiusShiftSpeed => self.radius_shift_speed = snapped,
            Knob::RotationSpeed => self.rotation_speed = snapped,
            Knob::Rings => self.cols = snapped as usize,
            Knob::RingDensity => self.rows = snapped as usize,
        }
        snapped
    }

    /// Move a knob by whole steps
    pub fn nudge(&mut self, knob: Knob, steps: i32) -> f32 {
        let (_, _, step) = knob.range();
        self.set_knob(knob, self.knob(knob) + steps as f32 * step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_nudge_clamps_to_range() {
        let mut style = Style::default();
        assert_eq!(style.nudge(Knob::RotationSpeed, 10), 6.0);
        assert_eq!(style.rotation_speed, 6.0);
        assert_eq!(style.nudge(Knob::RotationSpeed, -20), -6.0);
        assert_eq!(style.nudge(Knob::CurvePeriod, -3), 0.0);
    }

    #[test]
    fn test_set_knob_snaps_to_step() {
        let mut style = Style::default();
        assert_abs_diff_eq!(style.set_knob(Knob::RadiusShiftSpeed, 1.1), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(style.set_knob(Knob::Speed, 0.27), 0.25, epsilon = 1e-6);
        assert_eq!(style.set_knob(Knob::Rings, 120.4), 120.0);
        assert_eq!(style.cols, 120);
    }

    #[test]
    fn test_non_finite_value_ignored() {
        let mut style = Style::default();
        let before = style.curve_magnitude;
        assert_eq!(style.set_knob(Knob::CurveMagnitude, f32::NAN), before);
        assert_eq!(style.curve_magnitude, before);
    }

    #[test]
    fn test_knob_cycle() {
        let mut knob = Knob::Speed;
        for _ in 0..Knob::ALL.len() {
            knob = knob.next();
        }
        assert_eq!(knob, Knob::Speed);
        assert_eq!(Knob::Speed.previous(), Knob::RingDensity);
        assert!(Knob::Rings.needs_regenerate());
        assert!(!Knob::Speed.needs_regenerate());
    }
}
