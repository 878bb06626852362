/// Style descriptor and the named presets for each sketch variant
use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;

use crate::error::{ConfigError, PathError, StyleError};
use crate::path::Path;

/// What drives the phase of the radial bulge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadiusPhase {
    /// Progress plus the particle's ring offset: `t + r_init * phase_shift`
    Time,
    /// The particle's height parameter alone: `h_init`
    Height,
    /// The wrapped height: `(t + h_init) mod 1`
    Combined,
}

impl RadiusPhase {
    pub fn name(self) -> &'static str {
        match self {
            RadiusPhase::Time => "time",
            RadiusPhase::Height => "height",
            RadiusPhase::Combined => "combined",
        }
    }
}

impl FromStr for RadiusPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(RadiusPhase::Time),
            "height" => Ok(RadiusPhase::Height),
            "combined" => Ok(RadiusPhase::Combined),
            other => Err(format!("unknown radius phase `{}`", other)),
        }
    }
}

/// Most particles around one ring (`rows`)
pub const MAX_ROWS: usize = 100;
/// Most rings along the path (`cols`)
pub const MAX_COLS: usize = 200;

/// Per-frame knobs for the helix mapping.
///
/// Passed by reference into every mapping call; a host panel may change any
/// field between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Progress cycles per second
    pub speed: f32,
    /// Multiplier on `speed`, may be negative to run backwards
    pub radius_shift_speed: f32,
    pub base_radius: f32,
    /// Amplitude of the secondary breathing term driven by the wrapped height
    pub breathing_magnitude: f32,
    /// Breathing cycles along the path
    pub radius_period: f32,
    pub curve_magnitude: f32,
    /// Bulge cycles per unit of phase
    pub curve_period: f32,
    pub phase: RadiusPhase,
    /// Ring offset scale, only used by `RadiusPhase::Time`
    pub phase_shift: f32,
    /// Turns per progress cycle
    pub rotation_speed: f32,
    pub rows: usize,
    pub cols: usize,
}

impl Style {
    /// Reject knobs that would push NaN or infinity into positions
    pub fn validate(&self) -> Result<(), StyleError> {
        let knobs = [
            ("speed", self.speed),
            ("radius_shift_speed", self.radius_shift_speed),
            ("base_radius", self.base_radius),
            ("breathing_magnitude", self.breathing_magnitude),
            ("radius_period", self.radius_period),
            ("curve_magnitude", self.curve_magnitude),
            ("curve_period", self.curve_period),
            ("phase_shift", self.phase_shift),
            ("rotation_speed", self.rotation_speed),
        ];
        if let Some((knob, _)) = knobs.iter().find(|(_, value)| !value.is_finite()) {
            return Err(StyleError::NonFinite { knob: *knob });
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(StyleError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows > MAX_ROWS || self.cols > MAX_COLS {
            return Err(StyleError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
                max_rows: MAX_ROWS,
                max_cols: MAX_COLS,
            });
        }
        Ok(())
    }
}

impl Default for Style {
    fn default() -> Self {
        Preset::default().style()
    }
}

/// How particles move along the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Helix around the path via the path basis
    Helix,
    /// In-plane sideways wobble while sliding along the path
    Wobble,
}

/// One named configuration per historical sketch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    Wobble,
    OffsetHelix,
    BreathingHelix,
    #[default]
    Bulbs,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Wobble,
        Preset::OffsetHelix,
        Preset::BreathingHelix,
        Preset::Bulbs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Wobble => "wobble",
            Preset::OffsetHelix => "offset-helix",
            Preset::BreathingHelix => "breathing-helix",
            Preset::Bulbs => "bulbs",
        }
    }

    pub fn motion(self) -> Motion {
        match self {
            Preset::Wobble => Motion::Wobble,
            _ => Motion::Helix,
        }
    }

    pub fn endpoints(self) -> (Point3<f32>, Point3<f32>) {
        match self {
            Preset::Wobble => (Point3::new(-4.0, -3.0, 0.0), Point3::new(4.0, 3.0, 0.0)),
            Preset::OffsetHelix => (Point3::new(-7.0, 4.0, -8.0), Point3::new(1.0, -0.5, 4.0)),
            Preset::BreathingHelix | Preset::Bulbs => {
                (Point3::new(-7.0, 4.0, -12.0), Point3::new(2.0, -0.5, 0.0))
            }
        }
    }

    pub fn path(self) -> Result<Path, PathError> {
        let (start, end) = self.endpoints();
        Path::new(start, end)
    }

    pub fn style(self) -> Style {
        match self {
            // Wobble ignores the helix knobs; only the grid size matters.
            Preset::Wobble => Style {
                speed: 0.2,
                radius_shift_speed: 1.0,
                base_radius: 0.0,
                breathing_magnitude: 0.0,
                radius_period: 0.0,
                curve_magnitude: 1.2,
                curve_period: 0.0,
                phase: RadiusPhase::Time,
                phase_shift: 0.0,
                rotation_speed: 0.0,
                rows: 5,
                cols: 1,
            },
            // sin(20 * (t + offset / 2)) with offset = pi * r_init
            Preset::OffsetHelix => Style {
                speed: 0.1,
                radius_shift_speed: 1.0,
                base_radius: 0.8,
                breathing_magnitude: 0.0,
                radius_period: 0.0,
                curve_magnitude: 0.4,
                curve_period: 10.0 / PI,
                phase: RadiusPhase::Time,
                phase_shift: FRAC_PI_2,
                rotation_speed: 1.0,
                rows: 6,
                cols: 1,
            },
            Preset::BreathingHelix => Style {
                speed: 0.1,
                radius_shift_speed: 1.0,
                base_radius: 0.8,
                breathing_magnitude: 0.3,
                radius_period: 3.5,
                curve_magnitude: 0.2,
                curve_period: 1.8,
                phase: RadiusPhase::Combined,
                phase_shift: 0.0,
                rotation_speed: 1.0,
                rows: 40,
                cols: 80,
            },
            Preset::Bulbs => Style {
                speed: 0.1,
                radius_shift_speed: 1.0,
                base_radius: 1.0,
                breathing_magnitude: 0.0,
                radius_period: 3.5,
                curve_magnitude: 0.4,
                curve_period: 2.0,
                phase: RadiusPhase::Height,
                phase_shift: 0.0,
                rotation_speed: 2.0,
                rows: 40,
                cols: 80,
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in Preset::ALL {
            assert!(preset.style().validate().is_ok(), "{}", preset);
            assert!(preset.path().is_ok(), "{}", preset);
        }
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert!(matches!(
            "spiral".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(name)) if name == "spiral"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_knobs() {
        let mut style = Style::default();
        style.curve_period = f32::INFINITY;
        assert_eq!(
            style.validate(),
            Err(StyleError::NonFinite { knob: "curve_period" })
        );

        let mut style = Style::default();
        style.cols = 0;
        assert_eq!(
            style.validate(),
            Err(StyleError::EmptyGrid { rows: 40, cols: 0 })
        );

        let mut style = Style::default();
        style.rows = MAX_ROWS + 1;
        assert!(matches!(
            style.validate(),
            Err(StyleError::GridTooLarge { rows: 101, cols: 80, .. })
        ));
        style.rows = MAX_ROWS;
        style.cols = MAX_COLS;
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_default_is_bulbs() {
        assert_eq!(Style::default(), Preset::Bulbs.style());
        assert_eq!(Preset::default().motion(), Motion::Helix);
        assert_eq!(Preset::Wobble.motion(), Motion::Wobble);
    }
}
