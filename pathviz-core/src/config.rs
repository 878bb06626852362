/// Settings file parser: `key = value` lines that pick a preset and override it
///
/// ```text
/// # bulbs, but slower and denser
/// preset = bulbs
/// speed = 0.05
/// rows = 60
/// path.start = -7, 4, -12
/// ```
use std::path::Path as FsPath;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map},
    number::complete::float,
    sequence::{delimited, separated_pair, tuple},
    IResult,
};
use nalgebra::Point3;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::path::Path;
use crate::scene::Scene;
use crate::style::{Preset, RadiusPhase, Style};

/// Right-hand side of a setting
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f32),
    Vector(Point3<f32>),
    Word(String),
}

/// One `key = value` line
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub line: usize,
    pub key: String,
    pub value: Value,
}

/// A preset with overrides applied, ready to build a scene
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub preset: Preset,
    pub style: Style,
    pub start: Point3<f32>,
    pub end: Point3<f32>,
}

impl SceneConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let (start, end) = preset.endpoints();
        Self {
            preset,
            style: preset.style(),
            start,
            end,
        }
    }

    /// Parse settings text. `preset` is applied first wherever it appears.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        Self::parse_with_base(input, Preset::default())
    }

    /// Like [`SceneConfig::parse`], starting from `base` when the text names no preset
    pub fn parse_with_base(input: &str, base: Preset) -> Result<Self, ConfigError> {
        let settings = parse_settings(input)?;

        let mut preset = base;
        for setting in settings.iter().filter(|s| s.key == "preset") {
            preset = expect_word(setting)?.parse()?;
        }

        let mut config = Self::from_preset(preset);
        for setting in settings.iter().filter(|s| s.key != "preset") {
            config.apply(setting)?;
        }
        config.style.validate()?;
        Path::new(config.start, config.end)?;

        debug!(preset = %config.preset, overrides = settings.len(), "parsed settings");
        Ok(config)
    }

    pub fn load(file: &FsPath, base: Preset) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(file)?;
        let config = Self::parse_with_base(&text, base)?;
        info!(file = %file.display(), preset = %config.preset, "loaded settings");
        Ok(config)
    }

    pub fn into_scene(self) -> Result<Scene, ConfigError> {
        let path = Path::new(self.start, self.end)?;
        Ok(Scene::new(path, self.style, self.preset.motion())?)
    }

    fn apply(&mut self, setting: &Setting) -> Result<(), ConfigError> {
        let style = &mut self.style;
        match setting.key.as_str() {
            "speed" => style.speed = expect_number(setting)?,
            "radius_shift_speed" => style.radius_shift_speed = expect_number(setting)?,
            "base_radius" => style.base_radius = expect_number(setting)?,
            "breathing_magnitude" => style.breathing_magnitude = expect_number(setting)?,
            "radius_period" => style.radius_period = expect_number(setting)?,
            "curve_magnitude" => style.curve_magnitude = expect_number(setting)?,
            "curve_period" => style.curve_period = expect_number(setting)?,
            "phase_shift" => style.phase_shift = expect_number(setting)?,
            "rotation_speed" => style.rotation_speed = expect_number(setting)?,
            "rows" => style.rows = expect_count(setting)?,
            "cols" => style.cols = expect_count(setting)?,
            "phase" => {
                style.phase = expect_word(setting)?.parse::<RadiusPhase>().map_err(|_| {
                    ConfigError::InvalidValue {
                        line: setting.line,
                        key: setting.key.clone(),
                        expected: "one of time, height, combined",
                    }
                })?
            }
            "path.start" => self.start = expect_vector(setting)?,
            "path.end" => self.end = expect_vector(setting)?,
            _ => {
                return Err(ConfigError::UnknownKey {
                    line: setting.line,
                    key: setting.key.clone(),
                })
            }
        }
        Ok(())
    }
}

/// Split settings text into `key = value` entries, skipping blanks and comments
pub fn parse_settings(input: &str) -> Result<Vec<Setting>, ConfigError> {
    let mut settings = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        match all_consuming(parse_setting)(text) {
            Ok((_, (key, value))) => settings.push(Setting {
                line,
                key: key.to_string(),
                value,
            }),
            Err(e) => {
                return Err(ConfigError::Syntax {
                    line,
                    message: format!("expected `key = value`, got `{}` ({:?})", text, e),
                })
            }
        }
    }
    Ok(settings)
}

fn parse_setting(input: &str) -> IResult<&str, (&str, Value)> {
    separated_pair(parse_key, delimited(multispace0, tag("="), multispace0), parse_value)(input)
}

fn parse_key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.')(input)
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    alt((
        all_consuming(map(parse_vector3, Value::Vector)),
        all_consuming(map(float, Value::Number)),
        all_consuming(map(parse_word, |w: &str| Value::Word(w.to_string()))),
    ))(input)
}

fn parse_word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)
}

fn parse_vector3(input: &str) -> IResult<&str, Point3<f32>> {
    let (input, (x, _, y, _, z)) = tuple((float, comma, float, comma, float))(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

fn expect_number(setting: &Setting) -> Result<f32, ConfigError> {
    match setting.value {
        Value::Number(n) => Ok(n),
        _ => Err(invalid(setting, "a number")),
    }
}

fn expect_count(setting: &Setting) -> Result<usize, ConfigError> {
    match setting.value {
        Value::Number(n) if n >= 1.0 && n.fract() == 0.0 => Ok(n as usize),
        _ => Err(invalid(setting, "a positive whole number")),
    }
}

fn expect_vector(setting: &Setting) -> Result<Point3<f32>, ConfigError> {
    match setting.value {
        Value::Vector(v) => Ok(v),
        _ => Err(invalid(setting, "a vector `x, y, z`")),
    }
}

fn expect_word(setting: &Setting) -> Result<&str, ConfigError> {
    match &setting.value {
        Value::Word(w) => Ok(w),
        _ => Err(invalid(setting, "a name")),
    }
}

fn invalid(setting: &Setting, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        line: setting.line,
        key: setting.key.clone(),
        expected,
    }
}
