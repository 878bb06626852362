/// pathviz web - WASM facade for browser hosts
///
/// The page owns the canvas, the per-particle renderables and the debug
/// panel; this crate owns the particles and computes their positions.

use js_sys::Float32Array;
use nalgebra::Point3;
use pathviz_core::{FrameLimiter, Knob, Preset, Scene, SceneConfig};
use wasm_bindgen::prelude::*;

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// A scene plus the frame limiter and position buffer a page needs per frame
#[wasm_bindgen]
pub struct PathViz {
    scene: Scene,
    limiter: FrameLimiter,
    positions: Vec<Point3<f32>>,
    flat: Vec<f32>,
}

#[wasm_bindgen]
impl PathViz {
    /// Build from a preset name (`bulbs` if omitted)
    #[wasm_bindgen(constructor)]
    pub fn new(preset: Option<String>) -> Result<PathViz, JsValue> {
        let preset = match preset {
            Some(name) => name.parse::<Preset>().map_err(to_js)?,
            None => Preset::default(),
        };
        let scene = Scene::from_preset(preset).map_err(to_js)?;
        log(&format!(
            "pathviz: {} with {} particles",
            preset,
            scene.grid().len()
        ));
        Ok(Self::with_scene(scene))
    }

    /// Build from settings-file text
    #[wasm_bindgen(js_name = fromSettings)]
    pub fn from_settings(text: &str) -> Result<PathViz, JsValue> {
        let scene = SceneConfig::parse(text)
            .and_then(SceneConfig::into_scene)
            .map_err(to_js)?;
        Ok(Self::with_scene(scene))
    }

    #[wasm_bindgen(js_name = setPath)]
    pub fn set_path(
        &mut self,
        sx: f32,
        sy: f32,
        sz: f32,
        ex: f32,
        ey: f32,
        ez: f32,
    ) -> Result<(), JsValue> {
        self.scene
            .set_path(Point3::new(sx, sy, sz), Point3::new(ex, ey, ez))
            .map_err(to_js)
    }

    /// Knob names match the panel labels' order: speed, curveMagnitude,
    /// curvePeriod, radiusShiftSpeed, rotationSpeed, cols, rows
    pub fn knob(&self, name: &str) -> Result<f32, JsValue> {
        Ok(self.scene.style.knob(knob_named(name)?))
    }

    /// Set a knob; returns the clamped, snapped value actually stored
    #[wasm_bindgen(js_name = setKnob)]
    pub fn set_knob(&mut self, name: &str, value: f32) -> Result<f32, JsValue> {
        Ok(self.scene.style.set_knob(knob_named(name)?, value))
    }

    /// Rebuild particles from the current rows and cols
    pub fn regenerate(&mut self) -> Result<u32, JsValue> {
        self.scene.regenerate().map_err(to_js)?;
        Ok(self.scene.grid().len() as u32)
    }

    pub fn count(&self) -> u32 {
        self.scene.grid().len() as u32
    }

    /// Positions as `[x0, y0, z0, x1, ...]`, or `undefined` if the frame is throttled
    pub fn frame(&mut self, elapsed: f64) -> Option<Float32Array> {
        if !self.limiter.ready(elapsed) {
            return None;
        }
        self.compute(elapsed);
        Some(Float32Array::from(self.flat.as_slice()))
    }

    /// Palette slot per particle for `palette_len` colors
    #[wasm_bindgen(js_name = colorIndices)]
    pub fn color_indices(&self, palette_len: u32) -> Vec<u32> {
        let grid = self.scene.grid();
        (0..grid.len())
            .map(|i| grid.color_index(i, palette_len as usize) as u32)
            .collect()
    }
}

impl PathViz {
    fn with_scene(scene: Scene) -> Self {
        Self {
            scene,
            limiter: FrameLimiter::default(),
            positions: Vec::new(),
            flat: Vec::new(),
        }
    }

    fn compute(&mut self, elapsed: f64) {
        self.scene.positions(elapsed, &mut self.positions);
        self.flat.clear();
        self.flat
            .extend(self.positions.iter().flat_map(|p| [p.x, p.y, p.z]));
    }
}

fn knob_named(name: &str) -> Result<Knob, JsValue> {
    match name {
        "speed" => Ok(Knob::Speed),
        "curveMagnitude" => Ok(Knob::CurveMagnitude),
        "curvePeriod" => Ok(Knob::CurvePeriod),
        "radiusShiftSpeed" => Ok(Knob::RadiusShiftSpeed),
        "rotationSpeed" => Ok(Knob::RotationSpeed),
        "cols" => Ok(Knob::Rings),
        "rows" => Ok(Knob::RingDensity),
        other => Err(JsValue::from_str(&format!("unknown knob `{}`", other))),
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    Ok(())
}
