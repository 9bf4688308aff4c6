//! Driver for the Lorenz attractor view.

use helix_core::controls::SimControls;
use helix_core::lorenz::{LorenzParams, LorenzSim, DEFAULT_MAX_POINTS};
use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

/// Owns the long-lived simulation state for one attractor canvas. The host
/// render loop calls [`tick`](WasmAttractor::tick) once per animation frame
/// and re-uploads the position buffer afterwards.
#[wasm_bindgen]
pub struct WasmAttractor {
    sim: LorenzSim,
    staging: Vec<f32>,
}

#[wasm_bindgen]
impl WasmAttractor {
    #[wasm_bindgen(constructor)]
    pub fn new(max_points: Option<usize>) -> Result<WasmAttractor, JsValue> {
        console_error_panic_hook::set_once();

        let capacity = max_points.unwrap_or(DEFAULT_MAX_POINTS);
        let sim = LorenzSim::new(LorenzParams::default(), capacity)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmAttractor {
            sim,
            staging: Vec::with_capacity(capacity * 3),
        })
    }

    /// Advances one animation tick (several integration sub-steps). A no-op
    /// while paused.
    pub fn tick(&mut self) {
        self.sim.tick();
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.sim.set_speed(speed);
    }

    pub fn speed(&self) -> f64 {
        self.sim.speed()
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.sim.set_playing(playing);
    }

    pub fn is_playing(&self) -> bool {
        self.sim.is_playing()
    }

    pub fn reset(&mut self) {
        self.sim.reset();
    }

    /// Applies both sim controls at once, clamped to their ranges.
    pub fn apply_controls(&mut self, speed: f64, playing: bool) {
        let controls = SimControls::clamped(speed, playing);
        self.sim.set_speed(controls.speed);
        self.sim.set_playing(controls.playing);
    }

    /// Current (x, y, z) of the integrator.
    pub fn state(&self) -> Vec<f64> {
        self.sim.state().to_vec()
    }

    /// Number of valid trajectory points (the renderer's draw range).
    pub fn point_count(&self) -> usize {
        self.sim.trajectory().len()
    }

    /// Slot index of the most recently written point.
    pub fn head(&self) -> usize {
        self.sim.trajectory().head()
    }

    pub fn capacity(&self) -> usize {
        self.sim.trajectory().capacity()
    }

    /// The raw ring storage as xyz triples, in slot order. Pair with
    /// `head`/`point_count` for draw-range rendering.
    pub fn buffer(&mut self) -> Float32Array {
        self.staging.clear();
        self.staging
            .extend(self.sim.trajectory().as_flat().iter().map(|v| *v as f32));
        Float32Array::from(self.staging.as_slice())
    }

    /// Valid points in logical order, oldest first, so a polyline stays
    /// continuous after the ring wraps.
    pub fn ordered_points(&mut self) -> Float32Array {
        self.staging.clear();
        for point in self.sim.trajectory().ordered() {
            self.staging.extend(point.iter().map(|v| *v as f32));
        }
        Float32Array::from(self.staging.as_slice())
    }
}
