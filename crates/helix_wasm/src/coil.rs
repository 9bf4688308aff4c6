//! Driver for the magnetic-field coil view.

use anyhow::{anyhow, bail, Result};
use helix_core::color::magnitude_to_hsl;
use helix_core::controls::{format_tesla, CoilControls};
use helix_core::geometry::WirePath;
use helix_core::projector::{project_to_screen, Viewport};
use helix_core::sampler::{grid_params, FieldGrid, GridBounds, ZoomRange};
use nalgebra::{Matrix4, Vector3};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// What the frontend needs to place and fill the tooltip for one grid node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverInfo {
    pub left: f64,
    pub top: f64,
    pub behind: bool,
    pub magnitude: f64,
    pub label: String,
}

/// Owns the wire geometry, the adaptive sample grid, and the current
/// control values for one coil canvas. Setters only record state; the host
/// calls [`recompute`](WasmCoil::recompute) once per tick (or parameter
/// change) and then pulls the flat output arrays.
#[wasm_bindgen]
pub struct WasmCoil {
    controls: CoilControls,
    zoom_range: ZoomRange,
    grid_bounds: GridBounds,
    zoom: f64,
    path: WirePath,
    dl: Vec<Vector3<f64>>,
    grid: FieldGrid,
}

fn regenerate_wire(controls: &CoilControls) -> Result<(WirePath, Vec<Vector3<f64>>), JsValue> {
    let path = WirePath::generate(&controls.wire_spec())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let dl = path.segment_vectors();
    Ok((path, dl))
}

impl WasmCoil {
    fn hover_info(
        &self,
        index: usize,
        view_projection: &[f64],
        width: f64,
        height: f64,
    ) -> Result<HoverInfo> {
        if view_projection.len() != 16 {
            bail!(
                "View-projection matrix must have 16 elements, got {}.",
                view_projection.len()
            );
        }
        let sample = self
            .grid
            .samples()
            .get(index)
            .ok_or_else(|| anyhow!("Grid node index {index} out of range."))?;

        let matrix = Matrix4::from_column_slice(view_projection);
        let pos = project_to_screen(&sample.position, &matrix, &Viewport { width, height });
        Ok(HoverInfo {
            left: pos.left,
            top: pos.top,
            behind: pos.behind,
            magnitude: sample.magnitude,
            label: format_tesla(sample.magnitude),
        })
    }
}

#[wasm_bindgen]
impl WasmCoil {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmCoil, JsValue> {
        console_error_panic_hook::set_once();

        let controls = CoilControls::default();
        let (path, dl) = regenerate_wire(&controls)?;
        let zoom_range = ZoomRange::default();
        Ok(WasmCoil {
            controls,
            zoom_range,
            grid_bounds: GridBounds::default(),
            zoom: zoom_range.min,
            path,
            dl,
            grid: FieldGrid::new(),
        })
    }

    /// Applies slider values (clamped to their documented ranges) and
    /// rebuilds the wire polyline.
    pub fn set_controls(
        &mut self,
        length_cm: f64,
        radius_cm: f64,
        turns: f64,
        current: f64,
    ) -> Result<(), JsValue> {
        self.controls = CoilControls::clamped(length_cm, radius_cm, turns, current);
        let (path, dl) = regenerate_wire(&self.controls)?;
        self.path = path;
        self.dl = dl;
        Ok(())
    }

    /// Records the camera distance used to derive grid extent and spacing.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    /// Re-evaluates the whole field grid for the current controls and zoom.
    pub fn recompute(&mut self) -> Result<(), JsValue> {
        let params = grid_params(self.zoom, &self.zoom_range, &self.grid_bounds);
        self.grid
            .recompute(params, &self.path, &self.dl, self.controls.current)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Wire polyline as xyz triples, for the tube/line mesh.
    pub fn wire_points(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.path.len() * 3);
        for p in self.path.points() {
            flat.extend([p.x as f32, p.y as f32, p.z as f32]);
        }
        flat
    }

    pub fn node_count(&self) -> usize {
        self.grid.samples().len()
    }

    /// Grid node positions as xyz triples (arrow origins).
    pub fn node_positions(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.node_count() * 3);
        for s in self.grid.samples() {
            flat.extend([
                s.position.x as f32,
                s.position.y as f32,
                s.position.z as f32,
            ]);
        }
        flat
    }

    /// Field vectors as xyz triples (arrow directions, unnormalized).
    pub fn node_vectors(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.node_count() * 3);
        for s in self.grid.samples() {
            flat.extend([s.vector.x as f32, s.vector.y as f32, s.vector.z as f32]);
        }
        flat
    }

    /// |B| per node, in teslas.
    pub fn node_magnitudes(&self) -> Vec<f64> {
        self.grid.samples().iter().map(|s| s.magnitude).collect()
    }

    /// Packed rgb bytes per node, from the magnitude color map.
    pub fn node_colors(&self) -> Vec<u8> {
        let mut flat = Vec::with_capacity(self.node_count() * 3);
        for s in self.grid.samples() {
            let rgb = magnitude_to_hsl(s.magnitude).to_rgb();
            flat.extend([rgb.r, rgb.g, rgb.b]);
        }
        flat
    }

    /// The resolved grid extent and spacing for the current zoom.
    pub fn grid_params(&self) -> Result<JsValue, JsValue> {
        let params = grid_params(self.zoom, &self.zoom_range, &self.grid_bounds);
        serde_wasm_bindgen::to_value(&params).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Tooltip data for the grid node at `index`: projected screen
    /// position plus the formatted |B| label. `view_projection` is the
    /// camera's combined matrix in column-major order (16 elements), passed
    /// in by the renderer; there is no ambient camera state to fall back on.
    pub fn hover(
        &self,
        index: usize,
        view_projection: &[f64],
        width: f64,
        height: f64,
    ) -> Result<JsValue, JsValue> {
        let info = self
            .hover_info(index, view_projection, width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&info).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
