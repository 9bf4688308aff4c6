use crate::field::{sample_field, FieldSample};
use crate::geometry::WirePath;
use anyhow::{bail, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Camera-distance interval (meters) over which the grid adapts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: 0.08, max: 0.5 }
    }
}

/// Extent and spacing bounds (meters) the zoom interpolates between.
///
/// Extent and spacing co-vary off the single zoom parameter: denser near,
/// sparser far. That coupling is what keeps the node count bounded at
/// O((extent/spacing)^2) across the whole zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_extent: f64,
    pub max_extent: f64,
    pub min_spacing: f64,
    pub max_spacing: f64,
}

impl Default for GridBounds {
    /// Matches the launch view: a 5 cm half-extent sampled every 0.5 cm
    /// up close, relaxing to 10 cm / 1 cm when zoomed out.
    fn default() -> Self {
        Self {
            min_extent: 0.05,
            max_extent: 0.10,
            min_spacing: 0.005,
            max_spacing: 0.010,
        }
    }
}

/// Resolved grid geometry for one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    pub extent: f64,
    pub spacing: f64,
}

impl GridParams {
    /// Nodes along one axis, boundary included.
    pub fn nodes_per_axis(&self) -> usize {
        (2.0 * self.extent / self.spacing + 1e-9).floor() as usize + 1
    }

    /// The (x, z) lattice at y = 0, the wire's equatorial plane.
    ///
    /// Positions are generated by index rather than by accumulating
    /// floating-point steps, so the +extent boundary lands exactly and the
    /// node count is deterministic.
    pub fn node_positions(&self) -> Vec<Vector3<f64>> {
        let per_axis = self.nodes_per_axis();
        let mut nodes = Vec::with_capacity(per_axis * per_axis);
        for ix in 0..per_axis {
            let x = -self.extent + ix as f64 * self.spacing;
            for iz in 0..per_axis {
                let z = -self.extent + iz as f64 * self.spacing;
                nodes.push(Vector3::new(x, 0.0, z));
            }
        }
        nodes
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Maps a camera distance to grid extent and spacing.
///
/// The zoom value is normalized over `range` and clamped to [0, 1]; both
/// outputs grow monotonically with it. Keep this the only source of grid
/// dimensions so the two cannot be tuned apart.
pub fn grid_params(zoom: f64, range: &ZoomRange, bounds: &GridBounds) -> GridParams {
    let t = if range.max > range.min {
        ((zoom - range.min) / (range.max - range.min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    GridParams {
        extent: lerp(bounds.min_extent, bounds.max_extent, t),
        spacing: lerp(bounds.min_spacing, bounds.max_spacing, t),
    }
}

/// Full-grid field evaluation with storage reused across recomputes.
///
/// The grid is recomputed whole on every call; samples are never patched
/// incrementally. Node positions are regenerated only when the grid
/// parameters actually changed.
pub struct FieldGrid {
    params: GridParams,
    nodes: Vec<Vector3<f64>>,
    samples: Vec<FieldSample>,
}

impl Default for FieldGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldGrid {
    pub fn new() -> Self {
        Self {
            params: GridParams {
                extent: 0.0,
                spacing: 0.0,
            },
            nodes: Vec::new(),
            samples: Vec::new(),
        }
    }

    pub fn params(&self) -> GridParams {
        self.params
    }

    pub fn samples(&self) -> &[FieldSample] {
        &self.samples
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Re-evaluates the whole grid for the given wire and current.
    ///
    /// `dl` must be the segment vectors of `path`. O(N·M) for N wire
    /// samples and M grid nodes.
    pub fn recompute(
        &mut self,
        params: GridParams,
        path: &WirePath,
        dl: &[Vector3<f64>],
        current: f64,
    ) -> Result<&[FieldSample]> {
        if params.spacing <= 0.0 || !params.spacing.is_finite() {
            bail!("Grid spacing must be positive and finite.");
        }
        if params.extent < 0.0 || !params.extent.is_finite() {
            bail!("Grid extent must be non-negative and finite.");
        }
        if dl.len() != path.len() {
            bail!(
                "Segment vector count ({}) does not match wire sample count ({}).",
                dl.len(),
                path.len()
            );
        }

        if params != self.params {
            self.params = params;
            self.nodes = params.node_positions();
        }

        self.samples.clear();
        self.samples.reserve(self.nodes.len());
        for node in &self.nodes {
            self.samples
                .push(sample_field(node, path.points(), dl, current));
        }

        Ok(&self.samples)
    }
}
