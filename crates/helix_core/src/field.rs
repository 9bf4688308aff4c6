use nalgebra::{Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Vacuum permeability, T·m/A.
pub const MU_0: f64 = 4.0 * PI * 1e-7;

/// Segment contributions closer than this to the sample point are skipped.
///
/// This avoids the singular blow-up at the wire itself but is a plain
/// exclusion, not a regularization: magnitudes within one epsilon of the
/// wire are undercounted. Acceptable for the visual grid, which never
/// samples that close on purpose.
pub const SINGULARITY_EPS: f64 = 1e-6;

/// The evaluated field at one sample point. Ephemeral; recomputed whenever
/// geometry, current, or the sample point change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    pub position: Vector3<f64>,
    pub vector: Vector3<f64>,
    pub magnitude: f64,
}

impl FieldSample {
    /// Unit direction of the field, or `None` at exact cancellation points
    /// where the magnitude is zero.
    pub fn direction(&self) -> Option<Unit<Vector3<f64>>> {
        if self.magnitude == 0.0 {
            None
        } else {
            Some(Unit::new_unchecked(self.vector / self.magnitude))
        }
    }
}

/// Discretized Biot-Savart sum over every wire segment:
/// B(r) = (μ₀ I / 4π) Σ dlᵢ × (r − Pᵢ) / |r − Pᵢ|³.
///
/// `points` and `dl` must align index-for-index (see
/// [`WirePath::segment_vectors`](crate::geometry::WirePath::segment_vectors)).
/// O(N) per call; this is the dominant cost of a grid evaluation.
pub fn biot_savart(
    r: &Vector3<f64>,
    points: &[Vector3<f64>],
    dl: &[Vector3<f64>],
    current: f64,
) -> Vector3<f64> {
    let mut b = Vector3::zeros();
    for (p, dl_i) in points.iter().zip(dl) {
        let rel = r - p;
        let dist = rel.norm();
        if dist > SINGULARITY_EPS {
            b += dl_i.cross(&rel) / (dist * dist * dist);
        }
    }
    b * (MU_0 * current / (4.0 * PI))
}

/// Evaluates the field at `r` and packages it with its magnitude.
pub fn sample_field(
    r: &Vector3<f64>,
    points: &[Vector3<f64>],
    dl: &[Vector3<f64>],
    current: f64,
) -> FieldSample {
    let vector = biot_savart(r, points, dl, current);
    FieldSample {
        position: *r,
        vector,
        magnitude: vector.norm(),
    }
}
