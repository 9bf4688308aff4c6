use anyhow::{bail, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Polyline resolution used by the interactive views.
pub const DEFAULT_WIRE_SAMPLES: usize = 200;

/// Parametric description of a current-carrying wire. All lengths in meters.
///
/// `turns == 0` selects a straight wire along the x-axis; any positive
/// (possibly fractional) turn count selects a helix of constant pitch
/// stretched along x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireSpec {
    pub length: f64,
    pub radius: f64,
    pub turns: f64,
    pub samples: usize,
}

impl Default for WireSpec {
    /// The coil shown on launch: 5 cm long, 1 cm radius, 10 turns.
    fn default() -> Self {
        Self {
            length: 0.05,
            radius: 0.01,
            turns: 10.0,
            samples: DEFAULT_WIRE_SAMPLES,
        }
    }
}

/// Ordered polyline approximating the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePath {
    points: Vec<Vector3<f64>>,
}

impl WirePath {
    /// Samples the wire described by `spec`.
    ///
    /// Zero-extent inputs (length or radius of 0) are valid and produce
    /// coincident points; downstream consumers tolerate them. Negative or
    /// non-finite dimensions and a resolution below 2 are caller contract
    /// violations and are rejected here.
    pub fn generate(spec: &WireSpec) -> Result<Self> {
        if spec.samples < 2 {
            bail!("Wire resolution must be at least 2 samples.");
        }
        if !spec.length.is_finite() || spec.length < 0.0 {
            bail!("Wire length must be finite and non-negative.");
        }
        if !spec.radius.is_finite() || spec.radius < 0.0 {
            bail!("Wire radius must be finite and non-negative.");
        }
        if !spec.turns.is_finite() || spec.turns < 0.0 {
            bail!("Turn count must be finite and non-negative.");
        }

        let n = spec.samples;
        let mut points = Vec::with_capacity(n);
        if spec.turns == 0.0 {
            for i in 0..n {
                let x = (i as f64 / (n - 1) as f64) * spec.length - spec.length / 2.0;
                points.push(Vector3::new(x, 0.0, 0.0));
            }
        } else {
            let theta_max = 2.0 * PI * spec.turns;
            for i in 0..n {
                let t = (i as f64 / (n - 1) as f64) * theta_max;
                let x = (spec.length / theta_max) * t - spec.length / 2.0;
                points.push(Vector3::new(
                    x,
                    spec.radius * t.cos(),
                    spec.radius * t.sin(),
                ));
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Per-point segment direction vectors for the Biot-Savart sum.
    ///
    /// Entry i is point[i+1] - point[i]; the final entry duplicates its
    /// predecessor so the result aligns index-for-index with the path.
    pub fn segment_vectors(&self) -> Vec<Vector3<f64>> {
        let n = self.points.len();
        let mut dl = Vec::with_capacity(n);
        for i in 0..n - 1 {
            dl.push(self.points[i + 1] - self.points[i]);
        }
        dl.push(dl[n - 2]);
        dl
    }
}
