use crate::geometry::{WireSpec, DEFAULT_WIRE_SAMPLES};
use crate::lorenz::{SPEED_MAX, SPEED_MIN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Documented slider ranges. Lengths are in centimeters at this boundary;
/// conversion to the core's meters happens in [`CoilControls::wire_spec`].
pub const COIL_LENGTH_CM: (f64, f64) = (1.0, 50.0);
pub const COIL_RADIUS_CM: (f64, f64) = (0.2, 10.0);
pub const COIL_TURNS: (f64, f64) = (1.0, 30.0);
pub const COIL_CURRENT_A: (f64, f64) = (0.1, 5.0);
pub const SIM_SPEED: (f64, f64) = (SPEED_MIN, SPEED_MAX);

/// A control value rejected on the programmatic path. Slider input is
/// clamped instead and never produces this.
#[derive(Debug, Error, PartialEq)]
pub enum ControlError {
    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
}

fn check(name: &'static str, value: f64, (min, max): (f64, f64)) -> Result<f64, ControlError> {
    if !value.is_finite() {
        return Err(ControlError::NotFinite { name, value });
    }
    if value < min || value > max {
        return Err(ControlError::OutOfRange {
            name,
            min,
            max,
            value,
        });
    }
    Ok(value)
}

fn clamp(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}

/// The coil view's user-adjustable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoilControls {
    pub length_cm: f64,
    pub radius_cm: f64,
    /// 0 selects a straight wire; otherwise within [`COIL_TURNS`].
    pub turns: f64,
    pub current: f64,
}

impl Default for CoilControls {
    /// The values the sliders start at.
    fn default() -> Self {
        Self {
            length_cm: 5.0,
            radius_cm: 1.0,
            turns: 10.0,
            current: 1.0,
        }
    }
}

impl CoilControls {
    /// Slider path: pulls every value into its documented range.
    pub fn clamped(length_cm: f64, radius_cm: f64, turns: f64, current: f64) -> Self {
        Self {
            length_cm: clamp(length_cm, COIL_LENGTH_CM),
            radius_cm: clamp(radius_cm, COIL_RADIUS_CM),
            turns: if turns == 0.0 {
                0.0
            } else {
                clamp(turns, COIL_TURNS)
            },
            current: clamp(current, COIL_CURRENT_A),
        }
    }

    /// Programmatic path: rejects anything outside the documented ranges.
    pub fn checked(
        length_cm: f64,
        radius_cm: f64,
        turns: f64,
        current: f64,
    ) -> Result<Self, ControlError> {
        Ok(Self {
            length_cm: check("coil length", length_cm, COIL_LENGTH_CM)?,
            radius_cm: check("coil radius", radius_cm, COIL_RADIUS_CM)?,
            turns: if turns == 0.0 {
                0.0
            } else {
                check("turns", turns, COIL_TURNS)?
            },
            current: check("current", current, COIL_CURRENT_A)?,
        })
    }

    /// Converts to core units (meters) at the fixed wire resolution.
    pub fn wire_spec(&self) -> WireSpec {
        WireSpec {
            length: self.length_cm / 100.0,
            radius: self.radius_cm / 100.0,
            turns: self.turns,
            samples: DEFAULT_WIRE_SAMPLES,
        }
    }
}

/// The attractor view's user-adjustable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimControls {
    pub speed: f64,
    pub playing: bool,
}

impl Default for SimControls {
    fn default() -> Self {
        Self {
            speed: 1.0,
            playing: true,
        }
    }
}

impl SimControls {
    pub fn clamped(speed: f64, playing: bool) -> Self {
        Self {
            speed: clamp(speed, SIM_SPEED),
            playing,
        }
    }

    pub fn checked(speed: f64, playing: bool) -> Result<Self, ControlError> {
        Ok(Self {
            speed: check("speed", speed, SIM_SPEED)?,
            playing,
        })
    }
}

/// Tooltip text for a field magnitude: scientific notation, three
/// fractional digits, tesla.
pub fn format_tesla(magnitude: f64) -> String {
    format!("|B| = {magnitude:.3e} T")
}
