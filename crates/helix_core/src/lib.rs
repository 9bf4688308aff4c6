//! Numeric core for the Helix interactive physics toys: a Lorenz-attractor
//! integrator feeding a fixed-capacity trajectory buffer, and a discretized
//! Biot-Savart solver sampling the magnetic field of a coil over a
//! zoom-adaptive grid. Rendering is a collaborator, not a concern: this
//! crate emits point sequences, field samples, colors, and screen
//! coordinates, and owns no GPU or DOM state.

pub mod color;
pub mod controls;
pub mod field;
pub mod geometry;
pub mod lorenz;
pub mod projector;
pub mod sampler;
pub mod solvers;
pub mod traits;
pub mod trajectory;
