//! WASM bindings exposing the Helix simulation cores to the JS rendering
//! frontend. Each view gets one exported driver struct; everything crossing
//! the boundary is flat typed arrays or serde-converted plain objects.

pub mod attractor;
pub mod coil;
