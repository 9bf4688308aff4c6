use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Scalar types usable in the simulation cores. Needs the full float
/// arithmetic surface plus conversion from f64 literals.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// An autonomous or time-dependent flow: the right-hand side of an ODE.
pub trait Flow<T: Scalar> {
    /// Dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the vector field.
    /// x: current state
    /// t: current time
    /// out: buffer receiving dx/dt
    fn derivative(&self, t: T, x: &[T], out: &mut [T]);
}

/// Fixed-step time integrators.
pub trait FixedStepSolver<T: Scalar> {
    /// Advances `state` by one step of size `dt`, updating `t` in place.
    fn step(&mut self, flow: &impl Flow<T>, t: &mut T, state: &mut [T], dt: T);
}
