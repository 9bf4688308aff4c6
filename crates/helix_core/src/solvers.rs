use crate::traits::{FixedStepSolver, Flow, Scalar};

/// Explicit (forward) Euler solver.
///
/// First order, fixed step. The chaotic toys drive it with a small dt and
/// several sub-steps per frame, which is all the accuracy they need; the
/// derivative scratch buffer is allocated once and reused across steps.
pub struct Euler<T: Scalar> {
    dv: Vec<T>,
}

impl<T: Scalar> Euler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            dv: vec![T::from_f64(0.0).unwrap(); dim],
        }
    }
}

impl<T: Scalar> FixedStepSolver<T> for Euler<T> {
    fn step(&mut self, flow: &impl Flow<T>, t: &mut T, state: &mut [T], dt: T) {
        let t0 = *t;

        // y_next = y + dt * f(t, y)
        flow.derivative(t0, state, &mut self.dv);
        for i in 0..state.len() {
            state[i] = state[i] + dt * self.dv[i];
        }

        *t = t0 + dt;
    }
}

#[cfg(test)]
mod tests {
    use super::Euler;
    use crate::traits::{FixedStepSolver, Flow};

    struct Decay;

    impl Flow<f64> for Decay {
        fn dimension(&self) -> usize {
            1
        }

        fn derivative(&self, _t: f64, x: &[f64], out: &mut [f64]) {
            out[0] = -x[0];
        }
    }

    #[test]
    fn euler_step_matches_first_order_update() {
        let mut solver = Euler::new(1);
        let mut t = 0.0;
        let mut state = [2.0];

        solver.step(&Decay, &mut t, &mut state, 0.1);

        // y1 = y0 + dt * (-y0) = y0 * (1 - dt)
        assert!((state[0] - 1.8).abs() < 1e-15);
    }

    #[test]
    fn euler_advances_time_by_dt() {
        let mut solver = Euler::new(1);
        let mut t = 1.5;
        let mut state = [0.0];

        solver.step(&Decay, &mut t, &mut state, 0.25);

        assert!((t - 1.75).abs() < 1e-15);
    }
}
