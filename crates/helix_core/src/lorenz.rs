use crate::solvers::Euler;
use crate::traits::{FixedStepSolver, Flow, Scalar};
use crate::trajectory::Trajectory;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Base integration step before the user speed multiplier is applied.
pub const BASE_DT: f64 = 0.005;

/// Sub-steps per animation tick. Smooths the drawn curve independent of the
/// host frame rate; not user-exposed.
pub const SUBSTEPS_PER_TICK: usize = 5;

/// Documented range for the user speed multiplier. The system is
/// unconditionally stable at the classic parameters for dt inside
/// BASE_DT * this range.
pub const SPEED_MIN: f64 = 0.2;
pub const SPEED_MAX: f64 = 5.0;

/// Default ring-buffer capacity.
pub const DEFAULT_MAX_POINTS: usize = 10_000;

const INITIAL_STATE: [f64; 3] = [0.1, 0.0, 0.0];

/// The σ, ρ, β parameters of the Lorenz system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for LorenzParams {
    /// The classic chaotic parameter set.
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

/// The Lorenz vector field as a [`Flow`], generic over the scalar type.
pub struct LorenzFlow<T: Scalar> {
    sigma: T,
    rho: T,
    beta: T,
}

impl<T: Scalar> LorenzFlow<T> {
    pub fn new(params: LorenzParams) -> Self {
        Self {
            sigma: T::from_f64(params.sigma).unwrap(),
            rho: T::from_f64(params.rho).unwrap(),
            beta: T::from_f64(params.beta).unwrap(),
        }
    }
}

impl<T: Scalar> Flow<T> for LorenzFlow<T> {
    fn dimension(&self) -> usize {
        3
    }

    fn derivative(&self, _t: T, x: &[T], out: &mut [T]) {
        out[0] = self.sigma * (x[1] - x[0]);
        out[1] = x[0] * (self.rho - x[2]) - x[1];
        out[2] = x[0] * x[1] - self.beta * x[2];
    }
}

/// The long-lived Lorenz simulation: state, solver, and trajectory buffer.
///
/// Driven once per animation tick by the host render loop. All sub-steps of
/// a tick complete before the buffer is read, so no locking is needed; the
/// renderer only sees the buffer between ticks.
pub struct LorenzSim {
    flow: LorenzFlow<f64>,
    solver: Euler<f64>,
    state: [f64; 3],
    t: f64,
    speed: f64,
    playing: bool,
    trajectory: Trajectory,
}

impl LorenzSim {
    pub fn new(params: LorenzParams, max_points: usize) -> Result<Self> {
        if max_points == 0 {
            bail!("Trajectory capacity must be at least 1.");
        }
        let flow = LorenzFlow::new(params);
        Ok(Self {
            solver: Euler::new(flow.dimension()),
            flow,
            state: INITIAL_STATE,
            t: 0.0,
            speed: 1.0,
            playing: true,
            trajectory: Trajectory::new(max_points),
        })
    }

    pub fn with_defaults() -> Self {
        Self::new(LorenzParams::default(), DEFAULT_MAX_POINTS)
            .expect("default capacity is positive")
    }

    /// Sets the speed multiplier, clamped to the documented range.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(SPEED_MIN, SPEED_MAX);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Play/pause gates step execution only; the buffer is left untouched.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn state(&self) -> [f64; 3] {
        self.state
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Advances the simulation by one animation tick (a fixed number of
    /// sub-steps), writing each sub-step's state into the ring buffer.
    /// A no-op while paused.
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let dt = BASE_DT * self.speed;
        for _ in 0..SUBSTEPS_PER_TICK {
            self.solver
                .step(&self.flow, &mut self.t, &mut self.state, dt);
            self.trajectory.push(self.state);
        }
    }

    /// Returns to the fixed initial condition and zeroes the buffer,
    /// leaving a single renderable point. Valid at any time, including
    /// mid-flight between ticks.
    pub fn reset(&mut self) {
        self.state = INITIAL_STATE;
        self.t = 0.0;
        self.trajectory.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_matches_hand_computed_values() {
        let flow = LorenzFlow::<f64>::new(LorenzParams::default());
        let mut out = [0.0; 3];

        flow.derivative(0.0, &[1.0, 1.0, 1.0], &mut out);

        assert!((out[0] - 0.0).abs() < 1e-12);
        assert!((out[1] - 26.0).abs() < 1e-12);
        assert!((out[2] - (1.0 - 8.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn new_rejects_zero_capacity() {
        assert!(LorenzSim::new(LorenzParams::default(), 0).is_err());
    }

    #[test]
    fn identical_runs_produce_identical_trajectories() {
        let mut a = LorenzSim::with_defaults();
        let mut b = LorenzSim::with_defaults();
        a.set_speed(1.7);
        b.set_speed(1.7);

        for _ in 0..200 {
            a.tick();
            b.tick();
        }

        assert_eq!(a.state(), b.state());
        assert_eq!(a.trajectory().as_flat(), b.trajectory().as_flat());
    }

    #[test]
    fn tick_writes_one_point_per_substep() {
        let mut sim = LorenzSim::with_defaults();
        let before = sim.trajectory().len();

        sim.tick();

        assert_eq!(sim.trajectory().len(), before + SUBSTEPS_PER_TICK);
    }

    #[test]
    fn paused_tick_freezes_state_and_buffer() {
        let mut sim = LorenzSim::with_defaults();
        sim.tick();
        let state = sim.state();
        let head = sim.trajectory().head();
        let count = sim.trajectory().len();

        sim.set_playing(false);
        sim.tick();
        sim.tick();

        assert_eq!(sim.state(), state);
        assert_eq!(sim.trajectory().head(), head);
        assert_eq!(sim.trajectory().len(), count);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut sim = LorenzSim::with_defaults();
        for _ in 0..50 {
            sim.tick();
        }

        sim.reset();
        let state = sim.state();
        let flat = sim.trajectory().as_flat().to_vec();

        sim.reset();

        assert_eq!(sim.state(), state);
        assert_eq!(sim.trajectory().as_flat(), &flat[..]);
        assert_eq!(sim.trajectory().len(), 1);
        assert_eq!(sim.trajectory().head(), 0);
    }

    #[test]
    fn reset_leaves_one_renderable_point() {
        let mut sim = LorenzSim::with_defaults();
        for _ in 0..10 {
            sim.tick();
        }

        sim.reset();

        assert_eq!(sim.trajectory().snapshot(), vec![[0.0, 0.0, 0.0]]);
        assert_eq!(sim.state(), [0.1, 0.0, 0.0]);
    }

    #[test]
    fn speed_is_clamped_to_documented_range() {
        let mut sim = LorenzSim::with_defaults();

        sim.set_speed(100.0);
        assert_eq!(sim.speed(), SPEED_MAX);

        sim.set_speed(0.0);
        assert_eq!(sim.speed(), SPEED_MIN);
    }

    #[test]
    fn ring_invariants_hold_across_saturation() {
        let mut sim = LorenzSim::new(LorenzParams::default(), 16).expect("capacity is positive");

        for _ in 0..40 {
            sim.tick();
            assert!(sim.trajectory().len() <= 16);
            let base = sim.trajectory().head() * 3;
            let stored = [
                sim.trajectory().as_flat()[base],
                sim.trajectory().as_flat()[base + 1],
                sim.trajectory().as_flat()[base + 2],
            ];
            assert_eq!(stored, sim.state());
        }
    }

    #[test]
    fn saturated_snapshot_ends_at_current_state() {
        let mut sim = LorenzSim::new(LorenzParams::default(), 8).expect("capacity is positive");
        for _ in 0..20 {
            sim.tick();
        }

        let snapshot = sim.trajectory().snapshot();
        assert_eq!(snapshot.len(), 8);
        assert_eq!(*snapshot.last().expect("snapshot is non-empty"), sim.state());
    }
}
