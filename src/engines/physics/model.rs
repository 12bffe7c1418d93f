use crate::types::{ControlInput, SimulationState};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

// --- Physics Parameters ---
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParameters {
    pub gravity: f64,
    pub rod_length: f64,
    pub position_limit: f64,
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        Self {
            gravity: 10.0,
            rod_length: 2.0,
            position_limit: 10.0,
        }
    }
}

/// Discrete-time cart-pole dynamics.
///
/// The control input is a cart displacement for the step, so cart velocity is
/// imposed directly (`dx = control / dt`) and the cart acceleration that drives
/// the pole is the finite difference against the previous velocity. The pole is
/// integrated with explicit Euler:
///
/// ```text
/// ddtheta = (-ddx * cos(theta) + g * sin(theta)) / L
/// dtheta' = dtheta + ddtheta * dt
/// theta'  = theta + dtheta' * dt
/// ```
///
/// See <http://en.wikipedia.org/wiki/Inverted_pendulum>.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsModel {
    params: PhysicsParameters,
}

impl PhysicsModel {
    pub fn new(params: PhysicsParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PhysicsParameters {
        &self.params
    }

    /// Advance one timestep. Returns the new state and whether the system is
    /// still inside bounds. A `false` result is terminal: the caller stops
    /// stepping, and the returned state is only meaningful for display.
    pub fn step(
        &self,
        state: &SimulationState,
        dt: f64,
        control: ControlInput,
    ) -> (SimulationState, bool) {
        let mut next = *state;

        next.x = state.x + control;
        if next.x < -self.params.position_limit || next.x > self.params.position_limit {
            return (next, false);
        }

        let ddx = (control / dt - state.dx) / dt;
        next.dx = control / dt;

        let ddtheta = (-ddx * state.theta.cos() + self.params.gravity * state.theta.sin())
            / self.params.rod_length;
        next.dtheta = state.dtheta + ddtheta * dt;
        next.theta = state.theta + next.dtheta * dt;

        // open interval: exactly horizontal counts as fallen
        let alive = next.theta > -FRAC_PI_2 && next.theta < FRAC_PI_2;
        (next, alive)
    }
}
