use serde::{Deserialize, Serialize};

/// Per-step cart displacement command, conventionally in [-1.0, 1.0].
pub type ControlInput = f64;

/// Cart-pole state. Angles are radians and never wrap.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationState {
    pub x: f64,      // cart position
    pub dx: f64,     // cart velocity
    pub theta: f64,  // pole angle from vertical
    pub dtheta: f64, // angular velocity
}

impl SimulationState {
    /// The zero state every fitness evaluation starts from.
    pub const CANONICAL: SimulationState = SimulationState {
        x: 0.0,
        dx: 0.0,
        theta: 0.0,
        dtheta: 0.0,
    };

    pub fn theta_degrees(&self) -> f64 {
        self.theta.to_degrees()
    }
}

/// One observed step of a trajectory replay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub step: usize,
    pub time: f64,
    pub control: ControlInput,
    pub state: SimulationState,
    pub alive: bool,
}
