use crate::engines::physics::PhysicsModel;
use crate::types::{ControlInput, SimulationState, TracePoint};

/// Replays control sequences through the physics model from the canonical start state.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryRunner {
    model: PhysicsModel,
    dt: f64,
}

impl TrajectoryRunner {
    pub fn new(model: PhysicsModel, dt: f64) -> Self {
        Self { model, dt }
    }

    pub fn model(&self) -> &PhysicsModel {
        &self.model
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of steps survived before the first failing step, or the full
    /// sequence length if none fail.
    pub fn fitness(&self, steps: &[ControlInput]) -> usize {
        self.replay(steps, |_| {})
    }

    /// Same as [`fitness`](Self::fitness), handing every attempted step to
    /// `observer`, including the failing one.
    pub fn replay<F>(&self, steps: &[ControlInput], mut observer: F) -> usize
    where
        F: FnMut(&TracePoint),
    {
        let mut state = SimulationState::CANONICAL;
        let mut time = 0.0;
        let mut survived = 0;

        for (i, &control) in steps.iter().enumerate() {
            let (next, alive) = self.model.step(&state, self.dt, control);
            observer(&TracePoint {
                step: i,
                time,
                control,
                state: next,
                alive,
            });
            if !alive {
                break;
            }
            state = next;
            time += self.dt;
            survived += 1;
        }

        survived
    }

    pub fn trace(&self, steps: &[ControlInput]) -> Vec<TracePoint> {
        let mut points = Vec::with_capacity(steps.len());
        self.replay(steps, |p| points.push(*p));
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> TrajectoryRunner {
        TrajectoryRunner::new(PhysicsModel::default(), 0.1)
    }

    #[test]
    fn test_empty_sequence_scores_zero() {
        assert_eq!(runner().fitness(&[]), 0);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let steps = [0.0, 0.0, 0.0, 15.0, 0.0, 0.0];
        assert_eq!(runner().fitness(&steps), 3);
    }

    #[test]
    fn test_trace_includes_failing_step() {
        let steps = [0.0, 15.0, 0.0];
        let trace = runner().trace(&steps);
        assert_eq!(trace.len(), 2);
        assert!(trace[0].alive);
        assert!(!trace[1].alive);
        assert!((trace[1].time - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_observer_does_not_change_fitness() {
        let steps = [0.3, -0.2, 0.1, 0.0, -0.4, 0.9, -1.0];
        let mut seen = 0;
        let traced = runner().replay(&steps, |_| seen += 1);
        assert_eq!(traced, runner().fitness(&steps));
        assert!(seen >= traced);
    }
}
