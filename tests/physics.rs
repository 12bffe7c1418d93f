use invpend::engines::evaluation::TrajectoryRunner;
use invpend::engines::physics::{PhysicsModel, PhysicsParameters};
use invpend::types::SimulationState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::FRAC_PI_2;

const DT: f64 = 0.1;

#[test]
fn test_rest_state_with_zero_control() {
    let model = PhysicsModel::default();
    let (next, alive) = model.step(&SimulationState::CANONICAL, DT, 0.0);

    assert!(alive);
    assert!(next.x.abs() < 1e-12);
    assert!(next.theta.abs() < 1e-12);
}

#[test]
fn test_step_is_deterministic() {
    let model = PhysicsModel::default();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..1000 {
        let state = SimulationState {
            x: rng.gen_range(-9.0..9.0),
            dx: rng.gen_range(-10.0..10.0),
            theta: rng.gen_range(-1.5..1.5),
            dtheta: rng.gen_range(-5.0..5.0),
        };
        let control = rng.gen_range(-1.0..=1.0);

        let first = model.step(&state, DT, control);
        let second = model.step(&state, DT, control);
        assert_eq!(first.0.x.to_bits(), second.0.x.to_bits());
        assert_eq!(first.0.dx.to_bits(), second.0.dx.to_bits());
        assert_eq!(first.0.theta.to_bits(), second.0.theta.to_bits());
        assert_eq!(first.0.dtheta.to_bits(), second.0.dtheta.to_bits());
        assert_eq!(first.1, second.1);
    }
}

#[test]
fn test_alive_matches_bounds() {
    let params = PhysicsParameters::default();
    let model = PhysicsModel::new(params);
    let mut rng = StdRng::seed_from_u64(77);

    for _ in 0..1000 {
        let state = SimulationState {
            x: rng.gen_range(-9.5..9.5),
            dx: rng.gen_range(-10.0..10.0),
            theta: rng.gen_range(-1.5..1.5),
            dtheta: rng.gen_range(-5.0..5.0),
        };
        let control = rng.gen_range(-1.0..=1.0);
        let (next, alive) = model.step(&state, DT, control);

        let in_bounds = next.x.abs() <= params.position_limit
            && next.theta > -FRAC_PI_2
            && next.theta < FRAC_PI_2;
        assert_eq!(alive, in_bounds);
    }
}

#[test]
fn test_matches_hand_computed_dynamics() {
    let params = PhysicsParameters { gravity: 10.0, rod_length: 5.0, position_limit: 10.0 };
    let model = PhysicsModel::new(params);
    let state = SimulationState { x: 1.0, dx: 2.0, theta: 0.2, dtheta: -0.3 };
    let control = -0.4;

    let (next, alive) = model.step(&state, DT, control);

    let ddx = (control / DT - state.dx) / DT;
    let ddtheta = (-ddx * state.theta.cos() + 10.0 * state.theta.sin()) / 5.0;
    let dtheta = state.dtheta + ddtheta * DT;
    let theta = state.theta + dtheta * DT;

    assert!(alive);
    assert!((next.x - 0.6).abs() < 1e-12);
    assert!((next.dx - control / DT).abs() < 1e-12);
    assert!((next.dtheta - dtheta).abs() < 1e-12);
    assert!((next.theta - theta).abs() < 1e-12);
}

#[test]
fn test_angles_are_not_wrapped() {
    let model = PhysicsModel::default();
    let spinning = SimulationState { theta: 1.4, dtheta: 40.0, ..SimulationState::CANONICAL };
    let (next, alive) = model.step(&spinning, DT, 0.0);

    assert!(!alive);
    assert!(next.theta > FRAC_PI_2);
}

#[test]
fn test_longer_rod_falls_slower() {
    let short = TrajectoryRunner::new(
        PhysicsModel::new(PhysicsParameters { rod_length: 2.0, ..Default::default() }),
        DT,
    );
    let long = TrajectoryRunner::new(
        PhysicsModel::new(PhysicsParameters { rod_length: 10.0, ..Default::default() }),
        DT,
    );
    // one kick, then coast
    let mut steps = vec![0.3];
    steps.extend(std::iter::repeat(0.0).take(60));

    assert!(long.fitness(&steps) > short.fitness(&steps));
}
