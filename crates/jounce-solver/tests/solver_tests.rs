//! Integration tests for jounce-solver.

use glam::DVec3;
use jounce_frame::{chassis, EdgeKind, Graph};
use jounce_solver::config::{SimParams, SpringDamper};
use jounce_solver::energy;
use jounce_solver::state::SimulationState;
use jounce_solver::strategy::{IntegratorStrategy, StrategyKind};
use jounce_solver::{ParallelIntegrator, SequentialIntegrator, Simulation};
use jounce_terrain::{FlatTerrain, FnTerrain};
use jounce_types::JounceError;

/// Anchor at the origin with one free node hanging one unit below it.
fn pendulum(mass: f32) -> Graph {
    let mut g = Graph::new();
    g.add_node(0.0, DVec3::ZERO, true).unwrap();
    g.add_node(mass, DVec3::new(0.0, -1.0, 0.0), false).unwrap();
    g.add_edge(0, 1, EdgeKind::Chassis).unwrap();
    g
}

/// No road excitation, custom chassis constants.
fn still(stiffness: f64, damping: f64, gravity: f64, time_step: f64) -> SimParams {
    SimParams {
        noise_amplitude: 0.0,
        gravity,
        time_step,
        chassis: SpringDamper::new(stiffness, damping),
        ..Default::default()
    }
}

fn sequential() -> Box<dyn IntegratorStrategy> {
    Box::new(SequentialIntegrator::new())
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_params() {
    let p = SimParams::default();
    assert!(p.run_simulation);
    assert_eq!(p.time_step, 0.01);
    assert_eq!(p.gravity, 2.0);
    assert_eq!(p.noise_amplitude, 0.088);
    assert_eq!(p.noise_speed, 5.0);
    assert_eq!(p.noise_bias, 0.7);
    assert_eq!(p.chassis, SpringDamper::new(1430.0, 31.3));
    assert_eq!(p.suspension, SpringDamper::new(790.0, 5.22));
    assert_eq!(p.chassis_node_mass, 3.0);
    assert!(p.validate().is_ok());
}

#[test]
fn presets_validate() {
    assert_eq!(SimParams::calm().noise_amplitude, 0.0);
    assert!(SimParams::calm().validate().is_ok());
    assert!(SimParams::rough_road().validate().is_ok());
}

#[test]
fn spring_damper_by_kind() {
    let p = SimParams::default();
    assert_eq!(p.spring_damper(EdgeKind::Chassis), Some(p.chassis));
    assert_eq!(p.spring_damper(EdgeKind::Suspension), Some(p.suspension));
    assert_eq!(p.spring_damper(EdgeKind::SuspensionInboard), Some(p.suspension));
    assert_eq!(p.spring_damper(EdgeKind::Tire), None);
}

#[test]
fn validate_rejects_bad_values() {
    let bad_dt = SimParams { time_step: 0.0, ..Default::default() };
    assert!(matches!(bad_dt.validate(), Err(JounceError::InvalidConfig(_))));

    let nan_dt = SimParams { time_step: f64::NAN, ..Default::default() };
    assert!(nan_dt.validate().is_err());

    let bad_mass = SimParams { chassis_node_mass: 0.0, ..Default::default() };
    assert!(bad_mass.validate().is_err());

    let bad_spring = SimParams {
        suspension: SpringDamper::new(-1.0, 0.0),
        ..Default::default()
    };
    assert!(bad_spring.validate().is_err());
}

#[test]
fn params_toml_partial() {
    let p = SimParams::from_toml_str(
        r#"
        gravity = 9.81
        noise_amplitude = 0.0

        [chassis]
        stiffness = 2000.0
        damping = 40.0
        "#,
    )
    .unwrap();
    assert_eq!(p.gravity, 9.81);
    assert_eq!(p.noise_amplitude, 0.0);
    assert_eq!(p.chassis, SpringDamper::new(2000.0, 40.0));
    // Untouched keys keep defaults
    assert_eq!(p.time_step, 0.01);
    assert_eq!(p.suspension, SpringDamper::new(790.0, 5.22));
}

#[test]
fn params_toml_roundtrip() {
    let p = SimParams::rough_road();
    let text = p.to_toml().unwrap();
    let back = SimParams::from_toml_str(&text).unwrap();
    assert_eq!(p, back);
}

#[test]
fn params_json_roundtrip() {
    let p = SimParams::calm();
    let json = serde_json::to_string(&p).unwrap();
    let back: SimParams = serde_json::from_str(&json).unwrap();
    assert_eq!(p, back);
}

#[test]
fn params_toml_type_error() {
    let err = SimParams::from_toml_str("time_step = \"fast\"").unwrap_err();
    assert!(matches!(err, JounceError::Serialization(_)));
}

// ─── SimulationState Tests ────────────────────────────────────

#[test]
fn state_from_graph_at_rest() {
    let g = chassis::build(Default::default()).unwrap();
    let state = SimulationState::from_graph(&g);

    assert_eq!(state.node_count, g.node_count());
    assert_eq!(state.position, g.rest_positions());
    assert_eq!(state.old_position, state.position);
    assert!(state.velocity.iter().all(|v| *v == DVec3::ZERO));
    assert_eq!(state.travel_offset, DVec3::ZERO);
    assert_eq!(state.tick, 0);
}

#[test]
fn snapshot_is_pure_copy() {
    let g = pendulum(1.0);
    let mut state = SimulationState::from_graph(&g);
    state.position[1] = DVec3::new(0.25, -0.75, 0.125);
    state.velocity[1] = DVec3::new(-3.0, 1.5, 0.5);
    state.position[0] = DVec3::new(0.0, 0.3, 0.0);
    let before = state.clone();

    state.snapshot(&g);

    assert_eq!(state.old_position[1], before.position[1]);
    assert_eq!(state.old_velocity[1], before.velocity[1]);
    // Anchors publish their current position
    assert_eq!(state.old_position[0], before.position[0]);
    // Live buffers untouched
    assert_eq!(state.position, before.position);
    assert_eq!(state.velocity, before.velocity);
}

#[test]
fn bounds_and_finite_checks() {
    let g = pendulum(1.0);
    let mut state = SimulationState::from_graph(&g);
    let (lo, hi) = state.bounds().unwrap();
    assert_eq!(lo, DVec3::new(0.0, -1.0, 0.0));
    assert_eq!(hi, DVec3::ZERO);
    assert!(!state.has_non_finite());

    state.velocity[1].x = f64::NAN;
    assert!(state.has_non_finite());

    assert!(SimulationState::from_graph(&Graph::new()).bounds().is_none());
}

#[test]
fn mismatched_state_is_rejected() {
    let g = pendulum(1.0);
    let mut state = SimulationState::from_graph(&chassis::build(Default::default()).unwrap());
    let result = SequentialIntegrator::new().step(
        &g,
        &mut state,
        &SimParams::default(),
        &FlatTerrain::default(),
    );
    assert!(matches!(result, Err(JounceError::InvalidConfig(_))));
}

// ─── Excitation Tests ─────────────────────────────────────────

#[test]
fn anchors_move_vertically_only() {
    let g = chassis::build(Default::default()).unwrap();
    let params = SimParams::default();
    let mut state = SimulationState::from_graph(&g);
    let terrain = FnTerrain(|x: f64, _y: f64, z: f64| (x * 3.0).sin() + (z * 0.7).cos());
    let mut integrator = SequentialIntegrator::new();

    for _ in 0..25 {
        integrator.step(&g, &mut state, &params, &terrain).unwrap();
        for id in g.anchors() {
            let rest = g.node(id).rest_position;
            let p = state.position[id.index()];
            assert_eq!(p.x, rest.x);
            assert_eq!(p.z, rest.z);
        }
    }
}

#[test]
fn anchor_height_follows_terrain() {
    let g = chassis::build(Default::default()).unwrap();
    let params = SimParams::default();
    let mut state = SimulationState::from_graph(&g);
    let terrain = FlatTerrain::new(0.9);
    let mut integrator = SequentialIntegrator::new();

    for ticks in [1, 50] {
        while state.tick < ticks {
            integrator.step(&g, &mut state, &params, &terrain).unwrap();
        }
        // The base never drifts: same height after 1 tick and after 50
        for id in g.anchors() {
            let rest = g.node(id).rest_position;
            let expected = rest.y + params.noise_amplitude * (0.9 - params.noise_bias);
            assert!((state.position[id.index()].y - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn travel_offset_advances() {
    let mut sim = Simulation::new(pendulum(1.0), SimParams::default(), sequential());
    let terrain = FlatTerrain::default();
    for _ in 0..10 {
        sim.tick(&terrain).unwrap();
    }
    let expected = 10.0 * 5.0 * 0.01;
    let offset = sim.travel_offset();
    assert_eq!(offset.x, 0.0);
    assert_eq!(offset.y, 0.0);
    assert!((offset.z - expected).abs() < 1e-12);
}

// ─── Force Model Tests ────────────────────────────────────────

#[test]
fn single_tick_closed_form() {
    // Spring starts exactly at rest, so only gravity acts.
    let mut sim = Simulation::new(pendulum(1.0), still(100.0, 0.0, 1.0, 0.001), sequential());
    let result = sim.tick(&FlatTerrain::default()).unwrap();

    assert_eq!(result.tick, 1);
    assert_eq!(result.integrated, 1);
    assert_eq!(result.excited, 1);
    assert!(!result.paused);

    let v = sim.state().velocity[1];
    let p = sim.state().position[1];
    assert!((v.y - -0.001).abs() < 1e-15);
    assert!((p.y - -1.000001).abs() < 1e-15);
    assert_eq!(p.x, 0.0);
    assert_eq!(p.z, 0.0);
}

#[test]
fn damping_applies_once_per_edge() {
    let mut g = Graph::new();
    g.add_node(0.0, DVec3::new(-1.0, 0.0, 0.0), true).unwrap();
    g.add_node(0.0, DVec3::new(1.0, 0.0, 0.0), true).unwrap();
    g.add_node(2.0, DVec3::ZERO, false).unwrap();
    g.add_edge(0, 2, EdgeKind::Chassis).unwrap();
    g.add_edge(1, 2, EdgeKind::Chassis).unwrap();

    let mut sim = Simulation::new(g, still(50.0, 5.0, 0.0, 0.01), sequential());
    sim.state_mut().velocity[2] = DVec3::new(0.0, 0.0, 1.0);
    sim.tick(&FlatTerrain::default()).unwrap();

    // Two edges, each dragging 5 * v on a mass of 2: v' = v * (1 - 2 * 5 * 0.01 / 2)
    let v = sim.state().velocity[2];
    assert!((v.z - 0.95).abs() < 1e-12);
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 0.0);
}

#[test]
fn hooke_equilibrium() {
    let mut sim = Simulation::new(pendulum(1.0), still(100.0, 5.0, 1.0, 0.001), sequential());
    let terrain = FlatTerrain::default();
    for _ in 0..20_000 {
        sim.tick(&terrain).unwrap();
    }

    // k * (len / rest - 1) = m * g  =>  len = rest * (1 + m g / k)
    let p = sim.state().position[1];
    assert!((p.y - -1.01).abs() < 1e-6, "settled at {}", p.y);
    assert!(sim.state().velocity[1].length() < 1e-6);
    assert_eq!(p.x, 0.0);
    assert_eq!(p.z, 0.0);
}

#[test]
fn neighbors_see_excited_anchor_same_tick() {
    let params = SimParams {
        gravity: 0.0,
        noise_amplitude: 1.0,
        noise_bias: 0.0,
        time_step: 0.01,
        chassis: SpringDamper::new(100.0, 0.0),
        ..Default::default()
    };
    let mut sim = Simulation::new(pendulum(1.0), params, sequential());
    sim.tick(&FlatTerrain::new(0.5)).unwrap();

    assert_eq!(sim.state().position[0], DVec3::new(0.0, 0.5, 0.0));
    // Stretched to 1.5 against the excited anchor: F = 100 * 0.5 upward
    let p = sim.state().position[1];
    assert!((sim.state().velocity[1].y - 0.5).abs() < 1e-12);
    assert!((p.y - -0.995).abs() < 1e-12);
}

#[test]
fn tire_edges_exert_no_force() {
    let mut g = Graph::new();
    g.add_node(0.0, DVec3::ZERO, true).unwrap();
    g.add_node(1.0, DVec3::new(0.0, -1.0, 0.0), false).unwrap();
    g.add_edge(0, 1, EdgeKind::Tire).unwrap();

    let params = SimParams {
        gravity: 0.0,
        noise_amplitude: 1.0,
        noise_bias: 0.0,
        ..Default::default()
    };
    let mut sim = Simulation::new(g, params, sequential());
    sim.state_mut().velocity[1] = DVec3::new(1.0, 0.0, 0.0);
    sim.tick(&FlatTerrain::new(0.5)).unwrap();

    assert_eq!(sim.state().velocity[1], DVec3::new(1.0, 0.0, 0.0));
    assert_eq!(sim.state().position[1], DVec3::new(0.01, -1.0, 0.0));
}

#[test]
fn coincident_nodes_skip_spring() {
    let mut g = Graph::new();
    g.add_node(0.0, DVec3::new(0.0, 5.0, 0.0), true).unwrap();
    g.add_node(1.0, DVec3::new(1.0, 0.0, 0.0), false).unwrap();
    g.add_node(1.0, DVec3::new(2.0, 0.0, 0.0), false).unwrap();
    g.add_edge(1, 2, EdgeKind::Chassis).unwrap();

    let mut sim = Simulation::new(g, still(1430.0, 31.3, 0.0, 0.01), sequential());
    let p1 = sim.state().position[1];
    sim.state_mut().position[2] = p1;

    let result = sim.tick(&FlatTerrain::default()).unwrap();
    assert_eq!(result.skipped_contributions, 2);
    assert!(!sim.state().has_non_finite());
    assert_eq!(sim.state().position[1], p1);
    assert_eq!(sim.state().position[2], p1);
}

#[test]
fn rest_lengths_never_change() {
    let mut sim = Simulation::chassis(SimParams::default(), sequential()).unwrap();
    let before: Vec<f64> = sim.graph().edges().iter().map(|e| e.rest_length).collect();
    let terrain = FnTerrain(|x: f64, _y: f64, z: f64| (x + z).sin());
    for _ in 0..50 {
        sim.tick(&terrain).unwrap();
    }
    let after: Vec<f64> = sim.graph().edges().iter().map(|e| e.rest_length).collect();
    assert_eq!(before, after);
}

// ─── Energy Tests ─────────────────────────────────────────────

#[test]
fn energy_at_rest_is_zero() {
    let g = chassis::build(Default::default()).unwrap();
    let state = SimulationState::from_graph(&g);
    let params = SimParams { gravity: 0.0, ..Default::default() };
    let e = energy::measure(&g, &state, &params);
    assert_eq!(e.kinetic, 0.0);
    assert!(e.spring.abs() < 1e-20);
    assert_eq!(e.gravitational, 0.0);
}

#[test]
fn energy_terms() {
    let g = pendulum(2.0);
    let mut state = SimulationState::from_graph(&g);
    state.velocity[1] = DVec3::new(3.0, 0.0, 4.0);
    state.position[1] = DVec3::new(0.0, -1.5, 0.0);
    let params = still(100.0, 0.0, 1.0, 0.01);

    assert!((energy::kinetic(&g, &state) - 25.0).abs() < 1e-12);
    // ½ * 100 * 1 * 0.5²
    assert!((energy::spring_potential(&g, &state, &params) - 12.5).abs() < 1e-12);
    assert!((energy::gravitational(&g, &state, &params) - -3.0).abs() < 1e-12);

    let report = energy::measure(&g, &state, &params);
    assert!((report.total() - 34.5).abs() < 1e-12);
}

#[test]
fn energy_conserved_without_damping_chain() {
    let mut g = Graph::new();
    g.add_node(0.0, DVec3::new(-2.0, 0.0, 0.0), true).unwrap();
    g.add_node(0.0, DVec3::new(2.0, 0.0, 0.0), true).unwrap();
    g.add_node(1.0, DVec3::new(-1.0, 0.0, 0.0), false).unwrap();
    g.add_node(1.0, DVec3::ZERO, false).unwrap();
    g.add_node(1.0, DVec3::new(1.0, 0.0, 0.0), false).unwrap();
    for (a, b) in [(0, 2), (2, 3), (3, 4), (4, 1)] {
        g.add_edge(a, b, EdgeKind::Chassis).unwrap();
    }

    let mut sim = Simulation::new(g, still(100.0, 0.0, 0.0, 0.001), sequential());
    sim.state_mut().velocity[2] = DVec3::new(0.2, 0.0, 0.0);
    sim.state_mut().velocity[3] = DVec3::new(0.0, 0.5, 0.0);
    let e0 = sim.energy().total();
    assert!((e0 - 0.145).abs() < 1e-12);

    let terrain = FlatTerrain::default();
    for _ in 0..10_000 {
        sim.tick(&terrain).unwrap();
        let e = sim.energy().total();
        assert!((e - e0).abs() < 0.05 * e0, "energy drifted to {e} from {e0}");
    }
}

#[test]
fn energy_conserved_without_damping_chassis() {
    let params = SimParams {
        gravity: 0.0,
        noise_amplitude: 0.0,
        time_step: 0.0005,
        chassis: SpringDamper::new(1430.0, 0.0),
        suspension: SpringDamper::new(790.0, 0.0),
        ..Default::default()
    };
    let mut sim = Simulation::chassis(params, sequential()).unwrap();
    let first = sim.graph().first_free();
    for (i, v) in sim.state_mut().velocity.iter_mut().enumerate().skip(first) {
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        *v = DVec3::new(0.0, 0.01 * sign, 0.005);
    }
    let e0 = sim.energy().total();
    assert!(e0 > 0.0);

    let terrain = FlatTerrain::default();
    for _ in 0..10_000 {
        sim.tick(&terrain).unwrap();
    }
    let e = sim.energy().total();
    assert!((e - e0).abs() < 0.1 * e0, "energy drifted to {e} from {e0}");
    assert!(!sim.state().has_non_finite());
}

// ─── Simulation Session Tests ─────────────────────────────────

#[test]
fn paused_tick_is_noop() {
    let mut sim = Simulation::chassis(SimParams::default(), sequential()).unwrap();
    let terrain = FlatTerrain::new(0.4);
    sim.tick(&terrain).unwrap();

    sim.pause();
    assert!(!sim.is_running());
    let before = sim.state().clone();
    let result = sim.tick(&terrain).unwrap();
    assert!(result.paused);
    assert_eq!(result.tick, 1);
    assert_eq!(*sim.state(), before);

    sim.resume();
    let result = sim.tick(&terrain).unwrap();
    assert!(!result.paused);
    assert_eq!(result.tick, 2);
}

#[test]
fn set_chassis_mass_rewrites_free_nodes() {
    let mut sim = Simulation::chassis(SimParams::default(), sequential()).unwrap();
    sim.set_chassis_mass(5.5);
    assert_eq!(sim.params().chassis_node_mass, 5.5);
    for node in sim.graph().nodes() {
        if node.anchored {
            assert_eq!(node.mass, 0.0);
        } else {
            assert_eq!(node.mass, 5.5);
        }
    }

    // A rebuild keeps the configured mass
    sim.reset_chassis().unwrap();
    assert!(sim.graph().nodes().iter().filter(|n| !n.anchored).all(|n| n.mass == 5.5));
}

#[test]
fn failed_reset_keeps_previous_graph() {
    let mut sim = Simulation::chassis(SimParams::default(), sequential()).unwrap();
    let terrain = FlatTerrain::new(0.2);
    for _ in 0..5 {
        sim.tick(&terrain).unwrap();
    }
    let graph_before = sim.graph().clone();
    let state_before = sim.state().clone();

    let err = sim
        .reset(|| Err(JounceError::InvalidFrame("broken".into())))
        .unwrap_err();
    assert!(matches!(err, JounceError::InvalidFrame(_)));
    assert_eq!(*sim.graph(), graph_before);
    assert_eq!(*sim.state(), state_before);

    sim.reset(|| Ok(pendulum(1.0))).unwrap();
    assert_eq!(sim.graph().node_count(), 2);
    assert_eq!(sim.tick_count(), 0);
    assert_eq!(sim.travel_offset(), DVec3::ZERO);
}

#[test]
fn restart_returns_to_rest() {
    let mut sim = Simulation::chassis(SimParams::default(), sequential()).unwrap();
    for _ in 0..5 {
        sim.tick(&FlatTerrain::new(0.2)).unwrap();
    }
    sim.restart();
    assert_eq!(sim.state().position, sim.graph().rest_positions());
    assert_eq!(sim.tick_count(), 0);
}

#[test]
fn set_params_takes_effect_next_tick() {
    let mut sim = Simulation::new(pendulum(1.0), still(100.0, 0.0, 1.0, 0.001), sequential());
    sim.set_params(still(100.0, 0.0, 0.0, 0.001));
    sim.tick(&FlatTerrain::default()).unwrap();
    // No gravity, spring at rest: nothing moves
    assert_eq!(sim.state().position[1], DVec3::new(0.0, -1.0, 0.0));
}

#[test]
fn strategy_kind_builds() {
    let seq = StrategyKind::Sequential.build(0).unwrap();
    assert_eq!(seq.name(), "sequential");
    let par = StrategyKind::Parallel.build(3).unwrap();
    assert_eq!(par.name(), "parallel");
    assert!(StrategyKind::Parallel.build(0).is_err());
}

#[test]
fn swap_strategy_mid_run() {
    let mut sim = Simulation::chassis(SimParams::default(), sequential()).unwrap();
    sim.tick(&FlatTerrain::new(0.3)).unwrap();
    sim.set_strategy(Box::new(ParallelIntegrator::new(2).unwrap()));
    assert_eq!(sim.strategy_name(), "parallel");
    let result = sim.tick(&FlatTerrain::new(0.3)).unwrap();
    assert_eq!(result.tick, 2);
    assert_eq!(result.integrated, sim.graph().node_count() - 4);
}
