//! Sequential and parallel integrators must agree bit for bit.

use glam::DVec3;
use jounce_frame::{chassis, EdgeKind, Graph};
use jounce_solver::config::SimParams;
use jounce_solver::parallel::partition;
use jounce_solver::state::SimulationState;
use jounce_solver::strategy::IntegratorStrategy;
use jounce_solver::{ParallelIntegrator, SequentialIntegrator};
use jounce_terrain::{PerlinTerrain, TerrainSampler};
use jounce_types::JounceError;

/// One anchor followed by `free` nodes on a helix, chained to their
/// first and third successors. `mid_anchor` anchors one node inside the
/// free range as well.
fn helix(free: usize, mid_anchor: Option<usize>) -> Graph {
    let mut g = Graph::new();
    g.add_node(0.0, DVec3::new(0.0, -0.5, 0.0), true).unwrap();
    for i in 0..free {
        let t = i as f64 * 0.7;
        let anchored = mid_anchor == Some(i + 1);
        let mass = if anchored { 0.0 } else { 1.0 + (i % 3) as f32 };
        g.add_node(mass, DVec3::new(t.cos(), 0.1 * t, t.sin()), anchored)
            .unwrap();
    }
    let n = g.node_count();
    for i in 0..n {
        for step in [1, 3] {
            if i + step < n {
                let kind = if i % 4 == 0 { EdgeKind::Suspension } else { EdgeKind::Chassis };
                g.add_edge(i, i + step, kind).unwrap();
            }
        }
    }
    g
}

fn bits(v: &[DVec3]) -> Vec<[u64; 3]> {
    v.iter()
        .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
        .collect()
}

fn run(
    graph: &Graph,
    strategy: &mut dyn IntegratorStrategy,
    params: &SimParams,
    sampler: &dyn TerrainSampler,
    ticks: usize,
) -> SimulationState {
    let mut state = SimulationState::from_graph(graph);
    // Deterministic non-zero start so damping terms are exercised
    for (i, v) in state.velocity.iter_mut().enumerate() {
        if !graph.nodes()[i].anchored {
            *v = DVec3::new(0.01 * i as f64, -0.02, 0.005 * (i % 5) as f64);
        }
    }
    for _ in 0..ticks {
        strategy.step(graph, &mut state, params, sampler).unwrap();
    }
    state
}

fn assert_identical(graph: &Graph, workers: usize, ticks: usize) {
    let params = SimParams {
        time_step: 0.002,
        ..Default::default()
    };
    let terrain = PerlinTerrain::with_seed(7);

    let seq = run(graph, &mut SequentialIntegrator::new(), &params, &terrain, ticks);
    let mut parallel = ParallelIntegrator::new(workers).unwrap();
    let par = run(graph, &mut parallel, &params, &terrain, ticks);

    assert_eq!(bits(&seq.position), bits(&par.position), "positions, {workers} workers");
    assert_eq!(bits(&seq.velocity), bits(&par.velocity), "velocities, {workers} workers");
    assert_eq!(seq.travel_offset, par.travel_offset);
    assert_eq!(seq.tick, par.tick);
}

// ─── Equivalence Tests ────────────────────────────────────────

#[test]
fn identical_on_small_graphs() {
    for free in [1, 10, 100] {
        let g = helix(free, None);
        for workers in [1, 2, 3, 7, 8, 16] {
            assert_identical(&g, workers, 30);
        }
    }
}

#[test]
fn identical_with_anchor_inside_free_range() {
    let g = helix(100, Some(50));
    assert!(g.nodes()[50].anchored);
    for workers in [1, 4, 6] {
        assert_identical(&g, workers, 30);
    }
}

#[test]
fn identical_on_chassis() {
    let g = chassis::build(Default::default()).unwrap();
    for workers in [1, 3, 8, 12] {
        assert_identical(&g, workers, 100);
    }
}

#[test]
fn reports_agree() {
    let g = chassis::build(Default::default()).unwrap();
    let params = SimParams::default();
    let terrain = PerlinTerrain::new();

    let mut a = SimulationState::from_graph(&g);
    let mut b = a.clone();
    let seq = SequentialIntegrator::new()
        .step(&g, &mut a, &params, &terrain)
        .unwrap();
    let par = ParallelIntegrator::new(5)
        .unwrap()
        .step(&g, &mut b, &params, &terrain)
        .unwrap();

    assert_eq!(seq.integrated, 50);
    assert_eq!(seq.integrated, par.integrated);
    assert_eq!(seq.excited, par.excited);
    assert_eq!(seq.skipped_contributions, par.skipped_contributions);
}

#[test]
fn all_anchored_graph() {
    let mut g = Graph::new();
    g.add_node(0.0, DVec3::ZERO, true).unwrap();
    g.add_node(0.0, DVec3::X, true).unwrap();
    g.add_edge(0, 1, EdgeKind::Chassis).unwrap();

    let mut state = SimulationState::from_graph(&g);
    let result = ParallelIntegrator::new(4)
        .unwrap()
        .step(&g, &mut state, &SimParams::default(), &PerlinTerrain::new())
        .unwrap();
    assert_eq!(result.integrated, 0);
    assert_eq!(result.excited, 2);
}

// ─── Partition Tests ──────────────────────────────────────────

#[test]
fn partition_covers_range_once() {
    for (first, n, workers) in [(4, 54, 8), (4, 54, 12), (1, 2, 8), (0, 100, 7), (3, 10, 1)] {
        let buckets = partition(first, n, workers);
        assert_eq!(buckets.len(), workers);

        let mut seen: Vec<usize> = buckets.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (first..n).collect::<Vec<_>>());
    }
}

#[test]
fn partition_is_strided() {
    let buckets = partition(4, 30, 8);
    for (w, bucket) in buckets.iter().enumerate() {
        for (k, &idx) in bucket.iter().enumerate() {
            assert_eq!(idx, 4 + w + k * 8);
        }
    }
    // Remainders wrap onto existing workers: 26 nodes over 8 workers
    assert_eq!(buckets[0].len(), 4);
    assert_eq!(buckets[1].len(), 4);
    assert_eq!(buckets[2].len(), 3);
    assert_eq!(buckets[7].len(), 3);
}

#[test]
fn partition_edge_cases() {
    assert!(partition(5, 5, 3).iter().all(Vec::is_empty));
    assert!(partition(0, 10, 0).is_empty());

    let buckets = partition(0, 2, 4);
    assert_eq!(buckets[0], vec![0]);
    assert_eq!(buckets[1], vec![1]);
    assert!(buckets[2].is_empty());
    assert!(buckets[3].is_empty());
}

#[test]
fn zero_workers_rejected() {
    let err = ParallelIntegrator::new(0).unwrap_err();
    assert!(matches!(err, JounceError::InvalidConfig(_)));
}

#[test]
fn pool_reports_workers() {
    let p = ParallelIntegrator::new(3).unwrap();
    assert_eq!(p.workers(), 3);
    assert_eq!(p.name(), "parallel");
}
