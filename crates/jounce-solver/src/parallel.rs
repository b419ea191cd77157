//! Partitioned parallel integrator.
//!
//! Free nodes are dealt out to `workers` buckets with a fixed stride:
//! worker `w` owns indices `first_free + w`, `first_free + w + workers`, …
//! The buckets hold disjoint `&mut` borrows of the live buffers and every
//! worker reads only the shared snapshot, so no synchronization is needed
//! beyond the join at the end of the pass.
//!
//! The pool is built once and reused for every tick.

use glam::DVec3;
use rayon::prelude::*;
use jounce_frame::Graph;
use jounce_types::{JounceError, JounceResult, NodeId};

use crate::config::SimParams;
use crate::force::integrate_node;
use crate::state::SimulationState;
use crate::strategy::{IntegrationReport, IntegratorStrategy};

/// Worker that owns the node at `offset` past the first free node.
#[inline]
pub fn worker_for(offset: usize, workers: usize) -> usize {
    offset % workers
}

/// Node indices each worker is responsible for.
///
/// Covers `first_free..node_count` exactly once. Indices below
/// `first_free` are never assigned. Returns no buckets when `workers == 0`.
pub fn partition(first_free: usize, node_count: usize, workers: usize) -> Vec<Vec<usize>> {
    let mut buckets = vec![Vec::new(); workers];
    if workers == 0 {
        return buckets;
    }
    for i in first_free..node_count {
        buckets[worker_for(i - first_free, workers)].push(i);
    }
    buckets
}

type Bucket<'a> = Vec<(usize, &'a mut DVec3, &'a mut DVec3)>;

/// Integrates free nodes on a dedicated rayon pool.
pub struct ParallelIntegrator {
    workers: usize,
    pool: rayon::ThreadPool,
}

impl ParallelIntegrator {
    /// Builds the worker pool. `workers` must be at least 1.
    pub fn new(workers: usize) -> JounceResult<Self> {
        if workers == 0 {
            return Err(JounceError::InvalidConfig(
                "parallel integrator needs at least one worker".into(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("jounce-integrate-{i}"))
            .build()
            .map_err(|e| JounceError::InvalidConfig(format!("thread pool: {e}")))?;

        tracing::debug!(workers, "parallel integrator pool ready");
        Ok(Self { workers, pool })
    }
}

impl std::fmt::Debug for ParallelIntegrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelIntegrator")
            .field("workers", &self.workers)
            .finish()
    }
}

impl IntegratorStrategy for ParallelIntegrator {
    fn integrate(
        &mut self,
        graph: &Graph,
        state: &mut SimulationState,
        params: &SimParams,
    ) -> IntegrationReport {
        let first = graph.first_free();
        let workers = self.workers;
        let (frozen, position, velocity) = state.split_mut();

        let mut buckets: Vec<Bucket<'_>> = (0..workers).map(|_| Vec::new()).collect();
        let live = position[first..].iter_mut().zip(velocity[first..].iter_mut());
        for (offset, (p, v)) in live.enumerate() {
            buckets[worker_for(offset, workers)].push((first + offset, p, v));
        }

        self.pool.install(|| {
            buckets
                .into_par_iter()
                .map(|bucket| {
                    let mut report = IntegrationReport::default();
                    for (i, p, v) in bucket {
                        // Anchors may follow the first free node; leave them alone.
                        if graph.nodes()[i].anchored {
                            continue;
                        }
                        let update = integrate_node(graph, &frozen, NodeId(i as u32), params);
                        *p = update.position;
                        *v = update.velocity;
                        report.integrated += 1;
                        report.skipped_contributions += update.skipped;
                    }
                    report
                })
                .reduce(IntegrationReport::default, |a, b| IntegrationReport {
                    integrated: a.integrated + b.integrated,
                    skipped_contributions: a.skipped_contributions + b.skipped_contributions,
                })
        })
    }

    fn name(&self) -> &str {
        "parallel"
    }

    fn workers(&self) -> usize {
        self.workers
    }
}
