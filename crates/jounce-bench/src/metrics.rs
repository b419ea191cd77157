//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from one scenario run with one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    pub strategy: String,
    pub workers: usize,
    pub node_count: usize,
    pub edge_count: usize,
    /// Ticks executed.
    pub ticks: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per tick (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Kinetic energy of the free nodes after the last tick.
    pub final_kinetic_energy: f64,
    /// Largest distance any free node ended up from its rest position.
    pub max_displacement: f64,
    /// Spring terms skipped for coincident nodes over the whole run.
    pub skipped_contributions: u64,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,strategy,workers,node_count,edge_count,ticks,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,max_displacement,skipped".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{}",
            self.scenario,
            self.strategy,
            self.workers,
            self.node_count,
            self.edge_count,
            self.ticks,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.skipped_contributions,
        )
    }

    /// Header plus one row per run.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }

    /// Wall-time ratio of `baseline` over `self`. Above 1 means `self` is faster.
    pub fn speedup_over(&self, baseline: &BenchmarkMetrics) -> f64 {
        if self.total_wall_time > 0.0 {
            baseline.total_wall_time / self.total_wall_time
        } else {
            0.0
        }
    }
}
