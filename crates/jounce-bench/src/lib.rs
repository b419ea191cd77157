//! # jounce-bench
//!
//! Benchmark suite for the jounce integrators.
//!
//! Provides three scenarios, a runner that times a strategy over a
//! scenario, a sequential-vs-parallel comparison, and CSV export of the
//! collected metrics.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::{BenchmarkRunner, Comparison};
pub use scenarios::{Scenario, ScenarioKind};
