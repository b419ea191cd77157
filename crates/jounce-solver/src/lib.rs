//! # jounce-solver
//!
//! Time integration of the mass-spring chassis.
//!
//! ## Key Types
//!
//! - [`SimParams`]: Per-tick tunables (time step, gravity, spring constants, road excitation)
//! - [`SimulationState`]: SoA position/velocity buffers plus the frozen snapshot
//! - [`IntegratorStrategy`]: Pluggable free-node integrator
//! - [`SequentialIntegrator`]: Single-threaded reference integrator
//! - [`ParallelIntegrator`]: Strided partition over a persistent rayon pool
//! - [`Simulation`]: Session wrapping reset / tick / pause

pub mod config;
pub mod energy;
pub mod excitation;
pub mod force;
pub mod parallel;
pub mod sequential;
pub mod session;
pub mod state;
pub mod strategy;

pub use config::{SimParams, SpringDamper};
pub use energy::EnergyReport;
pub use parallel::ParallelIntegrator;
pub use sequential::SequentialIntegrator;
pub use session::Simulation;
pub use state::SimulationState;
pub use strategy::{IntegratorStrategy, StepResult, StrategyKind};
