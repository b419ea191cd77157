//! Simulation parameters.
//!
//! A [`SimParams`] value is the complete set of tunables read by one tick.
//! The session owns a copy and reads it once at the start of every tick,
//! so a UI thread editing its own copy can never tear an in-flight update.

use std::path::Path;

use serde::{Deserialize, Serialize};
use jounce_frame::EdgeKind;
use jounce_types::constants::{
    DEFAULT_CHASSIS_NODE_MASS, DEFAULT_GRAVITY, DEFAULT_NOISE_AMPLITUDE, DEFAULT_NOISE_BIAS,
    DEFAULT_NOISE_SPEED, DEFAULT_TIME_STEP,
};
use jounce_types::{JounceError, JounceResult};

/// Stiffness and damping for one structural class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringDamper {
    /// Hooke constant applied to `(length / rest - 1)`.
    pub stiffness: f64,
    /// Drag applied to the node's own velocity, once per incident edge.
    pub damping: f64,
}

impl SpringDamper {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self { stiffness, damping }
    }
}

/// Tunable simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// When false, ticks are no-ops.
    pub run_simulation: bool,

    /// Seconds advanced per tick.
    pub time_step: f64,

    /// Gravity scalar. A node feels `-mass * gravity` on the Y axis.
    pub gravity: f64,

    /// Scale on `(terrain_sample - noise_bias)` when exciting anchors.
    pub noise_amplitude: f64,

    /// How fast the travel offset moves through the terrain field.
    pub noise_speed: f64,

    /// Subtracted from every terrain sample.
    pub noise_bias: f64,

    /// Direction the travel offset advances in.
    pub travel_direction: [f64; 3],

    /// Constants for [`EdgeKind::Chassis`] edges.
    pub chassis: SpringDamper,

    /// Constants for both suspension edge kinds.
    pub suspension: SpringDamper,

    /// Mass of each chassis node when the built-in frame is built.
    pub chassis_node_mass: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            run_simulation: true,
            time_step: DEFAULT_TIME_STEP,
            gravity: DEFAULT_GRAVITY,
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            noise_speed: DEFAULT_NOISE_SPEED,
            noise_bias: DEFAULT_NOISE_BIAS,
            travel_direction: [0.0, 0.0, 1.0],
            chassis: SpringDamper::new(1430.0, 31.3),
            suspension: SpringDamper::new(790.0, 5.22),
            chassis_node_mass: DEFAULT_CHASSIS_NODE_MASS,
        }
    }
}

impl SimParams {
    /// Parked on a flat road: no terrain excitation.
    pub fn calm() -> Self {
        Self {
            noise_amplitude: 0.0,
            ..Default::default()
        }
    }

    /// Fast travel over a rough road with a smaller step for stability.
    pub fn rough_road() -> Self {
        Self {
            time_step: 0.003,
            noise_amplitude: 0.1,
            noise_speed: 8.0,
            ..Default::default()
        }
    }

    /// Stiffness/damping for an edge kind. `None` means the edge exerts no force.
    #[inline]
    pub fn spring_damper(&self, kind: EdgeKind) -> Option<SpringDamper> {
        match kind {
            EdgeKind::Chassis => Some(self.chassis),
            EdgeKind::Suspension | EdgeKind::SuspensionInboard => Some(self.suspension),
            EdgeKind::Tire => None,
        }
    }

    /// Sanity checks for parameters loaded from files.
    ///
    /// The integrator itself never calls this; values set programmatically
    /// are the caller's responsibility.
    pub fn validate(&self) -> JounceResult<()> {
        if self.time_step <= 0.0 || !self.time_step.is_finite() {
            return Err(JounceError::InvalidConfig(format!(
                "time_step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if self.chassis_node_mass.is_nan() || self.chassis_node_mass <= 0.0 {
            return Err(JounceError::InvalidConfig(format!(
                "chassis_node_mass must be positive, got {}",
                self.chassis_node_mass
            )));
        }
        for (name, sd) in [("chassis", self.chassis), ("suspension", self.suspension)] {
            if sd.stiffness < 0.0 || sd.damping < 0.0 {
                return Err(JounceError::InvalidConfig(format!(
                    "{name} stiffness and damping must be non-negative"
                )));
            }
        }
        let [x, y, z] = self.travel_direction;
        if !(x * x + y * y + z * z).is_finite() {
            return Err(JounceError::InvalidConfig(
                "travel_direction must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Parses parameters from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> JounceResult<Self> {
        toml::from_str(s).map_err(|e| JounceError::Serialization(format!("params TOML: {e}")))
    }

    /// Loads parameters from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> JounceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml(&self) -> JounceResult<String> {
        toml::to_string(self).map_err(|e| JounceError::Serialization(format!("params TOML: {e}")))
    }
}
