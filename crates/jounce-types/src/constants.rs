//! Physical defaults and numeric thresholds.

/// Default simulation timestep (seconds per tick).
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// Default gravity scalar. Force on a node is `-mass * gravity` on the Y axis.
pub const DEFAULT_GRAVITY: f64 = 2.0;

/// Default scale applied to `(terrain_sample - bias)` when exciting anchors.
pub const DEFAULT_NOISE_AMPLITUDE: f64 = 0.088;

/// Default speed at which the travel offset advances through noise space.
pub const DEFAULT_NOISE_SPEED: f64 = 5.0;

/// Bias subtracted from every terrain sample before scaling.
pub const DEFAULT_NOISE_BIAS: f64 = 0.7;

/// Default mass of a chassis (non-anchored) node.
pub const DEFAULT_CHASSIS_NODE_MASS: f32 = 3.0;

/// Mass assigned to anchored wheel nodes. Never used in force math.
pub const ANCHOR_NODE_MASS: f32 = 0.0;

/// Number of anchored wheel control points that lead every frame.
pub const WHEEL_COUNT: usize = 4;

/// Upper bound on the number of nodes a single graph may hold.
pub const MAX_NODES: usize = 1 << 20;

/// Minimum rest length accepted when linking two nodes.
pub const MIN_REST_LENGTH: f64 = 1.0e-6;

/// Below this inter-node distance a spring contribution is skipped for the tick.
pub const DEGENERATE_DISTANCE: f64 = 1.0e-12;

/// Default worker count for the partitioned-parallel integrator.
pub const DEFAULT_WORKERS: usize = 8;
