//! Benchmark scenarios: topology, parameters and road for each case.
//!
//! 1. **Parked chassis**: the built-in frame settling under gravity, no road
//! 2. **Rough road**: the built-in frame driven over Perlin terrain
//! 3. **Lattice sag**: a 48×48 braced net, for scaling the parallel strategy

use serde::{Deserialize, Serialize};

use jounce_frame::{chassis, generators, Graph};
use jounce_solver::SimParams;
use jounce_terrain::PerlinTerrain;
use jounce_types::constants::DEFAULT_CHASSIS_NODE_MASS;
use jounce_types::JounceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    ParkedChassis,
    RoughRoad,
    LatticeSag,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::ParkedChassis,
            ScenarioKind::RoughRoad,
            ScenarioKind::LatticeSag,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::ParkedChassis => "parked_chassis",
            ScenarioKind::RoughRoad => "rough_road",
            ScenarioKind::LatticeSag => "lattice_sag",
        }
    }

    /// Inverse of [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub graph: Graph,
    pub params: SimParams,
    pub terrain: PerlinTerrain,
    /// Number of ticks to simulate.
    pub ticks: u32,
}

impl Scenario {
    /// The chassis on a flat road for 5 simulated seconds.
    pub fn parked_chassis() -> JounceResult<Self> {
        let params = SimParams::calm();
        Ok(Self {
            kind: ScenarioKind::ParkedChassis,
            graph: chassis::build(Default::default())?,
            params,
            terrain: PerlinTerrain::new(),
            ticks: 500,
        })
    }

    /// The chassis at speed over a seeded rough road.
    pub fn rough_road() -> JounceResult<Self> {
        Ok(Self {
            kind: ScenarioKind::RoughRoad,
            graph: chassis::build(Default::default())?,
            params: SimParams::rough_road(),
            terrain: PerlinTerrain::with_seed(1),
            ticks: 1000,
        })
    }

    /// A 48×48 net with 10 cm spacing sagging between four anchors.
    pub fn lattice_sag() -> JounceResult<Self> {
        let params = SimParams {
            time_step: 0.001,
            ..SimParams::calm()
        };
        Ok(Self {
            kind: ScenarioKind::LatticeSag,
            graph: generators::lattice(48, 48, 0.1, DEFAULT_CHASSIS_NODE_MASS)?,
            params,
            terrain: PerlinTerrain::new(),
            ticks: 200,
        })
    }

    pub fn from_kind(kind: ScenarioKind) -> JounceResult<Self> {
        match kind {
            ScenarioKind::ParkedChassis => Self::parked_chassis(),
            ScenarioKind::RoughRoad => Self::rough_road(),
            ScenarioKind::LatticeSag => Self::lattice_sag(),
        }
    }

    /// Shortens the run, e.g. for smoke tests.
    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks;
        self
    }
}
