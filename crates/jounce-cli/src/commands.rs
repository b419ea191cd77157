//! CLI command implementations.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use jounce_bench::metrics::BenchmarkMetrics;
use jounce_bench::runner::BenchmarkRunner;
use jounce_bench::scenarios::{Scenario, ScenarioKind};
use jounce_frame::chassis::{self, ChassisOptions};
use jounce_frame::{FrameDescription, Graph};
use jounce_render::{
    ColorMode, FrameStyle, HeadlessRenderer, JsonFrameExporter, RenderFrame, Renderer,
};
use jounce_solver::{
    ParallelIntegrator, SequentialIntegrator, SimParams, Simulation, StrategyKind,
};
use jounce_telemetry::{EventBus, EventKind, JsonLinesSink, SimulationEvent, TracingSink};
use jounce_terrain::PerlinTerrain;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Strain at which tension colors saturate.
const TENSION_FULL_SCALE: f64 = 0.05;

pub struct SimulateArgs {
    pub config: Option<String>,
    pub frame: Option<String>,
    pub ticks: u32,
    pub strategy: StrategyKind,
    pub workers: usize,
    pub output: Option<String>,
    pub every: u32,
    pub tension: bool,
    pub seed: u64,
    pub events: Option<String>,
}

fn load_params(path: Option<&str>) -> Result<SimParams, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(SimParams::default());
    };
    let params = SimParams::load(path)?;
    params.validate()?;
    Ok(params)
}

fn load_graph(path: Option<&str>, params: &SimParams) -> Result<Graph, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(FrameDescription::load(path)?.build()?),
        None => Ok(chassis::build(ChassisOptions {
            node_mass: params.chassis_node_mass,
            ..Default::default()
        })?),
    }
}

fn parse_scenarios(name: &str) -> Result<Vec<ScenarioKind>, Box<dyn std::error::Error>> {
    if name == "all" {
        return Ok(ScenarioKind::all().to_vec());
    }
    match ScenarioKind::from_name(name) {
        Some(kind) => Ok(vec![kind]),
        None => {
            let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
            Err(format!("Unknown scenario: '{name}'. Available: {}, all", available.join(", ")).into())
        }
    }
}

/// Run a simulation.
pub fn simulate(args: SimulateArgs) -> CmdResult {
    let params = load_params(args.config.as_deref())?;
    let graph = load_graph(args.frame.as_deref(), &params)?;
    let strategy = args.strategy.build(args.workers)?;

    println!("jounce Simulation");
    println!("─────────────────");
    println!("Frame:     {}", args.frame.as_deref().unwrap_or("built-in chassis"));
    println!("Nodes:     {} ({} anchored)", graph.node_count(), graph.anchors().count());
    println!("Edges:     {}", graph.edge_count());
    println!("Strategy:  {} ({} workers)", strategy.name(), strategy.workers());
    println!("Ticks:     {} x {}s", args.ticks, params.time_step);
    println!();

    let time_step = params.time_step;
    let mut sim = Simulation::new(graph, params, strategy);
    let terrain = PerlinTerrain::with_seed(args.seed);

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));
    if let Some(path) = &args.events {
        bus.add_sink(Box::new(JsonLinesSink::new(BufWriter::new(File::create(path)?))));
    }

    let mut renderer: Box<dyn Renderer> = match &args.output {
        Some(path) => Box::new(JsonFrameExporter::new(path)),
        None => Box::new(HeadlessRenderer::new()),
    };
    renderer.init(sim.graph())?;

    let style = FrameStyle {
        mode: if args.tension {
            ColorMode::Tension {
                full_scale: TENSION_FULL_SCALE,
            }
        } else {
            ColorMode::ByKind
        },
        ..Default::default()
    };
    let every = args.every.max(1) as u64;

    bus.emit(SimulationEvent::new(
        0,
        EventKind::Reset {
            nodes: sim.graph().node_count(),
            edges: sim.graph().edge_count(),
        },
    ));
    renderer.submit_frame(&RenderFrame::capture(0, sim.graph(), sim.state(), &style))?;

    let start = Instant::now();
    let mut skipped_total: u64 = 0;
    for _ in 0..args.ticks {
        let tick = sim.tick_count();
        bus.emit(SimulationEvent::new(
            tick,
            EventKind::TickBegin {
                sim_time: tick as f64 * time_step,
            },
        ));

        let result = sim.tick(&terrain)?;
        if result.paused {
            bus.emit(SimulationEvent::new(tick, EventKind::Paused));
            println!("run_simulation is off; nothing to do.");
            break;
        }

        bus.emit(SimulationEvent::new(
            result.tick,
            EventKind::TickEnd {
                wall_time: result.wall_time,
                integrated: result.integrated,
                strategy: sim.strategy_name().to_string(),
            },
        ));
        if result.skipped_contributions > 0 {
            skipped_total += result.skipped_contributions as u64;
            bus.emit(SimulationEvent::new(
                result.tick,
                EventKind::DegenerateContributions {
                    count: result.skipped_contributions,
                },
            ));
        }

        if result.tick % every == 0 {
            let energy = sim.energy();
            bus.emit(SimulationEvent::new(
                result.tick,
                EventKind::Energy {
                    kinetic: energy.kinetic,
                    spring: energy.spring,
                    gravitational: energy.gravitational,
                },
            ));
            let frame = RenderFrame::capture(result.tick, sim.graph(), sim.state(), &style);
            renderer.submit_frame(&frame)?;
        }
        bus.flush();
    }
    let wall = start.elapsed().as_secs_f64();

    renderer.finalize()?;
    bus.finish();

    let energy = sim.energy();
    println!("Ticks run:     {}", sim.tick_count());
    println!("Wall time:     {wall:.3}s");
    if sim.tick_count() > 0 {
        println!("Avg tick:      {:.4}ms", wall * 1000.0 / sim.tick_count() as f64);
    }
    println!("Travel:        {:.3}", sim.travel_offset().length());
    println!("Kinetic:       {:.6e}", energy.kinetic);
    println!("Spring:        {:.6e}", energy.spring);
    if skipped_total > 0 {
        println!("Skipped:       {skipped_total} degenerate spring terms");
    }
    if sim.state().has_non_finite() {
        println!("Warning: state contains non-finite values; try a smaller time_step");
    }
    println!("Frames:        {} ({})", renderer.frame_count(), renderer.name());
    if let Some(path) = &args.output {
        println!("Animation written to: {path}");
    }
    Ok(())
}

/// Run both strategies and report their divergence.
pub fn compare(scenario_name: &str, ticks: u32, workers: usize) -> CmdResult {
    let kinds = parse_scenarios(scenario_name)?;

    println!("jounce Strategy Comparison");
    println!("══════════════════════════");
    println!();

    let mut diverged = false;
    for kind in kinds {
        let scenario = Scenario::from_kind(kind)?.with_ticks(ticks);
        let cmp = BenchmarkRunner::compare(&scenario, workers)?;

        println!(
            "{} ({} nodes, {ticks} ticks, {workers} workers)",
            kind.name(),
            scenario.graph.node_count()
        );
        println!("  Sequential:    {:.3}s", cmp.sequential.total_wall_time);
        println!("  Parallel:      {:.3}s", cmp.parallel.total_wall_time);
        println!("  Speedup:       {:.2}x", cmp.parallel.speedup_over(&cmp.sequential));
        println!("  Max |Δpos|:    {:e}", cmp.max_position_deviation);
        println!("  Max |Δvel|:    {:e}", cmp.max_velocity_deviation);
        println!("  Identical:     {}", if cmp.identical() { "yes" } else { "NO" });
        println!();

        diverged |= !cmp.identical();
    }

    if diverged {
        return Err("strategies diverged".into());
    }
    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, workers: usize, output_path: Option<&str>) -> CmdResult {
    let kinds = parse_scenarios(scenario_name)?;

    println!("jounce Benchmark Suite");
    println!("══════════════════════");
    println!();

    let mut sequential = SequentialIntegrator::new();
    let mut parallel = ParallelIntegrator::new(workers)?;
    let mut all_metrics = Vec::new();

    for kind in kinds {
        let scenario = Scenario::from_kind(kind)?;
        println!(
            "Running: {} ({} nodes, {} edges, {} ticks)",
            kind.name(),
            scenario.graph.node_count(),
            scenario.graph.edge_count(),
            scenario.ticks,
        );

        let seq = BenchmarkRunner::run(&scenario, &mut sequential)
            .map_err(|e| format!("Benchmark failed: {e}"))?;
        let par = BenchmarkRunner::run(&scenario, &mut parallel)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Sequential:    {:.3}ms/tick", seq.avg_step_time * 1000.0);
        println!("  Parallel:      {:.3}ms/tick ({workers} workers)", par.avg_step_time * 1000.0);
        println!("  Speedup:       {:.2}x", par.speedup_over(&seq));
        println!("  Final KE:      {:.6e}", seq.final_kinetic_energy);
        println!("  Max displace:  {:.4}", seq.max_displacement);
        println!();

        all_metrics.push(seq);
        all_metrics.push(par);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }
    Ok(())
}

/// Validate a parameter file or frame description.
pub fn validate(path: &str) -> CmdResult {
    println!("jounce Validator");
    println!("────────────────");
    println!("File: {path}");
    println!();

    let ext = Path::new(path).extension().and_then(|e| e.to_str());
    let text = std::fs::read_to_string(path)?;

    // A TOML file is a frame if it has a node list, parameters otherwise.
    let frame = match ext {
        Some("json") => Some(FrameDescription::from_json_str(&text)?),
        Some("toml") => FrameDescription::from_toml_str(&text).ok(),
        _ => return Err(format!("unsupported file type {ext:?}; use .json or .toml").into()),
    };

    match frame {
        Some(description) => {
            let graph = description.build()?;
            let counts = graph.edge_kind_counts();
            println!("Frame description");
            println!("  Nodes:         {} ({} anchored)", graph.node_count(), graph.anchors().count());
            println!("  Edges:         {}", graph.edge_count());
            println!("    chassis:             {}", counts[0]);
            println!("    suspension:          {}", counts[1]);
            println!("    suspension_inboard:  {}", counts[2]);
            println!("    tire:                {}", counts[3]);
            println!("  Faces:         {}", graph.face_count());
            match chassis::check_wheel_contract(&graph) {
                Ok(()) => println!("  Wheel anchors: ok"),
                Err(e) => println!("  Wheel anchors: {e}"),
            }
            let isolated = graph
                .nodes()
                .iter()
                .filter(|n| !n.anchored && n.incident.is_empty())
                .count();
            if isolated > 0 {
                println!("  Warning: {isolated} free nodes have no edges and will fall freely");
            }
        }
        None => {
            let params = SimParams::from_toml_str(&text)?;
            params.validate()?;
            println!("Simulation parameters");
            println!("  time_step:       {}", params.time_step);
            println!("  gravity:         {}", params.gravity);
            println!(
                "  noise:           amplitude {}, speed {}, bias {}",
                params.noise_amplitude, params.noise_speed, params.noise_bias
            );
            println!("  chassis:         k {}, d {}", params.chassis.stiffness, params.chassis.damping);
            println!("  suspension:      k {}, d {}", params.suspension.stiffness, params.suspension.damping);
            println!("  chassis mass:    {}", params.chassis_node_mass);
        }
    }

    println!();
    println!("Valid.");
    Ok(())
}

/// Export the built-in chassis as a frame description.
pub fn frame(output_path: Option<&str>) -> CmdResult {
    let graph = chassis::build(ChassisOptions::default())?;
    let json = graph.describe().to_json()?;
    match output_path {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("Frame written to: {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}
