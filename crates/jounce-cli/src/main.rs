//! jounce CLI: simulation, strategy comparison, benchmarking and validation.

use clap::{Parser, Subcommand, ValueEnum};
use jounce_solver::StrategyKind;
use jounce_types::constants::DEFAULT_WORKERS;

mod commands;

#[derive(Parser)]
#[command(name = "jounce")]
#[command(version, about = "jounce: mass-spring vehicle chassis simulation")]
struct Cli {
    /// Log filter, e.g. `info` or `jounce_solver=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Sequential,
    Parallel,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => StrategyKind::Sequential,
            StrategyArg::Parallel => StrategyKind::Parallel,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and optionally export the animation.
    Simulate {
        /// Simulation parameters (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Frame description (JSON or TOML). The built-in chassis when omitted.
        #[arg(short, long)]
        frame: Option<String>,

        /// Number of ticks to run.
        #[arg(short, long, default_value_t = 1000)]
        ticks: u32,

        #[arg(short, long, value_enum, default_value_t = StrategyArg::Sequential)]
        strategy: StrategyArg,

        /// Worker threads for the parallel strategy.
        #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,

        /// Animation JSON output path.
        #[arg(short, long)]
        output: Option<String>,

        /// Capture a frame every N ticks.
        #[arg(long, default_value_t = 1)]
        every: u32,

        /// Color edges by strain instead of by kind.
        #[arg(long)]
        tension: bool,

        /// Road seed.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Write per-tick events as JSON lines to this path.
        #[arg(long)]
        events: Option<String>,
    },

    /// Run both strategies on a scenario and report how far they diverge.
    Compare {
        /// Scenario name (parked_chassis, rough_road, lattice_sag).
        #[arg(long, default_value = "rough_road")]
        scenario: String,

        #[arg(short, long, default_value_t = 500)]
        ticks: u32,

        #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,
    },

    /// Run the benchmark suite under both strategies.
    Benchmark {
        /// Which scenario to run (parked_chassis, rough_road, lattice_sag, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a parameter file (.toml) or a frame description (.json/.toml).
    Validate {
        path: String,
    },

    /// Write the built-in chassis as a frame description.
    Frame {
        /// Output path (JSON). Printed to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_logging(level: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let filter = match level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = match cli.command {
        Commands::Simulate {
            config,
            frame,
            ticks,
            strategy,
            workers,
            output,
            every,
            tension,
            seed,
            events,
        } => commands::simulate(commands::SimulateArgs {
            config,
            frame,
            ticks,
            strategy: strategy.into(),
            workers,
            output,
            every,
            tension,
            seed,
            events,
        }),
        Commands::Compare {
            scenario,
            ticks,
            workers,
        } => commands::compare(&scenario, ticks, workers),
        Commands::Benchmark {
            scenario,
            workers,
            output,
        } => commands::benchmark(&scenario, workers, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Frame { output } => commands::frame(output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
