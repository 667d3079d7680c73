//! spbd-runner: headless Brownian dynamics runner.
//!
//! Usage:
//!   spbd-runner [options] spbd.in
//!
//! Options:
//!   --seed N                 Noise seed (default: config `seed`, else clock)
//!   --replicas N             Independent runs to perform (default 1)
//!   --output-file PATH       Override `trajectoryOutputFile`
//!   --time-units UNITS       `steps` or `physical`
//!   --summary-json PATH      Also write the run summary as JSON
//!   --demo                   Use the built-in cubic force profile on [0, 6]
//!   --quiet                  No progress reports

use anyhow::{bail, Context, Result};
use spbd_core::{
    engine::{run_replicas, SimEngine},
    noise::SeededNoise,
    observer::{LogProgress, ProgressObserver, Silent},
    profile::{cubic_force_profile, uniform_damping},
    summary::RunSummary,
    writer::write_trajectory_file,
    SimulationConfig, TimeUnits,
};
use std::env;
use std::path::{Path, PathBuf};

/// Flags that consume the following argument.
const VALUE_FLAGS: &[&str] = &[
    "--seed",
    "--replicas",
    "--output-file",
    "--time-units",
    "--summary-json",
];

const DEMO_MIN: f32 = 0.0;
const DEMO_MAX: f32 = 6.0;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }
    if args.iter().any(|a| a == "--version") {
        println!("spbd-runner {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(config_path) = positional(&args) else {
        print_usage();
        bail!("no config file given");
    };
    let quiet = args.iter().any(|a| a == "--quiet");
    let demo = args.iter().any(|a| a == "--demo");
    let replicas: u64 = parse_arg(&args, "--replicas")?.unwrap_or(1);

    let mut config = SimulationConfig::load(config_path)?;
    if let Some(seed) = parse_arg::<u64>(&args, "--seed")? {
        config.seed = Some(seed);
    }
    if let Some(units) = parse_arg::<TimeUnits>(&args, "--time-units")? {
        config.time_units = units;
    }
    if let Some(path) = flag_value(&args, "--output-file") {
        config.trajectory_output_file = PathBuf::from(path);
    }
    if demo {
        apply_demo_profile(&mut config);
    }
    let summary_json = flag_value(&args, "--summary-json").map(PathBuf::from);

    println!("SPBD -- Single Protein Brownian Dynamics");
    println!("  config:    {config_path}");
    println!("  steps:     {}", config.steps);
    println!("  saveFreq:  {}", config.save_freq);
    println!("  nodes:     {}", config.force_vector.len());
    println!("  output:    {}", config.trajectory_output_file.display());
    println!();

    let mut observer: Box<dyn ProgressObserver> = if quiet {
        Box::new(Silent)
    } else {
        Box::new(LogProgress::new())
    };

    let summaries = if replicas <= 1 {
        run_single(config, &mut *observer)?
    } else {
        run_batch(&config, replicas, &mut *observer)?
    };

    for summary in &summaries {
        print_summary(summary);
    }
    if let Some(path) = summary_json {
        let json = serde_json::to_string_pretty(&summaries)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Cannot write {}", path.display()))?;
    }
    Ok(())
}

fn run_single(config: SimulationConfig, observer: &mut dyn ProgressObserver) -> Result<Vec<RunSummary>> {
    let mut engine = SimEngine::from_config(config)?;
    let seed = engine.seed();
    let output = engine.run(observer)?;
    let config = engine.config();

    write_trajectory_file(&config.trajectory_output_file, &output)?;
    Ok(RunSummary::from_output(config, Some(seed), &output)
        .into_iter()
        .collect())
}

fn run_batch(
    config: &SimulationConfig,
    replicas: u64,
    observer: &mut dyn ProgressObserver,
) -> Result<Vec<RunSummary>> {
    let master_seed = config
        .seed
        .unwrap_or_else(|| SeededNoise::from_entropy_seed().seed());
    let runs = run_replicas(config, master_seed, replicas, observer)?;

    let mut summaries = Vec::with_capacity(runs.len());
    for run in &runs {
        let path = replica_path(&config.trajectory_output_file, run.index);
        write_trajectory_file(&path, &run.output)?;
        summaries.extend(RunSummary::from_output(config, Some(run.seed), &run.output));
    }
    Ok(summaries)
}

/// Replace the force and damping grids with the cubic demo landscape,
/// keeping the configured spacing.
fn apply_demo_profile(config: &mut SimulationConfig) {
    let force = cubic_force_profile(config.position_spacing, DEMO_MIN, DEMO_MAX);
    let damping = uniform_damping(force.len(), config.position_spacing);
    log::info!("demo profile: {} nodes on [{DEMO_MIN}, {DEMO_MAX}]", force.len());
    config.force_vector = force.values().to_vec();
    config.damping_vector = damping.values().to_vec();
}

/// `traj.csv` stays as is for replica 0; replica k goes to `traj_r<k>.csv`.
fn replica_path(base: &Path, index: u64) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trajectory".to_string());
    let name = match base.extension() {
        Some(ext) => format!("{stem}_r{index}.{}", ext.to_string_lossy()),
        None      => format!("{stem}_r{index}"),
    };
    base.with_file_name(name)
}

fn print_summary(summary: &RunSummary) {
    println!("=== RUN SUMMARY ===");
    if let Some(seed) = summary.seed {
        println!("  seed:            {seed}");
    }
    println!("  steps:           {}", summary.steps);
    println!("  samples:         {}", summary.samples);
    println!("  start position:  {}", summary.start_position);
    println!("  final position:  {}", summary.final_position);
    println!("  range:           [{}, {}]", summary.min_position, summary.max_position);
    println!("  mean position:   {:.4}", summary.mean_position);
    println!();
}

fn print_usage() {
    println!("This program performs a 1D brownian dynamics simulation on a");
    println!("single particle trapped inside a force profile.");
    println!();
    println!("Usage: spbd-runner [options] spbd.in");
    println!();
    println!("  --seed N              noise seed");
    println!("  --replicas N          number of independent runs");
    println!("  --output-file PATH    trajectory CSV path");
    println!("  --time-units UNITS    steps | physical");
    println!("  --summary-json PATH   write run summaries as JSON");
    println!("  --demo                use the built-in cubic force profile");
    println!("  --quiet               no progress reports");
    println!("  --help                display this help");
    println!("  --version             display the version");
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    flag_value(args, flag)
        .map(|v| v.parse().map_err(|e| anyhow::anyhow!("invalid {flag} '{v}': {e}")))
        .transpose()
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        return Some(arg.as_str());
    }
    None
}
