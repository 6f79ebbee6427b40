//! kinetrs command line entry point
//!
//! Reads a reaction network, runs one of the simulation drivers on it and writes the
//! resulting arrays as json.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use kinetrs_core::configuration::{Configuration, Integrator};
use kinetrs_core::io::arrays::write_arrays;
use kinetrs_core::io::spec_parse::read_specification;
use kinetrs_core::reaction_network::network::ReactionNetwork;
use kinetrs_core::simulation::linspace;
use kinetrs_core::simulation::sweep::{ParameterSweepBuilder, RateModulation};
use kinetrs_core::simulation::trajectory::TrajectoryRunBuilder;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "kinetrs")]
#[command(version)]
#[command(about = "Mass action simulation of chemical reaction networks", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Equilibrate the network once per value of an external parameter
    Sweep(SweepArgs),
    /// Integrate the network over time and record sampled concentrations
    Trajectory(TrajectoryArgs),
}

/// Arguments shared by every driver
#[derive(Args, Debug)]
struct CommonArgs {
    /// Reaction network, a specification text file or a `.json` network
    #[arg(short, long)]
    network: PathBuf,

    /// Initial concentration of a species, may be repeated
    ///
    /// Example: --init D=1.0
    #[arg(long = "init", value_name = "NAME=VALUE", value_parser = parse_init)]
    init: Vec<(String, f64)>,

    /// Json configuration file overriding the default integration settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Integration step size, overrides the configuration
    #[arg(long)]
    time_step: Option<f64>,

    /// Json file the resulting arrays are written to
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// First parameter value
    #[arg(long, default_value = "0")]
    start: f64,

    /// Last parameter value
    #[arg(long)]
    stop: f64,

    /// Number of evenly spaced parameter values
    #[arg(long, default_value = "33")]
    points: usize,

    /// Name the parameter axis is stored under in the output
    #[arg(long, default_value = "parameter")]
    parameter_name: String,

    /// Exponential modulation of a rate constant, k = k0 * exp(M * parameter), may be repeated
    ///
    /// Example: --modulate 0:-1.68
    #[arg(long = "modulate", value_name = "INDEX:M", value_parser = parse_modulation)]
    modulations: Vec<RateModulation>,

    /// Convergence cutoff, overrides the configuration
    #[arg(long)]
    cutoff: Option<f64>,

    /// Step budget per sweep point, overrides the configuration
    #[arg(long)]
    max_steps: Option<usize>,
}

#[derive(Args, Debug)]
struct TrajectoryArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of integration steps
    #[arg(long)]
    steps: usize,

    /// Record the state every STRIDE steps
    #[arg(long, default_value = "1")]
    stride: usize,

    /// Time stepping scheme (euler, euler-simultaneous or rk4), overrides the configuration
    #[arg(long, value_parser = parse_integrator)]
    integrator: Option<Integrator>,

    /// Species to record, comma separated; all species when omitted
    #[arg(long, value_delimiter = ',')]
    species: Vec<String>,
}

// region Argument parsing
fn parse_init(arg: &str) -> Result<(String, f64), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, found `{}`", arg))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid concentration `{}`: {}", value, err))?;
    Ok((name.trim().to_string(), value))
}

fn parse_modulation(arg: &str) -> Result<RateModulation, String> {
    let (index, m) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected INDEX:M, found `{}`", arg))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("invalid reaction index `{}`: {}", index, err))?;
    let m = m
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid sensitivity `{}`: {}", m, err))?;
    Ok(RateModulation::new(index, m))
}

fn parse_integrator(arg: &str) -> Result<Integrator, String> {
    match arg.to_lowercase().as_str() {
        "euler" => Ok(Integrator::Euler),
        "euler_simultaneous" | "euler-simultaneous" => Ok(Integrator::EulerSimultaneous),
        "rk4" => Ok(Integrator::Rk4),
        _ => Err(format!(
            "unknown integrator `{}`, expected euler, euler-simultaneous or rk4",
            arg
        )),
    }
}
// endregion Argument parsing

fn load_network(path: &Path) -> Result<ReactionNetwork> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let network = if is_json {
        ReactionNetwork::read_json(path)?
    } else {
        read_specification(path)?
    };
    info!(
        "Loaded {} species and {} reactions from {}",
        network.species().len(),
        network.reactions().len(),
        path.display()
    );
    Ok(network)
}

fn load_configuration(common: &CommonArgs) -> Result<Configuration> {
    let mut configuration = match &common.config {
        Some(path) => Configuration::from_json_file(path)
            .with_context(|| format!("Unable to load configuration {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(time_step) = common.time_step {
        configuration.time_step = time_step;
    }
    Ok(configuration)
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let configuration = load_configuration(&args.common)?;
    let mut network = load_network(&args.common.network)?;

    let sweep = ParameterSweepBuilder::default()
        .parameter(linspace(args.start, args.stop, args.points))
        .initial_concentrations(args.common.init.into_iter().collect())
        .modulations(args.modulations)
        .cutoff(args.cutoff.unwrap_or(configuration.cutoff))
        .time_step(configuration.time_step)
        .max_steps(args.max_steps.unwrap_or(configuration.max_steps))
        .build()?;
    let result = sweep.run(&mut network)?;

    write_arrays(&args.common.output, &result.to_arrays(&args.parameter_name))?;
    info!("Wrote sweep results to {}", args.common.output.display());
    Ok(())
}

fn run_trajectory(args: TrajectoryArgs) -> Result<()> {
    let configuration = load_configuration(&args.common)?;
    let mut network = load_network(&args.common.network)?;
    for (name, value) in &args.common.init {
        network.set_concentration(name, *value)?;
    }

    let run = TrajectoryRunBuilder::default()
        .integrator(args.integrator.unwrap_or(configuration.integrator))
        .time_step(configuration.time_step)
        .steps(args.steps)
        .stride(args.stride)
        .species(args.species)
        .build()?;
    let trajectory = run.run(&mut network)?;

    write_arrays(&args.common.output, &trajectory.to_arrays())?;
    info!("Wrote trajectory to {}", args.common.output.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Command::Sweep(args) => run_sweep(args),
        Command::Trajectory(args) => run_trajectory(args),
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn init_argument() {
        let (name, value) = parse_init("D=1.5").unwrap();
        assert_eq!(name, "D");
        assert!((value - 1.5).abs() < 1e-25);
        assert!(parse_init("D").is_err());
        assert!(parse_init("D=high").is_err());
    }

    #[test]
    fn modulation_argument() {
        let modulation = parse_modulation("2:-1.68").unwrap();
        assert_eq!(modulation.reaction, 2);
        assert!((modulation.m + 1.68).abs() < 1e-25);
        assert!(parse_modulation("2").is_err());
        assert!(parse_modulation("-1:0.5").is_err());
    }

    #[test]
    fn integrator_argument() {
        assert_eq!(parse_integrator("RK4").unwrap(), Integrator::Rk4);
        assert_eq!(parse_integrator("euler").unwrap(), Integrator::Euler);
        assert_eq!(
            parse_integrator("euler-simultaneous").unwrap(),
            Integrator::EulerSimultaneous
        );
        assert!(parse_integrator("midpoint").is_err());
    }

    #[test]
    fn sweep_command_line() {
        let cli = Cli::try_parse_from([
            "kinetrs",
            "sweep",
            "--network",
            "protein.txt",
            "--init",
            "D=1",
            "--modulate",
            "0:-1.68",
            "--modulate",
            "1:0.5",
            "--stop",
            "8",
            "--output",
            "out.json",
        ])
        .unwrap();
        match cli.command {
            Command::Sweep(args) => {
                assert_eq!(args.common.init, vec![("D".to_string(), 1.)]);
                assert_eq!(args.modulations.len(), 2);
                assert_eq!(args.points, 33);
                assert!(args.cutoff.is_none());
            }
            _ => panic!("Expected the sweep command"),
        }
    }

    #[test]
    fn trajectory_command_line() {
        let cli = Cli::try_parse_from([
            "kinetrs",
            "-v",
            "trajectory",
            "-n",
            "oregonator.txt",
            "--steps",
            "1000",
            "--integrator",
            "rk4",
            "--species",
            "X,Y,Z",
            "-o",
            "out.json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Trajectory(args) => {
                assert_eq!(args.integrator, Some(Integrator::Rk4));
                assert_eq!(args.species, vec!["X", "Y", "Z"]);
                assert_eq!(args.stride, 1);
            }
            _ => panic!("Expected the trajectory command"),
        }
    }
}
