//! Module providing the driver loops built on top of the integrators: equilibration,
//! parameter sweeps, and sampled trajectories

pub mod sweep;
pub mod trajectory;

use thiserror::Error;

use crate::reaction_network::network::{NetworkError, ReactionNetwork};

/// Outcome of driving a network towards steady state
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Equilibration {
    /// Whether the convergence criterion was met within the step budget
    pub converged: bool,
    /// Number of Euler steps taken
    pub steps: usize,
}

/// Take equilibrium-checking Euler steps until the network converges or `max_steps` is spent
///
/// # Examples
/// ```rust
/// use kinetrs_core::io::spec_parse::parse_specification;
/// use kinetrs_core::simulation::equilibrate;
/// let mut network = parse_specification("A B\nA - B 1\nB - A 1\n").unwrap();
/// network.set_concentration("A", 1.0).unwrap();
/// let result = equilibrate(&mut network, 1e-9, 1e-3, 100_000);
/// assert!(result.converged);
/// assert!((network.concentration("B").unwrap() - 0.5).abs() < 1e-5);
/// ```
pub fn equilibrate(
    network: &mut ReactionNetwork,
    cutoff: f64,
    time_step: f64,
    max_steps: usize,
) -> Equilibration {
    let mut steps = 0;
    let mut converged = false;
    while !converged && steps < max_steps {
        converged = network.step_euler_with_convergence(cutoff, time_step);
        steps += 1;
    }
    Equilibration { converged, steps }
}

/// `points` evenly spaced values from `start` to `stop`, both included
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let spacing = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + spacing * i as f64).collect()
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    #[error("Simulation references an invalid network item")]
    Network(#[from] NetworkError),
    #[error("Invalid simulation parameter: {0}")]
    InvalidParameter(String),
}
