//! This module provides parameter sweeps: equilibrate a network once per value of an external
//! parameter (e.g. denaturant concentration) that modulates its rate constants
use derive_builder::Builder;
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::configuration::Configuration;
use crate::io::arrays::Arrays;
use crate::reaction_network::network::{NetworkError, ReactionNetwork};
use crate::simulation::{equilibrate, SimulationError};

/// Exponential dependence of one rate constant on the swept parameter,
/// `k(c) = k0 * exp(m * c)`
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateModulation {
    /// Index of the reaction, in registration order
    pub reaction: usize,
    /// Sensitivity of ln(k) to the parameter
    pub m: f64,
}

impl RateModulation {
    pub fn new(reaction: usize, m: f64) -> Self {
        RateModulation { reaction, m }
    }

    /// Rate constant at parameter value `parameter`, given the unmodulated `base` value
    pub fn apply(&self, base: f64, parameter: f64) -> f64 {
        base * (self.m * parameter).exp()
    }
}

/// Settings for a parameter sweep
///
/// # Examples
/// ```rust
/// use kinetrs_core::simulation::sweep::{ParameterSweepBuilder, RateModulation};
/// let sweep = ParameterSweepBuilder::default()
///     .parameter(vec![0.0, 1.0, 2.0])
///     .modulations(vec![RateModulation::new(0, -1.68)])
///     .build()
///     .unwrap();
/// assert_eq!(sweep.parameter.len(), 3);
/// ```
#[derive(Builder, Debug, Clone)]
pub struct ParameterSweep {
    /// Values of the external parameter, visited in order
    pub parameter: Vec<f64>,
    /// Concentrations every sweep point starts from; unlisted species start at 0
    #[builder(default = "IndexMap::new()")]
    pub initial_concentrations: IndexMap<String, f64>,
    /// Rate constant modulations applied at every sweep point
    #[builder(default = "Vec::new()")]
    pub modulations: Vec<RateModulation>,
    #[builder(default = "Configuration::default().cutoff")]
    pub cutoff: f64,
    #[builder(default = "Configuration::default().time_step")]
    pub time_step: f64,
    #[builder(default = "Configuration::default().max_steps")]
    pub max_steps: usize,
}

/// Final state of every sweep point
#[derive(Clone, Debug)]
pub struct SweepResult {
    /// Parameter values, in sweep order
    pub parameter: Vec<f64>,
    /// Final concentration of each species at each sweep point
    pub concentrations: IndexMap<String, Vec<f64>>,
    /// Euler steps taken at each sweep point
    pub steps: Vec<usize>,
    /// Whether each sweep point reached the convergence cutoff
    pub converged: Vec<bool>,
}

impl SweepResult {
    /// Parameter axis under `parameter_name`, followed by one array per species
    pub fn to_arrays(&self, parameter_name: &str) -> Arrays {
        let mut arrays = Arrays::new();
        arrays.insert(parameter_name.to_string(), self.parameter.clone());
        for (name, values) in &self.concentrations {
            arrays.insert(name.clone(), values.clone());
        }
        arrays
    }
}

impl ParameterSweep {
    /// Run the sweep with the exponential rate modulations
    pub fn run(&self, network: &mut ReactionNetwork) -> Result<SweepResult, SimulationError> {
        for modulation in &self.modulations {
            if modulation.reaction >= network.reactions().len() {
                return Err(NetworkError::UnknownReaction(modulation.reaction).into());
            }
        }
        let modulations = &self.modulations;
        self.run_with(network, |parameter, reaction, base| {
            modulations
                .iter()
                .filter(|m| m.reaction == reaction)
                .fold(base, |k, m| m.apply(k, parameter))
        })
    }

    /// Run the sweep with an arbitrary rate law
    ///
    /// At every sweep point each reaction's rate constant is set to
    /// `rate(parameter, reaction index, base rate constant)`, where the base value is the rate
    /// constant the reaction had when the sweep started. Concentrations are reset to
    /// `initial_concentrations` before equilibrating. The base rate constants are restored
    /// once the sweep ends.
    pub fn run_with<F>(
        &self,
        network: &mut ReactionNetwork,
        rate: F,
    ) -> Result<SweepResult, SimulationError>
    where
        F: Fn(f64, usize, f64) -> f64,
    {
        if !(self.time_step.is_finite() && self.time_step > 0.) {
            return Err(SimulationError::InvalidParameter(
                "time step must be positive and finite".to_string(),
            ));
        }
        for name in self.initial_concentrations.keys() {
            network.concentration(name)?;
        }
        let base: Vec<f64> = network
            .reactions()
            .iter()
            .map(|r| r.rate_constant())
            .collect();
        let names: Vec<String> = network.species().keys().cloned().collect();

        info!(
            "Sweeping {} parameter values over {} reactions",
            self.parameter.len(),
            base.len()
        );
        let mut result = SweepResult {
            parameter: self.parameter.clone(),
            concentrations: names
                .iter()
                .map(|name| (name.clone(), Vec::with_capacity(self.parameter.len())))
                .collect(),
            steps: Vec::with_capacity(self.parameter.len()),
            converged: Vec::with_capacity(self.parameter.len()),
        };

        for (point, &parameter) in self.parameter.iter().enumerate() {
            for (index, &k0) in base.iter().enumerate() {
                network.set_rate_constant(index, rate(parameter, index, k0))?;
            }
            for name in &names {
                let initial = self.initial_concentrations.get(name).copied().unwrap_or(0.);
                network.set_concentration(name, initial)?;
            }

            let equilibration =
                equilibrate(network, self.cutoff, self.time_step, self.max_steps);
            if equilibration.converged {
                debug!(
                    "Sweep point {} (parameter {}) converged after {} steps",
                    point, parameter, equilibration.steps
                );
            } else {
                warn!(
                    "Sweep point {} (parameter {}) did not converge within {} steps",
                    point, parameter, self.max_steps
                );
            }

            for (name, values) in result.concentrations.iter_mut() {
                values.push(network.concentration(name)?);
            }
            result.steps.push(equilibration.steps);
            result.converged.push(equilibration.converged);
        }

        for (index, &k0) in base.iter().enumerate() {
            network.set_rate_constant(index, k0)?;
        }
        info!(
            "Sweep finished, {} of {} points converged",
            result.converged.iter().filter(|&&c| c).count(),
            result.converged.len()
        );
        Ok(result)
    }
}
