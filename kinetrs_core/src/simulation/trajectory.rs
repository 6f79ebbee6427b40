//! This module provides long-time integration of a network, sampled at a fixed stride
use derive_builder::Builder;
use indexmap::IndexMap;
use log::{debug, info};

use crate::configuration::{Configuration, Integrator};
use crate::io::arrays::Arrays;
use crate::reaction_network::network::ReactionNetwork;
use crate::simulation::SimulationError;

/// Settings for a sampled trajectory
#[derive(Builder, Debug, Clone)]
pub struct TrajectoryRun {
    #[builder(default = "Integrator::Euler")]
    pub integrator: Integrator,
    #[builder(default = "Configuration::default().time_step")]
    pub time_step: f64,
    /// Number of integration steps
    pub steps: usize,
    /// Record the state every `stride` steps
    #[builder(default = "1")]
    pub stride: usize,
    /// Species to record, all species when empty
    #[builder(default = "Vec::new()")]
    pub species: Vec<String>,
}

/// Sampled concentrations over time
#[derive(Clone, Debug)]
pub struct Trajectory {
    pub time: Vec<f64>,
    /// Concentrations of every recorded species, parallel to `time`
    pub series: IndexMap<String, Vec<f64>>,
}

impl Trajectory {
    /// Time axis under `"time"`, followed by one array per species
    pub fn to_arrays(&self) -> Arrays {
        let mut arrays = Arrays::new();
        arrays.insert("time".to_string(), self.time.clone());
        for (name, values) in &self.series {
            arrays.insert(name.clone(), values.clone());
        }
        arrays
    }

    fn record(&mut self, network: &ReactionNetwork, time: f64) -> Result<(), SimulationError> {
        self.time.push(time);
        for (name, values) in self.series.iter_mut() {
            values.push(network.concentration(name)?);
        }
        Ok(())
    }
}

impl TrajectoryRun {
    /// Integrate the network from its current state
    ///
    /// The state is recorded before every step whose index is a multiple of `stride`, at time
    /// `index * time_step`, and once more after the final step.
    ///
    /// # Examples
    /// ```rust
    /// use kinetrs_core::io::spec_parse::parse_specification;
    /// use kinetrs_core::simulation::trajectory::TrajectoryRunBuilder;
    /// let mut network = parse_specification("A B\nA - B 1\n").unwrap();
    /// network.set_concentration("A", 1.0).unwrap();
    /// let run = TrajectoryRunBuilder::default()
    ///     .time_step(0.01)
    ///     .steps(100)
    ///     .stride(10)
    ///     .build()
    ///     .unwrap();
    /// let trajectory = run.run(&mut network).unwrap();
    /// assert_eq!(trajectory.time.len(), 11);
    /// ```
    pub fn run(&self, network: &mut ReactionNetwork) -> Result<Trajectory, SimulationError> {
        if self.stride == 0 {
            return Err(SimulationError::InvalidParameter(
                "stride must be at least 1".to_string(),
            ));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.) {
            return Err(SimulationError::InvalidParameter(
                "time step must be positive and finite".to_string(),
            ));
        }
        let names: Vec<String> = if self.species.is_empty() {
            network.species().keys().cloned().collect()
        } else {
            for name in &self.species {
                network.concentration(name)?;
            }
            self.species.clone()
        };

        let samples = self.steps / self.stride + 2;
        let mut trajectory = Trajectory {
            time: Vec::with_capacity(samples),
            series: names
                .iter()
                .map(|name| (name.clone(), Vec::with_capacity(samples)))
                .collect(),
        };

        info!(
            "Integrating {} steps of {} with {:?}",
            self.steps, self.time_step, self.integrator
        );
        for step in 0..self.steps {
            if step % self.stride == 0 {
                trajectory.record(network, step as f64 * self.time_step)?;
                debug!("Recorded sample at step {}", step);
            }
            network.step(self.integrator, self.time_step);
        }
        trajectory.record(network, self.steps as f64 * self.time_step)?;
        Ok(trajectory)
    }
}
