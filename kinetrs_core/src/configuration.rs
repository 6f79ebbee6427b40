//! Default integration settings shared by the simulation drivers and the CLI
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integration settings
///
/// Fields missing from a configuration file fall back to the values of
/// [`Configuration::default`]. Unknown fields are rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Size of a single integration step
    pub time_step: f64,
    /// Largest per-species change in one step that still counts as converged
    pub cutoff: f64,
    /// Step budget for a single equilibration
    pub max_steps: usize,
    /// Time stepping scheme used by trajectory runs
    pub integrator: Integrator,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            time_step: 2e-6,
            cutoff: 5e-8,
            max_steps: 5_000_000,
            integrator: Integrator::Euler,
        }
    }
}

impl Configuration {
    /// Read a configuration from a json file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Configuration, ConfigurationError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(ConfigurationError::UnableToRead(format!("{:?}", err))),
        };
        Ok(serde_json::from_str(&data)?)
    }
}

/// Enum used to specify the time stepping scheme
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    /// Explicit Euler, rates frozen at the start of the step
    Euler,
    /// Explicit Euler with the changes of all reactions summed before any concentration
    /// is written
    EulerSimultaneous,
    /// Classical fourth order Runge-Kutta
    Rk4,
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Unable to read configuration file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse configuration")]
    UnableToParse(#[from] serde_json::Error),
}
