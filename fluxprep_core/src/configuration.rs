//! Global defaults used while loading, preparing, and solving models
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, RwLock};

use serde::{Deserialize, Serialize};

use crate::io::IoError;

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Snapshot of the current global configuration
///
/// A poisoned lock falls back to the default configuration rather than panicking.
pub fn current() -> Configuration {
    match CONFIGURATION.read() {
        Ok(config) => config.clone(),
        Err(_) => Configuration::default(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Lower bound given to reactions which don't specify one
    pub lower_bound: f64,
    /// Upper bound given to reactions which don't specify one
    pub upper_bound: f64,
    /// Feasibility and duality gap tolerance handed to the clarabel solver
    pub tolerance: f64,
    /// Objective values strictly above this are reported as growth
    pub growth_threshold: f64,
    /// Case-insensitive marker identifying the biomass reaction by name
    pub biomass_marker: String,
    /// Compartment whose compounds are flagged as uptake/secretion when a model
    /// doesn't flag them explicitly
    pub boundary_compartment: String,
    /// Treat a model with no runnable reactions as an error rather than solving it
    pub reject_empty_model: bool,
    /// Solver used by [`crate::optimize::solvers::default_solver`]
    pub solver: Solver,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            tolerance: 1e-07,
            growth_threshold: 1e-06,
            biomass_marker: "biomass_equation".to_string(),
            boundary_compartment: "b".to_string(),
            reject_empty_model: true,
            solver: Solver::Clarabel,
        }
    }
}

impl Configuration {
    /// Read a configuration from a JSON file, fields missing from the file keep their defaults
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Configuration, IoError> {
        let data = fs::read_to_string(path).map_err(|e| IoError::UnableToRead(e.to_string()))?;
        serde_json::from_str(&data).map_err(|e| IoError::Parse(e.to_string()))
    }

    /// Replace the global configuration with this one
    pub fn install(self) {
        match CONFIGURATION.write() {
            Ok(mut config) => *config = self,
            Err(poisoned) => *poisoned.into_inner() = self,
        }
    }
}

/// Enum used to specify the default solver to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Solver {
    /// Use the Clarabel interior point solver
    Clarabel,
    /// Use the microlp simplex solver, requires the minilp feature to be enabled
    Microlp,
}
