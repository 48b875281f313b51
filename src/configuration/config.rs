//! Configuration types for loading orbit scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator, sub-steps, divisions, circular mode
//! - [`ParametersConfig`] – physical constants and numerical tolerances
//! - [`BodyConfig`]       – initial state for the primary and the secondary
//! - [`ScenarioConfig`]   – top-level wrapper loaded from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "verlet"    # or "leapfrog"
//!   substeps: 20            # integrator steps per engine step
//!   divisions: 4            # equal-time sectors
//!   always_circular: false
//!
//! parameters:
//!   G: 10000.0              # gravitational constant
//!   eps2: 0.0               # softening epsilon^2
//!   eccentricity_tolerance: 1.0e-6
//!   max_divisions: 6
//!
//! bodies:                   # primary (star) first, then secondary (planet)
//!   - x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 200.0
//!     radius: 20.0
//!   - x: [ 200.0, 0.0 ]
//!     v: [ 0.0, 100.0 ]
//!     m: 10.0
//!     radius: 5.0
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ScenarioError, ScenarioResult};

/// Which integrator the engine uses
/// `integrator: "verlet"` or `integrator: "leapfrog"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorConfig {
    #[serde(rename = "verlet")] // velocity Verlet, kick-drift-kick, two force evaluations
    Verlet,

    #[serde(rename = "leapfrog")] // position Verlet, drift-kick-drift, one force evaluation
    Leapfrog,
}

fn default_substeps() -> usize { 20 }
fn default_divisions() -> usize { 4 }
fn default_eccentricity_tolerance() -> f64 { 1e-6 }
fn default_max_divisions() -> usize { 6 }

/// Engine-level configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig, // time integrator
    #[serde(default = "default_substeps")]
    pub substeps: usize, // integrator steps per engine step
    #[serde(default = "default_divisions")]
    pub divisions: usize, // initial equal-time sectors
    #[serde(default)]
    pub always_circular: bool, // force e = 0
}

/// Physical and numerical parameters
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    #[serde(default)]
    pub eps2: f64, // softening
    #[serde(default = "default_eccentricity_tolerance")]
    pub eccentricity_tolerance: f64,
    #[serde(default = "default_max_divisions")]
    pub max_divisions: usize,
}

/// Initial state of one body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // position in simulation units
    pub v: Vec<f64>, // velocity in simulation units per time unit
    pub m: f64, // mass
    pub radius: f64, // collision radius
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Parse and validate a scenario from YAML text
    pub fn from_yaml_str(text: &str) -> ScenarioResult<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a scenario file
    pub fn from_path(path: &Path) -> ScenarioResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Structural checks the engine cannot clamp its way out of
    pub fn validate(&self) -> ScenarioResult<()> {
        if self.bodies.len() != 2 {
            return Err(ScenarioError::BodyCount { found: self.bodies.len() });
        }
        for (i, body) in self.bodies.iter().enumerate() {
            if body.x.len() != 2 {
                return Err(ScenarioError::VectorLength { body: i, field: "x", found: body.x.len() });
            }
            if body.v.len() != 2 {
                return Err(ScenarioError::VectorLength { body: i, field: "v", found: body.v.len() });
            }
        }
        if !self.parameters.G.is_finite() || self.parameters.G <= 0.0 {
            return Err(ScenarioError::InvalidValue { field: "G", value: self.parameters.G });
        }
        let tol = self.parameters.eccentricity_tolerance;
        if !tol.is_finite() || tol <= 0.0 || tol >= 1.0 {
            return Err(ScenarioError::InvalidValue { field: "eccentricity_tolerance", value: tol });
        }
        if !self.parameters.eps2.is_finite() || self.parameters.eps2 < 0.0 {
            return Err(ScenarioError::InvalidValue { field: "eps2", value: self.parameters.eps2 });
        }
        Ok(())
    }
}
