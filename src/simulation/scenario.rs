//! Build a ready-to-run orbit engine from configuration
//!
//! Maps the YAML-facing `ScenarioConfig` onto runtime types:
//! - engine settings (`EngineSettings`)
//! - numerical parameters (`Parameters`)
//! - the two bodies (`Body`, nalgebra vectors)

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{ScenarioError, ScenarioResult};
use crate::simulation::engine::{EllipticalOrbitEngine, EngineSettings};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

impl EllipticalOrbitEngine {
    pub fn from_scenario(cfg: ScenarioConfig) -> ScenarioResult<Self> {
        cfg.validate()?;

        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let bodies: Vec<Body> = cfg.bodies.iter().map(|bc: &BodyConfig| Body {
            x: NVec2::new(bc.x[0], bc.x[1]),
            v: NVec2::new(bc.v[0], bc.v[1]),
            m: bc.m,
            radius: bc.radius,
        }).collect();
        let [primary, secondary]: [Body; 2] = bodies
            .try_into()
            .map_err(|rest: Vec<Body>| ScenarioError::BodyCount { found: rest.len() })?;

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            eps2: p_cfg.eps2,
            eccentricity_tolerance: p_cfg.eccentricity_tolerance,
            max_divisions: p_cfg.max_divisions,
            ..Parameters::default()
        };

        // Engine settings (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let settings = EngineSettings {
            integrator: e_cfg.integrator,
            substeps: e_cfg.substeps,
            divisions: e_cfg.divisions,
            always_circular: e_cfg.always_circular,
        };

        Ok(Self::new(primary, secondary, parameters, settings))
    }
}
