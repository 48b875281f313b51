pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, BodyRole, NVec2, OrbitStatus, OrbitalState};
pub use simulation::params::{Parameters, MIN_DIVISIONS};
pub use simulation::forces::{Acceleration, AccelSet, CentralGravity};
pub use simulation::integrator::{classify, leapfrog_integrator, verlet_integrator};
pub use simulation::ellipse::{derive_ellipse, circular_ellipse, third_law_period, EllipseParameters};
pub use simulation::areas::{AreaPartitioner, OrbitalArea};
pub use simulation::emitter::{ChangeEmitter, ListenerId};
pub use simulation::engine::{EllipticalOrbitEngine, EngineSettings};

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use error::{ScenarioError, ScenarioResult};

pub use benchmark::benchmark::{bench_partition, bench_step};
