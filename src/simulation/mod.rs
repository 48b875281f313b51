pub mod math;
pub mod states;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod ellipse;
pub mod areas;
pub mod emitter;
pub mod engine;
pub mod scenario;
