//! Numerical and physical parameters for the orbit engine
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `G` and force softening `eps2`,
//! - eccentricity tolerance used to keep anomaly inversions finite,
//! - bounds on the number of equal-time divisions

/// Fewest sectors an orbit can be split into
pub const MIN_DIVISIONS: usize = 2;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening
    pub eccentricity_tolerance: f64, // e is kept below 1 - tolerance
    pub max_divisions: usize, // upper bound for configure_divisions
    pub min_mass: f64, // smallest mass an edit may set
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 10_000.0,
            eps2: 0.0,
            eccentricity_tolerance: 1e-6,
            max_divisions: 6,
            min_mass: 1e-6,
        }
    }
}

impl Parameters {
    /// Clamp a requested division count into `[MIN_DIVISIONS, max_divisions]`
    pub fn clamp_divisions(&self, n: usize) -> usize {
        n.clamp(MIN_DIVISIONS, self.max_divisions.max(MIN_DIVISIONS))
    }
}
