//! Acceleration contributors for the relative two-body state
//!
//! The engine integrates the secondary relative to the primary, so every
//! term here returns the acceleration of that relative coordinate

use crate::simulation::states::{NVec2, OrbitalState};

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Total acceleration at time `t` for relative position `x` (which may
    /// differ from `state.position` mid-step)
    pub fn accumulate_accel(&self, t: f64, state: &OrbitalState, x: &NVec2) -> NVec2 {
        let mut out = NVec2::zeros();
        for term in &self.terms {
            term.acceleration(t, state, x, &mut out);
        }
        out
    }
}

/// Trait for acceleration sources acting on the relative coordinate
/// Implementations add their contribution into `out`
pub trait Acceleration {
    fn acceleration(&self, _t: f64, state: &OrbitalState, x: &NVec2, out: &mut NVec2);
}

/// Inverse-square attraction toward the primary: a = -mu * x / |x|^3
///
/// `mu` is read from the state on every call so a mass edit takes effect
/// on the next evaluation without rebuilding the force set
pub struct CentralGravity {
    pub eps2: f64, // softening
}

impl Acceleration for CentralGravity {
    fn acceleration(&self, _t: f64, state: &OrbitalState, x: &NVec2, out: &mut NVec2) {
        let d2 = x.norm_squared() + self.eps2;
        if d2 <= 0.0 { // bodies coincide, no defined direction
            return;
        }
        let inv_r = d2.sqrt().recip();
        let inv_r3 = inv_r * inv_r * inv_r;

        *out -= state.mu * inv_r3 * *x;
    }
}
