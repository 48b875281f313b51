//! Core state types for the two-body orbit engine.
//!
//! - `Body`         a point mass in world coordinates (star or planet)
//! - `OrbitalState` the secondary relative to the primary, plus `mu`
//! - `OrbitStatus`  which of the three engine states we are in

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub radius: f64, // collision radius
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64) -> Self {
        Self { x, v, m, radius }
    }
}

/// Which of the two bodies an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRole {
    Primary, // the fixed star at the focus
    Secondary, // the orbiting planet
}

/// Relative two-body state integrated by the engine
#[derive(Debug, Clone)]
pub struct OrbitalState {
    pub position: NVec2, // secondary - primary
    pub velocity: NVec2, // secondary - primary
    pub mu: f64, // G * (m1 + m2)
    pub t: f64, // time
}

impl OrbitalState {
    /// Build the relative state from the two bodies
    pub fn from_bodies(primary: &Body, secondary: &Body, g: f64, t: f64) -> Self {
        Self {
            position: secondary.x - primary.x,
            velocity: secondary.v - primary.v,
            mu: g * (primary.m + secondary.m),
            t,
        }
    }

    pub fn radius(&self) -> f64 {
        self.position.norm()
    }

    /// Specific orbital energy v^2/2 - mu/r
    pub fn specific_energy(&self) -> f64 {
        0.5 * self.velocity.norm_squared() - self.mu / self.radius()
    }

    /// z-component of r x v; negative means clockwise (retrograde) travel
    pub fn angular_momentum(&self) -> f64 {
        self.position.x * self.velocity.y - self.position.y * self.velocity.x
    }

    pub fn is_retrograde(&self) -> bool {
        self.angular_momentum() < 0.0
    }
}

/// Engine state machine.
///
/// `Stable -> Unbound` happens when the secondary reaches escape energy,
/// `Stable -> Collided` when the bodies touch. Both are left only by a reset
/// (an explicit velocity/position/mass edit may also clear `Unbound`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitStatus {
    Stable,
    Unbound,
    Collided,
}

impl OrbitStatus {
    pub fn is_allowed(self) -> bool {
        self == OrbitStatus::Stable
    }
}
