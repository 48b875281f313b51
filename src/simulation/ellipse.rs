//! Closed-form ellipse parameters from an instantaneous two-body state.
//!
//! # Governing equations
//!
//! ```text
//! h      = r x v                       (z-component, signed)
//! eps    = v^2/2 - mu/|r|              (< 0 for a bound orbit)
//! a      = -mu / (2 eps)
//! e      = sqrt(1 + 2 eps h^2 / mu^2)
//! b      = a sqrt(1 - e^2),  c = a e
//! e_vec  = ((v^2 - mu/r) r - (r . v) v) / mu
//! T      = 2 pi sqrt(a^3 / mu)
//! ```
//!
//! The true anomaly is measured counterclockwise from periapsis whatever the
//! direction of travel; retrograde orbits run through it backwards.
//!
//! Anomaly conversions follow the usual chain mean <-> eccentric <-> true,
//! with Kepler's equation `M = E - e sin E` solved by Newton iteration.

use std::f64::consts::{PI, TAU};

use super::math::{angle_of, cross, from_polar, normalize_angle};
use super::states::NVec2;

/// Iteration cap for the Kepler solver
const KEPLER_MAX_ITER: usize = 50;
/// Convergence threshold on the Newton correction
const KEPLER_TOL: f64 = 1e-12;
/// Below this length the eccentricity vector has no usable direction
const APSIDE_EPS: f64 = 1e-12;

/// Shape and phase of a bound orbit around the primary.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseParameters {
    /// Semi-major axis `a`
    pub semi_major_axis: f64,
    /// Semi-minor axis `b`
    pub semi_minor_axis: f64,
    /// Eccentricity, always in `[0, 1)`
    pub eccentricity: f64,
    /// Centre-to-focus distance `c = a e`
    pub focal_distance: f64,
    pub periapsis_distance: f64,
    pub apoapsis_distance: f64,
    /// Orbital period from Kepler's third law
    pub period: f64,
    /// Angle of the periapsis direction from +x, in [0, 2pi)
    pub argument_of_periapsis: f64,
    /// Current angle from periapsis, counterclockwise, in [0, 2pi)
    pub true_anomaly: f64,
    /// Specific orbital energy the shape was derived from
    pub energy: f64,
    /// Signed specific angular momentum
    pub angular_momentum: f64,
    /// Gravitational parameter the shape was derived from
    pub mu: f64,
}

/// Kepler's third law: period of an orbit with semi-major axis `a`
pub fn third_law_period(a: f64, mu: f64) -> f64 {
    TAU * (a.powi(3) / mu).sqrt()
}

/// Solve Kepler's equation M = E - e sin(E) for the eccentric anomaly
pub fn eccentric_from_mean(mean_anomaly: f64, e: f64) -> f64 {
    let m = normalize_angle(mean_anomaly);

    // E = M is a good start for moderate e, pi for highly eccentric orbits
    let mut ea = if e < 0.8 { m } else { PI };

    for _ in 0..KEPLER_MAX_ITER {
        let f = ea - e * ea.sin() - m; // f(E)
        let fp = 1.0 - e * ea.cos(); // f'(E)
        let delta = f / fp;
        ea -= delta;

        if delta.abs() < KEPLER_TOL {
            break;
        }
    }

    normalize_angle(ea)
}

pub fn mean_from_eccentric(ea: f64, e: f64) -> f64 {
    normalize_angle(ea - e * ea.sin())
}

/// nu = 2 atan2(sqrt(1+e) sin(E/2), sqrt(1-e) cos(E/2))
pub fn true_from_eccentric(ea: f64, e: f64) -> f64 {
    let half = 0.5 * ea;
    let y = (1.0 + e).sqrt() * half.sin();
    let x = (1.0 - e).sqrt() * half.cos();
    normalize_angle(2.0 * y.atan2(x))
}

/// E = 2 atan2(sqrt(1-e) sin(nu/2), sqrt(1+e) cos(nu/2))
pub fn eccentric_from_true(nu: f64, e: f64) -> f64 {
    let half = 0.5 * nu;
    let y = (1.0 - e).sqrt() * half.sin();
    let x = (1.0 + e).sqrt() * half.cos();
    normalize_angle(2.0 * y.atan2(x))
}

pub fn true_from_mean(mean_anomaly: f64, e: f64) -> f64 {
    true_from_eccentric(eccentric_from_mean(mean_anomaly, e), e)
}

pub fn mean_from_true(nu: f64, e: f64) -> f64 {
    mean_from_eccentric(eccentric_from_true(nu, e), e)
}

/// Derive the ellipse for relative position `r` and velocity `v`.
///
/// Returns `None` when the state is unbound (`eps >= 0`) or degenerate
/// (zero separation, non-finite input). Eccentricity is clamped to
/// `[0, 1 - tolerance]` so anomaly inversions stay finite for radial orbits.
pub fn derive_ellipse(r: &NVec2, v: &NVec2, mu: f64, tolerance: f64) -> Option<EllipseParameters> {
    let r_norm = r.norm();
    if r_norm <= 0.0 || !r_norm.is_finite() || !v.norm().is_finite() || mu <= 0.0 {
        return None;
    }

    let h = cross(r, v);
    let v2 = v.norm_squared();
    let energy = 0.5 * v2 - mu / r_norm;
    if energy >= 0.0 {
        return None;
    }

    let tolerance = if tolerance.is_finite() { tolerance.clamp(f64::EPSILON, 1.0) } else { f64::EPSILON };
    let a = -mu / (2.0 * energy);
    let e_raw = (1.0 + 2.0 * energy * h * h / (mu * mu)).max(0.0).sqrt();
    let e = e_raw.min(1.0 - tolerance);
    debug_assert!(e >= 0.0, "negative eccentricity {e}");

    let e_vec = ((v2 - mu / r_norm) * *r - r.dot(v) * *v) / mu;
    let w = if e_vec.norm() > APSIDE_EPS { angle_of(&e_vec) } else { 0.0 };
    let nu = normalize_angle(angle_of(r) - w);

    Some(EllipseParameters::from_shape(a, e, w, nu, energy, h, mu))
}

/// Circular orbit of radius |r|, bypassing the energy derivation.
///
/// The direction of travel is taken from the sign of `h`.
pub fn circular_ellipse(r: &NVec2, h_sign: f64, mu: f64) -> Option<EllipseParameters> {
    let a = r.norm();
    if a <= 0.0 || !a.is_finite() || mu <= 0.0 {
        return None;
    }
    let h = h_sign.signum() * (mu * a).sqrt();
    let energy = -mu / (2.0 * a);

    Some(EllipseParameters::from_shape(a, 0.0, 0.0, angle_of(r), energy, h, mu))
}

impl EllipseParameters {
    fn from_shape(a: f64, e: f64, w: f64, nu: f64, energy: f64, h: f64, mu: f64) -> Self {
        Self {
            semi_major_axis: a,
            semi_minor_axis: a * (1.0 - e * e).sqrt(),
            eccentricity: e,
            focal_distance: a * e,
            periapsis_distance: a * (1.0 - e),
            apoapsis_distance: a * (1.0 + e),
            period: third_law_period(a, mu),
            argument_of_periapsis: w,
            true_anomaly: nu,
            energy,
            angular_momentum: h,
            mu,
        }
    }

    pub fn is_retrograde(&self) -> bool {
        self.angular_momentum < 0.0
    }

    /// Full ellipse area pi a b
    pub fn area(&self) -> f64 {
        PI * self.semi_major_axis * self.semi_minor_axis
    }

    /// p = a (1 - e^2)
    pub fn semi_latus_rectum(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
    }

    /// Mean angular rate 2pi / T
    pub fn mean_motion(&self) -> f64 {
        TAU / self.period
    }

    /// Mean anomaly of the current true anomaly
    pub fn mean_anomaly(&self) -> f64 {
        mean_from_true(self.true_anomaly, self.eccentricity)
    }

    /// Distance from the focus at true anomaly `nu`
    pub fn radius_at(&self, nu: f64) -> f64 {
        self.semi_latus_rectum() / (1.0 + self.eccentricity * nu.cos())
    }

    /// Position relative to the focus at true anomaly `nu`
    pub fn position_at(&self, nu: f64) -> NVec2 {
        from_polar(self.radius_at(nu), self.argument_of_periapsis + nu)
    }

    /// Velocity at true anomaly `nu`, following the direction of travel
    pub fn velocity_at(&self, nu: f64) -> NVec2 {
        let h = (self.mu * self.semi_latus_rectum()).sqrt();
        let scale = self.mu / h;
        // perifocal frame: x toward periapsis
        let perifocal = NVec2::new(-scale * nu.sin(), scale * (self.eccentricity + nu.cos()));
        let (sin_w, cos_w) = self.argument_of_periapsis.sin_cos();
        let v = NVec2::new(
            cos_w * perifocal.x - sin_w * perifocal.y,
            sin_w * perifocal.x + cos_w * perifocal.y,
        );
        if self.is_retrograde() { -v } else { v }
    }

    /// Ellipse centre relative to the focus
    pub fn center(&self) -> NVec2 {
        from_polar(-self.focal_distance, self.argument_of_periapsis)
    }

    pub fn periapsis_position(&self) -> NVec2 {
        self.position_at(0.0)
    }

    pub fn apoapsis_position(&self) -> NVec2 {
        self.position_at(PI)
    }
}
