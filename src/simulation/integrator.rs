//! Fixed-step symplectic integrators for the relative orbit
//!
//! Provides a velocity-Verlet (kick-drift-kick) and a single-evaluation
//! leapfrog (drift-kick-drift), both driven by `AccelSet`, plus the
//! post-step collision/escape check

use super::forces::AccelSet;
use super::states::{OrbitalState, OrbitStatus};

/// Advance the relative state by one step using velocity-Verlet
/// Uses two force evaluations and updates position, velocity and `state.t` in place
pub fn verlet_integrator(state: &mut OrbitalState, forces: &AccelSet, dt: f64) {
    let half_dt = 0.5 * dt; // half step dt/2

    // a_n from x_n at time t_n
    let a_old = forces.accumulate_accel(state.t, state, &state.position);

    // Kick: v_n+1/2 = v_n + (dt/2) * a_n
    state.velocity += half_dt * a_old;

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    state.position += dt * state.velocity;

    // t_n+1 = t_n + dt
    state.t += dt;

    // a_n+1 from x_n+1
    let a_new = forces.accumulate_accel(state.t, state, &state.position);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    state.velocity += half_dt * a_new;
}

/// Advance the relative state by one step using a single-force-eval leapfrog
pub fn leapfrog_integrator(state: &mut OrbitalState, forces: &AccelSet, dt: f64) {
    let half_dt = 0.5 * dt;

    // Drift: x_half = x_n + (dt/2) * v_n
    state.position += half_dt * state.velocity;

    let t_mid = state.t + half_dt;

    // Kick: v_n+1 = v_n + dt * a(x_half)
    let a_mid = forces.accumulate_accel(t_mid, state, &state.position);
    state.velocity += dt * a_mid;

    // Second drift: x_n+1 = x_half + (dt/2) * v_n+1
    state.position += half_dt * state.velocity;

    state.t += dt;
}

/// Classify a state after a step
///
/// - `Collided` when the separation is below `contact_distance` (sum of radii)
/// - `Unbound` when v^2 >= 2 mu / r, i.e. the specific energy is non-negative
/// - `Stable` otherwise
pub fn classify(state: &OrbitalState, contact_distance: f64) -> OrbitStatus {
    let r = state.radius();
    if r < contact_distance || r == 0.0 {
        return OrbitStatus::Collided;
    }
    if state.velocity.norm_squared() >= 2.0 * state.mu / r {
        return OrbitStatus::Unbound;
    }
    OrbitStatus::Stable
}
