//! Elliptical orbit engine
//!
//! Owns the two bodies and runs, once per `step`:
//! integrator -> ellipse solver -> area partitioner -> "changed" notification.
//!
//! Inputs are never rejected: bad values are clamped and logged so the
//! caller always has something renderable. Axis-derived quantities are only
//! meaningful while `allowed_orbit()` is true; the accessors return `None`
//! otherwise.
//!
//! The engine does not clamp edits against `escape_speed`/`escape_radius`.
//! Callers query those first and apply their own policy.

use tracing::{debug, info, warn};

use crate::configuration::config::IntegratorConfig;
use crate::simulation::areas::{AreaPartitioner, OrbitalArea};
use crate::simulation::ellipse::{circular_ellipse, derive_ellipse, third_law_period, EllipseParameters};
use crate::simulation::emitter::{ChangeEmitter, ListenerId};
use crate::simulation::forces::{AccelSet, CentralGravity};
use crate::simulation::integrator::{classify, leapfrog_integrator, verlet_integrator};
use crate::simulation::math::{cross, finite_or, perpendicular};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyRole, NVec2, OrbitStatus, OrbitalState};

/// High-level runtime settings for the engine
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub integrator: IntegratorConfig, // verlet or leapfrog
    pub substeps: usize, // integrator steps per engine step
    pub divisions: usize, // initial number of equal-time sectors
    pub always_circular: bool, // force e = 0
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::Verlet,
            substeps: 20,
            divisions: 4,
            always_circular: false,
        }
    }
}

pub struct EllipticalOrbitEngine {
    settings: EngineSettings,
    parameters: Parameters,
    primary: Body,
    secondary: Body,
    defaults: (Body, Body), // restored by reset_orbit
    state: OrbitalState,
    forces: AccelSet,
    ellipse: Option<EllipseParameters>,
    partitioner: AreaPartitioner,
    status: OrbitStatus,
    emitter: ChangeEmitter,
}

impl EllipticalOrbitEngine {
    pub fn new(primary: Body, secondary: Body, parameters: Parameters, settings: EngineSettings) -> Self {
        let mut settings = settings;
        if settings.substeps == 0 {
            warn!("substeps must be at least 1, using 1");
            settings.substeps = 1;
        }

        let divisions = parameters.clamp_divisions(settings.divisions);
        if divisions != settings.divisions {
            warn!(requested = settings.divisions, divisions, "division count clamped");
        }

        let primary = sanitize_body(primary, &parameters);
        let secondary = sanitize_body(secondary, &parameters);
        let state = OrbitalState::from_bodies(&primary, &secondary, parameters.G, 0.0);
        let forces = AccelSet::new().with(CentralGravity { eps2: parameters.eps2 });

        let mut engine = Self {
            settings,
            parameters,
            defaults: (primary.clone(), secondary.clone()),
            primary,
            secondary,
            state,
            forces,
            ellipse: None,
            partitioner: AreaPartitioner::new(divisions),
            status: OrbitStatus::Stable,
            emitter: ChangeEmitter::new(),
        };
        if engine.settings.always_circular {
            engine.snap_to_circular();
        }
        engine.rebuild_state();
        engine.status = classify(&engine.state, engine.contact_distance());
        engine.refresh();
        engine
    }

    // =====================================================================
    // operations
    // =====================================================================

    /// Advance the orbit by `dt` simulation time units and notify listeners.
    ///
    /// `dt` is split into `substeps` equal integrator steps. A collided
    /// orbit does not move; an unbound one keeps flying away.
    pub fn step(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            warn!(dt, "ignoring non-positive or non-finite time step");
            return;
        }
        if self.status == OrbitStatus::Collided {
            return;
        }

        let contact = self.contact_distance();
        let h = dt / self.settings.substeps as f64;
        for _ in 0..self.settings.substeps {
            match self.settings.integrator {
                IntegratorConfig::Verlet => verlet_integrator(&mut self.state, &self.forces, h),
                IntegratorConfig::Leapfrog => leapfrog_integrator(&mut self.state, &self.forces, h),
            }

            if self.status == OrbitStatus::Stable {
                let next = classify(&self.state, contact);
                if next != OrbitStatus::Stable {
                    self.transition(next);
                }
            }
            if self.status == OrbitStatus::Collided {
                break;
            }
        }

        self.sync_secondary();
        self.refresh();
        self.emitter.emit();
    }

    /// Restore both bodies to their initial configuration
    pub fn reset_orbit(&mut self) {
        let (primary, secondary) = self.defaults.clone();
        self.primary = primary;
        self.secondary = secondary;
        if self.settings.always_circular {
            self.snap_to_circular();
        }
        self.state = OrbitalState::from_bodies(&self.primary, &self.secondary, self.parameters.G, 0.0);
        self.status = classify(&self.state, self.contact_distance());
        self.partitioner.reset_progress();
        self.refresh();
        info!(status = ?self.status, "orbit reset");
        self.emitter.emit();
    }

    /// Split the orbit into `n` equal-time sectors (clamped to the allowed range)
    pub fn configure_divisions(&mut self, n: usize) {
        let divisions = self.parameters.clamp_divisions(n);
        if divisions != n {
            warn!(requested = n, divisions, "division count clamped");
        }
        self.partitioner.configure(divisions);
        self.refresh();
        info!(divisions, "orbital areas repartitioned");
        self.emitter.emit();
    }

    /// Set a body's mass. `mu` changes immediately with no energy correction.
    pub fn set_mass(&mut self, role: BodyRole, m: f64) {
        let current = self.body(role).m;
        let m = if !m.is_finite() {
            warn!(mass = m, "non-finite mass ignored");
            current
        } else if m < self.parameters.min_mass {
            warn!(mass = m, min = self.parameters.min_mass, "mass clamped");
            self.parameters.min_mass
        } else {
            m
        };
        self.body_mut(role).m = m;
        self.apply_edit();
    }

    /// Move a body; non-finite components keep their previous value
    pub fn set_position(&mut self, role: BodyRole, x: NVec2) {
        let current = self.body(role).x;
        if !(x.x.is_finite() && x.y.is_finite()) {
            warn!(?role, "non-finite position component ignored");
        }
        self.body_mut(role).x = finite_or(x, &current);
        self.apply_edit();
    }

    /// Set a body's velocity; non-finite components keep their previous value
    pub fn set_velocity(&mut self, role: BodyRole, v: NVec2) {
        let current = self.body(role).v;
        if !(v.x.is_finite() && v.y.is_finite()) {
            warn!(?role, "non-finite velocity component ignored");
        }
        self.body_mut(role).v = finite_or(v, &current);
        self.apply_edit();
    }

    /// Force circular orbits. Turning it on snaps the secondary's velocity
    /// to the circular speed for its current radius.
    pub fn set_always_circular(&mut self, on: bool) {
        self.settings.always_circular = on;
        self.apply_edit();
    }

    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() + 'static,
    {
        self.emitter.add_listener(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.emitter.remove_listener(id)
    }

    /// Kepler's third law for the current `mu` and an arbitrary axis
    pub fn third_law(&self, semi_major_axis: f64) -> f64 {
        third_law_period(semi_major_axis, self.state.mu)
    }

    // =====================================================================
    // read accessors
    // =====================================================================

    pub fn primary(&self) -> &Body {
        &self.primary
    }

    pub fn secondary(&self) -> &Body {
        &self.secondary
    }

    pub fn body(&self, role: BodyRole) -> &Body {
        match role {
            BodyRole::Primary => &self.primary,
            BodyRole::Secondary => &self.secondary,
        }
    }

    pub fn orbital_state(&self) -> &OrbitalState {
        &self.state
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn status(&self) -> OrbitStatus {
        self.status
    }

    /// False when unbound, collided, or the shape could not be derived
    pub fn allowed_orbit(&self) -> bool {
        self.status.is_allowed() && self.ellipse.is_some()
    }

    pub fn retrograde(&self) -> bool {
        self.state.is_retrograde()
    }

    pub fn time(&self) -> f64 {
        self.state.t
    }

    pub fn specific_energy(&self) -> f64 {
        self.state.specific_energy()
    }

    pub fn angular_momentum(&self) -> f64 {
        self.state.angular_momentum()
    }

    /// Current ellipse, only while the orbit is allowed
    pub fn ellipse(&self) -> Option<&EllipseParameters> {
        if self.status.is_allowed() { self.ellipse.as_ref() } else { None }
    }

    pub fn semi_major_axis(&self) -> Option<f64> {
        self.ellipse().map(|el| el.semi_major_axis)
    }

    pub fn semi_minor_axis(&self) -> Option<f64> {
        self.ellipse().map(|el| el.semi_minor_axis)
    }

    pub fn eccentricity(&self) -> Option<f64> {
        self.ellipse().map(|el| el.eccentricity)
    }

    pub fn focal_distance(&self) -> Option<f64> {
        self.ellipse().map(|el| el.focal_distance)
    }

    pub fn period(&self) -> Option<f64> {
        self.ellipse().map(|el| el.period)
    }

    pub fn true_anomaly(&self) -> Option<f64> {
        self.ellipse().map(|el| el.true_anomaly)
    }

    /// Both foci in world coordinates; the first is the primary
    pub fn foci(&self) -> Option<(NVec2, NVec2)> {
        self.ellipse()
            .map(|el| (self.primary.x, self.primary.x + 2.0 * el.center()))
    }

    /// Equal-time sectors of the current orbit; empty while the orbit is not allowed
    pub fn orbital_areas(&self) -> &[OrbitalArea] {
        self.partitioner.areas()
    }

    pub fn active_area_index(&self) -> Option<usize> {
        self.partitioner.active_index()
    }

    pub fn divisions(&self) -> usize {
        self.partitioner.divisions()
    }

    /// Speed needed to escape from the current separation: sqrt(2 mu / r)
    pub fn escape_speed(&self) -> f64 {
        let r = self.state.radius();
        if r > 0.0 { (2.0 * self.state.mu / r).sqrt() } else { f64::INFINITY }
    }

    /// Separation at which the current speed becomes escape speed: 2 mu / v^2
    pub fn escape_radius(&self) -> f64 {
        let v2 = self.state.velocity.norm_squared();
        if v2 > 0.0 { 2.0 * self.state.mu / v2 } else { f64::INFINITY }
    }

    // =====================================================================
    // internals
    // =====================================================================

    fn body_mut(&mut self, role: BodyRole) -> &mut Body {
        match role {
            BodyRole::Primary => &mut self.primary,
            BodyRole::Secondary => &mut self.secondary,
        }
    }

    fn contact_distance(&self) -> f64 {
        self.primary.radius + self.secondary.radius
    }

    fn rebuild_state(&mut self) {
        self.state = OrbitalState::from_bodies(&self.primary, &self.secondary, self.parameters.G, self.state.t);
    }

    fn sync_secondary(&mut self) {
        self.secondary.x = self.primary.x + self.state.position;
        self.secondary.v = self.primary.v + self.state.velocity;
    }

    fn transition(&mut self, next: OrbitStatus) {
        info!(from = ?self.status, to = ?next, t = self.state.t, "orbit status changed");
        self.status = next;
    }

    /// Set the secondary's velocity to circular speed, keeping its direction of travel
    fn snap_to_circular(&mut self) {
        let rel = self.secondary.x - self.primary.x;
        let r = rel.norm();
        if r <= 0.0 {
            return;
        }
        let mu = self.parameters.G * (self.primary.m + self.secondary.m);
        let sign = if cross(&rel, &(self.secondary.v - self.primary.v)) < 0.0 { -1.0 } else { 1.0 };
        self.secondary.v = self.primary.v + sign * (mu / r).sqrt() * perpendicular(&rel) / r;
    }

    /// Re-derive everything after a user edit
    fn apply_edit(&mut self) {
        if self.settings.always_circular {
            self.snap_to_circular();
        }
        self.rebuild_state();
        if self.status != OrbitStatus::Collided {
            let next = classify(&self.state, self.contact_distance());
            if next != self.status {
                self.transition(next);
            }
        }
        self.refresh();
        debug!(
            energy = self.state.specific_energy(),
            h = self.state.angular_momentum(),
            allowed = self.allowed_orbit(),
            "orbit re-derived after edit"
        );
        self.emitter.emit();
    }

    /// Recompute the ellipse and the sectors from the current state
    fn refresh(&mut self) {
        self.ellipse = if self.settings.always_circular {
            circular_ellipse(&self.state.position, self.state.angular_momentum(), self.state.mu)
        } else {
            derive_ellipse(
                &self.state.position,
                &self.state.velocity,
                self.state.mu,
                self.parameters.eccentricity_tolerance,
            )
        };

        match (&self.ellipse, self.status) {
            (Some(ellipse), OrbitStatus::Stable) => {
                debug_assert!(
                    {
                        let (a, b, c) = (ellipse.semi_major_axis, ellipse.semi_minor_axis, ellipse.focal_distance);
                        (c * c - (a * a - b * b)).abs() <= 1e-9 * a * a
                    },
                    "ellipse invariant c^2 = a^2 - b^2 violated"
                );
                self.partitioner.update(ellipse, &self.primary.x, self.state.is_retrograde());
            }
            _ => self.partitioner.deactivate(),
        }
    }
}

/// Clamp a configured body into a usable one
fn sanitize_body(mut body: Body, parameters: &Parameters) -> Body {
    if !body.m.is_finite() || body.m < parameters.min_mass {
        warn!(mass = body.m, "body mass clamped");
        body.m = parameters.min_mass;
    }
    body.x = finite_or(body.x, &NVec2::zeros());
    body.v = finite_or(body.v, &NVec2::zeros());
    if !body.radius.is_finite() || body.radius < 0.0 {
        body.radius = 0.0;
    }
    body
}
