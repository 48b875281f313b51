//! Equal-time sectors for Kepler's second law
//!
//! One period is split into `N` equal spans of mean anomaly. Mean anomaly
//! grows linearly with time, so each span takes the same time and sweeps
//! the same focal area `pi a b / N`. Boundaries are converted to true
//! anomaly through Kepler's equation, so they are unevenly spaced in angle
//! unless the orbit is circular.
//!
//! Sectors are indexed in the order the body visits them, starting at
//! periapsis. For retrograde travel the time-ordered mean anomaly is
//! `2pi - M`; that mapping is the only place the direction flag is used.

use std::f64::consts::{PI, TAU};

use super::ellipse::{true_from_mean, EllipseParameters};
use super::math::{lerp, normalize_angle};
use super::params::MIN_DIVISIONS;
use super::states::NVec2;

/// Slack when comparing mean anomalies against the sweep origin
const SWEEP_EPS: f64 = 1e-9;

/// One equal-time sector of the orbit
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalArea {
    pub start_true_anomaly: f64,
    pub end_true_anomaly: f64,
    pub start_mean_anomaly: f64, // time-ordered, in [0, 2pi)
    pub end_mean_anomaly: f64, // time-ordered, in (0, 2pi]
    pub start_position: NVec2, // world coordinates
    pub end_position: NVec2,
    pub dot_position: NVec2, // position at the sector's mid-time
    pub total_sector_area: f64,
    pub swept_area_so_far: f64,
    pub completion: f64, // swept / total
    pub is_active: bool,
    pub has_been_fully_traversed_this_orbit: bool,
}

impl OrbitalArea {
    /// True when the time-ordered mean anomaly `m` lies in this sector
    pub fn contains_mean_anomaly(&self, m: f64) -> bool {
        m >= self.start_mean_anomaly && m < self.end_mean_anomaly
    }
}

/// Map geometric mean anomaly to time order (and back, the map is its own inverse)
pub fn time_ordered(mean_anomaly: f64, retrograde: bool) -> f64 {
    if retrograde {
        normalize_angle(TAU - mean_anomaly)
    } else {
        normalize_angle(mean_anomaly)
    }
}

/// Splits the current orbit into equal-time sectors and tracks sweep progress
#[derive(Debug, Clone)]
pub struct AreaPartitioner {
    areas: Vec<OrbitalArea>,
    divisions: usize,
    active: Option<usize>,
    traversed: Vec<bool>, // exit boundary crossed this period, by sector
    sweep_origin: f64, // time-ordered anomaly where this period's sweep began
    last_mean_anomaly: Option<f64>,
}

impl AreaPartitioner {
    pub fn new(divisions: usize) -> Self {
        Self {
            areas: Vec::new(),
            divisions: divisions.max(MIN_DIVISIONS),
            active: None,
            traversed: Vec::new(),
            sweep_origin: 0.0,
            last_mean_anomaly: None,
        }
    }

    pub fn divisions(&self) -> usize {
        self.divisions
    }

    pub fn areas(&self) -> &[OrbitalArea] {
        &self.areas
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_area(&self) -> Option<&OrbitalArea> {
        self.active.and_then(|i| self.areas.get(i))
    }

    /// Set the number of sectors. Sweep progress is kept and mapped onto
    /// the new layout on the next `update`.
    pub fn configure(&mut self, divisions: usize) {
        self.divisions = divisions.max(MIN_DIVISIONS);
    }

    /// Forget sweep progress; the next `update` starts a fresh sweep from
    /// wherever the body is
    pub fn reset_progress(&mut self) {
        self.last_mean_anomaly = None;
        self.sweep_origin = 0.0;
        self.traversed.clear();
    }

    /// Drop all sectors and sweep progress (orbit no longer allowed)
    pub fn deactivate(&mut self) {
        self.active = None;
        self.areas.clear();
        self.reset_progress();
    }

    /// Time-ordered sector index containing mean anomaly `m`
    fn index_of(&self, m: f64) -> usize {
        let span = TAU / self.divisions as f64;
        ((m / span).floor() as usize).min(self.divisions - 1)
    }

    /// Rebuild all sectors for `ellipse` and locate the body in them.
    ///
    /// `focus` is the primary's world position. Crossing from the last
    /// sector back into the first starts a new period and clears the
    /// traversal flags.
    pub fn update(&mut self, ellipse: &EllipseParameters, focus: &NVec2, retrograde: bool) {
        let n = self.divisions;
        let span = TAU / n as f64;
        let sector_area = ellipse.area() / n as f64;
        let e = ellipse.eccentricity;

        let m_now = time_ordered(ellipse.mean_anomaly(), retrograde);
        let active = self.index_of(m_now);
        match (self.last_mean_anomaly, self.active) {
            (None, _) => {
                self.sweep_origin = m_now;
                self.traversed = vec![false; n];
            }
            // a forward wrap past periapsis starts a new period
            (Some(prev), _) if prev - m_now > PI => {
                self.sweep_origin = 0.0;
                self.traversed = (0..n).map(|i| i < active).collect();
            }
            // same layout: mark the sectors whose exit boundary was just crossed
            (Some(_), Some(prev_active)) if self.traversed.len() == n => {
                for i in prev_active..active {
                    self.traversed[i] = true;
                }
                for flag in &mut self.traversed[active..] {
                    *flag = false; // backward jitter or an edit moved the body back
                }
                self.sweep_origin = self.sweep_origin.min(m_now);
            }
            // new layout: every boundary between the sweep origin and the body was crossed
            (Some(_), _) => {
                self.sweep_origin = self.sweep_origin.min(m_now);
                let origin = self.sweep_origin;
                self.traversed = (0..n)
                    .map(|i| i < active && (i + 1) as f64 * span > origin + SWEEP_EPS)
                    .collect();
            }
        }
        self.last_mean_anomaly = Some(m_now);
        self.active = Some(active);

        let position_at_time = |m: f64| -> (f64, NVec2) {
            let nu = true_from_mean(time_ordered(m, retrograde), e);
            (nu, focus + ellipse.position_at(nu))
        };

        self.areas.clear();
        for i in 0..n {
            let start_m = i as f64 * span;
            let end_m = (i + 1) as f64 * span;
            let (start_nu, start_position) = position_at_time(start_m);
            let (end_nu, end_position) = position_at_time(end_m);
            let (_, dot_position) = position_at_time(lerp(start_m, end_m, 0.5));

            let traversed = self.traversed[i];
            let (swept, is_active) = if i == active {
                (sector_area * ((m_now - start_m) / span).clamp(0.0, 1.0), true)
            } else if traversed {
                (sector_area, false)
            } else {
                (0.0, false)
            };

            self.areas.push(OrbitalArea {
                start_true_anomaly: start_nu,
                end_true_anomaly: end_nu,
                start_mean_anomaly: start_m,
                end_mean_anomaly: end_m,
                start_position,
                end_position,
                dot_position,
                total_sector_area: sector_area,
                swept_area_so_far: swept,
                completion: if sector_area > 0.0 { swept / sector_area } else { 0.0 },
                is_active,
                has_been_fully_traversed_this_orbit: traversed,
            });
        }
    }
}
