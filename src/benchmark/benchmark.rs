use std::time::Instant;

use crate::configuration::config::IntegratorConfig;
use crate::simulation::areas::AreaPartitioner;
use crate::simulation::ellipse::derive_ellipse;
use crate::simulation::engine::{EllipticalOrbitEngine, EngineSettings};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

/// Helper to build the default star/planet pair
fn make_bodies() -> (Body, Body) {
    let star = Body::new(NVec2::zeros(), NVec2::zeros(), 200.0, 20.0);
    let planet = Body::new(NVec2::new(200.0, 0.0), NVec2::new(0.0, 100.0), 10.0, 5.0);
    (star, planet)
}

/// Time engine.step for both integrators over a range of sub-step counts
/// Paste output directly into a spreadsheet to graph
pub fn bench_step() {
    println!("substeps,verlet_us,leapfrog_us");

    let steps = 2_000;
    for substeps in [1, 5, 10, 20, 50, 100] {
        let mut per_step = [0.0; 2];

        for (slot, integrator) in [IntegratorConfig::Verlet, IntegratorConfig::Leapfrog].into_iter().enumerate() {
            let (star, planet) = make_bodies();
            let settings = EngineSettings {
                integrator,
                substeps,
                ..EngineSettings::default()
            };
            let mut engine = EllipticalOrbitEngine::new(star, planet, Parameters::default(), settings);

            // Warm-up
            engine.step(0.01);

            let t0 = Instant::now();
            for _ in 0..steps {
                engine.step(0.01);
            }
            per_step[slot] = t0.elapsed().as_secs_f64() * 1e6 / steps as f64; // us per step
        }

        println!("{},{:.3},{:.3}", substeps, per_step[0], per_step[1]);
    }
}

/// Time one partitioner rebuild for every allowed division count
pub fn bench_partition() {
    let params = Parameters::default();
    let (star, planet) = make_bodies();
    let mu = params.G * (star.m + planet.m);
    let Some(ellipse) = derive_ellipse(&(planet.x - star.x), &(planet.v - star.v), mu, params.eccentricity_tolerance) else {
        println!("default orbit is unbound, nothing to partition");
        return;
    };

    let repeats = 10_000;
    for n in params.clamp_divisions(0)..=params.max_divisions {
        let mut partitioner = AreaPartitioner::new(n);

        let t0 = Instant::now();
        for _ in 0..repeats {
            partitioner.update(&ellipse, &star.x, false);
        }
        let us = t0.elapsed().as_secs_f64() * 1e6 / repeats as f64;

        println!("N = {n:2}, update = {us:8.3} us");
    }
}
