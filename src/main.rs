use keplersim::{bench_partition, bench_step};
use keplersim::{EllipticalOrbitEngine, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file name inside the crate's `scenarios/` directory
    #[arg(short, default_value = "kepler_default.yaml")]
    file_name: String,

    /// Number of engine steps to run
    #[arg(long, default_value_t = 2_000)]
    steps: usize,

    /// Simulation time per step
    #[arg(long, default_value_t = 0.01)]
    dt: f64,

    /// Override the scenario's division count
    #[arg(long)]
    divisions: Option<usize>,

    /// Log derived quantities every this many steps
    #[arg(long, default_value_t = 100)]
    report_every: usize,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn report(engine: &EllipticalOrbitEngine, step: usize) {
    match engine.ellipse() {
        Some(el) => info!(
            step,
            t = engine.time(),
            a = el.semi_major_axis,
            e = el.eccentricity,
            period = el.period,
            nu = el.true_anomaly,
            active = ?engine.active_area_index(),
            "orbit"
        ),
        None => info!(step, t = engine.time(), status = ?engine.status(), "orbit not allowed"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if args.bench {
        bench_step();
        bench_partition();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut engine = EllipticalOrbitEngine::from_scenario(scenario_cfg)?;
    if let Some(n) = args.divisions {
        engine.configure_divisions(n);
    }

    let notifications = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&notifications);
    engine.add_listener(move || counter.set(counter.get() + 1));

    let every = args.report_every.max(1);
    for step in 0..args.steps {
        engine.step(args.dt);
        if step % every == 0 {
            report(&engine, step);
        }
    }

    for (i, area) in engine.orbital_areas().iter().enumerate() {
        info!(
            sector = i,
            area = area.total_sector_area,
            swept = area.swept_area_so_far,
            active = area.is_active,
            traversed = area.has_been_fully_traversed_this_orbit,
            "orbital area"
        );
    }
    info!(notifications = notifications.get(), status = ?engine.status(), "done");

    Ok(())
}
