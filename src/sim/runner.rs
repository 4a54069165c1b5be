use tracing::debug;

use super::integrator::Flight;
use super::outcome::{classify, LaunchResult};
use super::preflight;
use super::state::SimConfig;
use crate::vehicle::{ComponentCatalog, MissionTarget, RocketConfiguration};

// ---------------------------------------------------------------------------
// Full launch simulation
// ---------------------------------------------------------------------------

/// Simulate a launch with an explicit step configuration.
///
/// Total over its inputs: infeasible vehicles, empty configurations and
/// unknown component ids all come back as a `LaunchResult`, never a panic.
pub fn simulate_with(
    config: &RocketConfiguration,
    target: &MissionTarget,
    catalog: &ComponentCatalog,
    sim: &SimConfig,
) -> LaunchResult {
    let stages = config.runtime_stages(catalog);

    let pad = match preflight::check(&stages) {
        Ok(pad) => pad,
        Err(reason) => {
            debug!(%reason, "launch rejected on the pad");
            return LaunchResult::rejected(reason);
        }
    };
    debug!(
        stages = stages.len(),
        mass_kg = pad.total_mass_kg,
        twr = pad.initial_twr,
        "liftoff"
    );

    let record = Flight::new(stages, target.atmosphere_model, sim.clone()).run();
    classify(record, target, pad.initial_twr)
}

/// Simulate with the default 0.5 s step and 600 s cap.
pub fn simulate(
    config: &RocketConfiguration,
    target: &MissionTarget,
    catalog: &ComponentCatalog,
) -> LaunchResult {
    simulate_with(config, target, catalog, &SimConfig::default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
