use serde::{Deserialize, Serialize};
use tracing::warn;

use super::component::ComponentCatalog;

/// Propellant is never burned faster than over this many seconds, however
/// short the listed burn time.
pub const MIN_BURN_TIME: f64 = 60.0;

// ---------------------------------------------------------------------------
// Stage definition (ordered component references)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub component_ids: Vec<String>,
}

impl Stage {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), component_ids: vec![] }
    }

    pub fn component(mut self, id: impl Into<String>) -> Self {
        self.component_ids.push(id.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Runtime state of one stage during a flight
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct StageRuntimeState {
    pub mass_kg: f64,
    pub propellant_kg: f64,
    pub thrust_kn: f64,
    pub burn_time_seconds: f64,
    pub fuel_remaining_kg: f64,
}

impl StageRuntimeState {
    /// Thrust in newtons.
    pub fn thrust_n(&self) -> f64 {
        self.thrust_kn * 1000.0
    }

    /// Propellant consumption, kg/s.
    pub fn burn_rate(&self) -> f64 {
        self.propellant_kg / self.burn_time_seconds.max(MIN_BURN_TIME)
    }

    pub fn has_fuel(&self) -> bool {
        self.fuel_remaining_kg > 0.0
    }

    /// Burn propellant for one step. Returns true when this burn emptied the
    /// stage; the remaining fuel is clamped at zero.
    pub fn burn(&mut self, dt: f64) -> bool {
        self.fuel_remaining_kg -= self.burn_rate() * dt;
        if self.fuel_remaining_kg <= 0.0 {
            self.fuel_remaining_kg = 0.0;
            true
        } else {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Stage aggregator
// ---------------------------------------------------------------------------

/// Reduce a stage's components to its aggregate mass, propellant, thrust and
/// burn time. Engines burn concurrently, so burn time is the longest of them
/// rather than the sum. Ids missing from the catalog contribute nothing.
pub fn aggregate(stage: &Stage, catalog: &ComponentCatalog) -> StageRuntimeState {
    let mut mass_kg = 0.0;
    let mut propellant_kg = 0.0;
    let mut thrust_kn = 0.0;
    let mut burn_time_seconds: f64 = 0.0;

    for id in &stage.component_ids {
        let Some(c) = catalog.get(id) else {
            warn!(stage = %stage.id, component = %id, "unknown component contributes nothing");
            continue;
        };
        mass_kg += c.mass_kg;
        propellant_kg += c.propellant_mass_kg.unwrap_or(0.0);
        thrust_kn += c.thrust_kn.unwrap_or(0.0);
        burn_time_seconds = burn_time_seconds.max(c.burn_time_seconds.unwrap_or(0.0));
    }

    StageRuntimeState {
        mass_kg,
        propellant_kg,
        thrust_kn,
        burn_time_seconds,
        fuel_remaining_kg: propellant_kg,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
