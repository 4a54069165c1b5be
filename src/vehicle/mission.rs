use serde::{Deserialize, Serialize};

use super::component::ComponentCatalog;
use super::stage::{aggregate, Stage, StageRuntimeState};
use crate::error::ConfigError;
use crate::physics::atmosphere::AtmosphereModel;

// ---------------------------------------------------------------------------
// Rocket configuration: ordered sequence of stages
// ---------------------------------------------------------------------------

/// Stage 0 is the top of the stack and burns last; the highest index is the
/// bottom stage and burns first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RocketConfiguration {
    pub stages: Vec<Stage>,
}

impl RocketConfiguration {
    /// Index of the first-burning stage, if any.
    pub fn bottom_stage(&self) -> Option<usize> {
        self.stages.len().checked_sub(1)
    }

    /// Aggregate every stage against the catalog, in configuration order.
    pub fn runtime_stages(&self, catalog: &ComponentCatalog) -> Vec<StageRuntimeState> {
        self.stages.iter().map(|s| aggregate(s, catalog)).collect()
    }

    /// Build-time check: every referenced id resolves and every quantity is
    /// finite and non-negative. `simulate` itself never requires this.
    pub fn validate(&self, catalog: &ComponentCatalog) -> Result<(), ConfigError> {
        for stage in &self.stages {
            for id in &stage.component_ids {
                let component = catalog.get(id).ok_or_else(|| ConfigError::UnknownComponent {
                    stage: stage.id.clone(),
                    component: id.clone(),
                })?;
                for (field, value) in component.quantities() {
                    match value {
                        Some(v) if !v.is_finite() || v < 0.0 => {
                            return Err(ConfigError::InvalidQuantity {
                                component: component.id.clone(),
                                field,
                                value: v,
                            });
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Configuration builder
// ---------------------------------------------------------------------------

/// Stacks stages from the bottom up: the first stage added is the one that
/// burns first, so it ends up at the highest index.
pub struct ConfigurationBuilder {
    bottom_up: Vec<Stage>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self { bottom_up: vec![] }
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.bottom_up.push(stage);
        self
    }

    pub fn build(self) -> RocketConfiguration {
        let mut stages = self.bottom_up;
        stages.reverse();
        RocketConfiguration { stages }
    }
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Mission target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionTarget {
    pub target_altitude_km: f64,
    #[serde(default)]
    pub target_orbit: bool,
    #[serde(default)]
    pub atmosphere_model: AtmosphereModel,
}

impl MissionTarget {
    pub fn altitude(km: f64) -> Self {
        Self {
            target_altitude_km: km,
            target_orbit: false,
            atmosphere_model: AtmosphereModel::Simple,
        }
    }

    pub fn orbit() -> Self {
        Self {
            target_altitude_km: crate::sim::state::ORBIT_ALTITUDE_KM,
            target_orbit: true,
            atmosphere_model: AtmosphereModel::Simple,
        }
    }

    pub fn with_atmosphere(mut self, model: AtmosphereModel) -> Self {
        self.atmosphere_model = model;
        self
    }
}

impl Default for MissionTarget {
    fn default() -> Self {
        Self::altitude(crate::sim::state::KARMAN_LINE_KM)
    }
}

// ---------------------------------------------------------------------------
// Preset parts and vehicles
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;
    use crate::vehicle::component::{Component, ComponentKind};

    /// A small parts bin covering every component kind.
    pub fn starter_catalog() -> ComponentCatalog {
        ComponentCatalog::new()
            .with(Component::new("capsule", ComponentKind::Capsule, 1000.0))
            .with(Component::new("cubesat", ComponentKind::Payload, 50.0))
            .with(Component::new("fairing", ComponentKind::Fairing, 250.0))
            .with(Component::new("fins", ComponentKind::Fins, 500.0))
            .with(
                Component::new("small-tank", ComponentKind::FuelTank, 700.0)
                    .propellant(1000.0)
                    .burn_time(60.0),
            )
            .with(
                Component::new("standard-tank", ComponentKind::FuelTank, 2500.0)
                    .propellant(2000.0)
                    .burn_time(120.0),
            )
            .with(
                Component::new("large-tank", ComponentKind::FuelTank, 6000.0)
                    .propellant(4000.0)
                    .burn_time(60.0),
            )
            .with(
                Component::new("vacuum-engine", ComponentKind::Engine, 300.0)
                    .thrust(100.0)
                    .isp(340.0),
            )
            .with(
                Component::new("main-engine", ComponentKind::Engine, 500.0)
                    .thrust(500.0)
                    .isp(300.0),
            )
            .with(
                Component::new("lifter-engine", ComponentKind::Engine, 1000.0)
                    .thrust(200.0)
                    .isp(280.0),
            )
            .with(
                Component::new("srb", ComponentKind::Booster, 3000.0)
                    .thrust(300.0)
                    .isp(250.0)
                    .propellant(2000.0)
                    .burn_time(60.0),
            )
    }

    /// Single stage: capsule on a standard tank and one main engine.
    pub fn pathfinder() -> RocketConfiguration {
        ConfigurationBuilder::new()
            .stage(
                Stage::new("core")
                    .component("capsule")
                    .component("standard-tank")
                    .component("main-engine"),
            )
            .build()
    }

    /// Two stages: a finned lifter under a small vacuum upper stage.
    pub fn skylark() -> RocketConfiguration {
        ConfigurationBuilder::new()
            .stage(
                Stage::new("lifter")
                    .component("large-tank")
                    .component("lifter-engine")
                    .component("fins"),
            )
            .stage(
                Stage::new("upper")
                    .component("capsule")
                    .component("small-tank")
                    .component("vacuum-engine"),
            )
            .build()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
