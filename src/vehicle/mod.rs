pub mod component;
pub mod stage;
pub mod mission;

pub use component::{Component, ComponentCatalog, ComponentKind};
pub use stage::{aggregate, Stage, StageRuntimeState};
pub use mission::{presets, ConfigurationBuilder, MissionTarget, RocketConfiguration};
