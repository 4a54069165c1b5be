//! Deterministic vertical ascent simulator for student-built multi-stage
//! rockets.
//!
//! Stages are reduced from catalog components, checked for liftoff, flown with
//! a fixed 0.5 s Euler step under thrust, gravity and drag, dropped as their
//! propellant runs out, and the flight is judged against a mission target.
//! [`simulate`] is a pure function: the same inputs always give the same
//! [`LaunchResult`].

pub mod error;
pub mod physics;
pub mod vehicle;
pub mod sim;
pub mod io;

pub use error::{ConfigError, ScenarioError};
pub use physics::AtmosphereModel;
pub use sim::{simulate, simulate_with, FailureReason, LaunchResult, SimConfig};
pub use vehicle::{Component, ComponentCatalog, ComponentKind, MissionTarget, RocketConfiguration, Stage};
