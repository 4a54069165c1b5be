pub mod state;
pub mod event;
pub mod staging;
pub mod preflight;
pub mod integrator;
pub mod outcome;
pub mod runner;

pub use event::{FlightProfileSample, StagingEvent};
pub use integrator::{Flight, FlightRecord};
pub use outcome::{FailureReason, LaunchResult};
pub use runner::{simulate, simulate_with};
pub use staging::FlightPhase;
pub use state::{SimConfig, SimulationState};
