use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::{FlightProfileSample, StagingEvent};
use super::integrator::FlightRecord;
use super::staging::FlightPhase;
use super::state::{orbit_velocity, BARELY_OFF_GROUND_KM, KARMAN_LINE_KM, ORBIT_ALTITUDE_KM};
use crate::vehicle::MissionTarget;

// ---------------------------------------------------------------------------
// Failure taxonomy
// ---------------------------------------------------------------------------

/// Why a launch did not meet its target. Kept as data; the human-readable
/// wording lives only in the `Display` impl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    NoThrust,
    InsufficientTwr { value: f64 },
    BarelyOffGround { altitude_km: f64 },
    BelowSpace { altitude_km: f64 },
    SpaceButNoOrbit,
    BelowTarget { altitude_km: f64, target_km: f64 },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoThrust => {
                write!(f, "No engines or fuel! Add at least one engine and a fuel tank.")
            }
            FailureReason::InsufficientTwr { value } => write!(
                f,
                "Thrust-to-weight ratio too low ({:.2}). Need TWR > 1 to lift off.",
                value
            ),
            FailureReason::BarelyOffGround { altitude_km } => write!(
                f,
                "Rocket barely left the ground ({:.2} km). Add more thrust or fuel.",
                altitude_km
            ),
            FailureReason::BelowSpace { altitude_km } => write!(
                f,
                "Reached {:.1} km but did not clear the {:.0} km space boundary.",
                altitude_km, KARMAN_LINE_KM
            ),
            FailureReason::SpaceButNoOrbit => {
                write!(f, "Reached space but had insufficient delta-v for orbit.")
            }
            FailureReason::BelowTarget { altitude_km, target_km } => write!(
                f,
                "Reached {:.1} km, target was {:.1} km.",
                altitude_km, target_km
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Launch result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchResult {
    pub success: bool,
    pub max_altitude_km: f64,
    pub reached_orbit: bool,
    pub reached_space: bool,
    pub staging_events: Vec<StagingEvent>,
    pub flight_profile: Vec<FlightProfileSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<FailureReason>,
    /// Absent when the vehicle had no thrust to compare against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_twr: Option<f64>,
    pub final_velocity_ms: f64,
    pub flight_time_s: f64,
    /// Time at which `max_altitude_km` was reached, s.
    #[serde(default)]
    pub max_altitude_time_s: f64,
    /// How the flight ended; absent when the launch never left the pad check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_phase: Option<FlightPhase>,
}

impl LaunchResult {
    /// Result for a launch rejected before any integration.
    pub fn rejected(reason: FailureReason) -> Self {
        let initial_twr = match reason {
            FailureReason::InsufficientTwr { value } => Some(value),
            _ => None,
        };
        Self {
            success: false,
            max_altitude_km: 0.0,
            reached_orbit: false,
            reached_space: false,
            staging_events: vec![],
            flight_profile: vec![],
            failure_reason: Some(reason),
            initial_twr,
            final_velocity_ms: 0.0,
            flight_time_s: 0.0,
            max_altitude_time_s: 0.0,
            terminal_phase: None,
        }
    }

    pub fn failure_message(&self) -> Option<String> {
        self.failure_reason.as_ref().map(ToString::to_string)
    }
}

// ---------------------------------------------------------------------------
// Outcome classifier
// ---------------------------------------------------------------------------

/// Judge a finished flight against its mission target.
pub fn classify(record: FlightRecord, target: &MissionTarget, initial_twr: f64) -> LaunchResult {
    let state = &record.final_state;
    let max_altitude_km = state.max_altitude_m / 1000.0;
    let final_velocity = state.velocity_ms;

    let reached_orbit = max_altitude_km >= ORBIT_ALTITUDE_KM && final_velocity >= orbit_velocity();
    let reached_space = max_altitude_km >= KARMAN_LINE_KM;

    let success = if target.target_orbit {
        reached_orbit
    } else {
        max_altitude_km >= target.target_altitude_km
    };

    let failure_reason = if success {
        None
    } else if max_altitude_km < BARELY_OFF_GROUND_KM {
        Some(FailureReason::BarelyOffGround { altitude_km: max_altitude_km })
    } else if max_altitude_km < KARMAN_LINE_KM {
        Some(FailureReason::BelowSpace { altitude_km: max_altitude_km })
    } else if target.target_orbit && !reached_orbit {
        Some(FailureReason::SpaceButNoOrbit)
    } else {
        Some(FailureReason::BelowTarget {
            altitude_km: max_altitude_km,
            target_km: target.target_altitude_km,
        })
    };

    LaunchResult {
        success,
        max_altitude_km,
        reached_orbit,
        reached_space,
        staging_events: record.staging_events,
        flight_profile: record.flight_profile,
        failure_reason,
        initial_twr: Some(initial_twr),
        final_velocity_ms: final_velocity,
        flight_time_s: state.time_s,
        max_altitude_time_s: state.max_altitude_time_s,
        terminal_phase: Some(record.terminal_phase),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
