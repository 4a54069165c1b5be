use super::outcome::FailureReason;
use super::state::G;
use crate::vehicle::StageRuntimeState;

/// Numbers established on the pad before the first integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preflight {
    pub total_mass_kg: f64,
    pub initial_twr: f64,
}

/// Launch feasibility check.
///
/// Rejects a vehicle with no mass or a thrustless bottom stage, then one whose
/// bottom stage cannot lift the whole stack (TWR below 1).
pub fn check(stages: &[StageRuntimeState]) -> Result<Preflight, FailureReason> {
    let total_mass_kg: f64 = stages.iter().map(|s| s.mass_kg).sum();
    let bottom_thrust_kn = stages.last().map_or(0.0, |s| s.thrust_kn);

    if total_mass_kg == 0.0 || bottom_thrust_kn == 0.0 {
        return Err(FailureReason::NoThrust);
    }

    let initial_twr = bottom_thrust_kn * 1000.0 / (total_mass_kg * G);
    if initial_twr.is_nan() || initial_twr < 1.0 {
        return Err(FailureReason::InsufficientTwr { value: initial_twr });
    }

    Ok(Preflight { total_mass_kg, initial_twr })
}
