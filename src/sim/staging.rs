use serde::{Deserialize, Serialize};
use tracing::debug;

use super::event::StagingEvent;
use super::state::SimulationState;
use crate::vehicle::StageRuntimeState;

// ---------------------------------------------------------------------------
// Flight phases
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum FlightPhase {
    /// Powered (or waiting to burn) on the given stage.
    Ascending { stage_index: usize },
    /// Last stage is dry. Thrust stays at zero but the vehicle keeps coasting.
    EngineCutoff,
    GroundImpact,
    OrbitReached,
    TimeExpired,
}

impl FlightPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FlightPhase::GroundImpact | FlightPhase::OrbitReached | FlightPhase::TimeExpired
        )
    }

    pub fn engine_lit(self) -> bool {
        matches!(self, FlightPhase::Ascending { .. })
    }
}

// ---------------------------------------------------------------------------
// Stage separation logic
// ---------------------------------------------------------------------------

/// What happened when the active stage ran dry.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Separated(StagingEvent),
    Cutoff,
}

impl Transition {
    pub fn next_phase(&self, state: &SimulationState) -> FlightPhase {
        match self {
            Transition::Separated(_) => FlightPhase::Ascending {
                stage_index: state.current_stage_index,
            },
            Transition::Cutoff => FlightPhase::EngineCutoff,
        }
    }
}

/// Handle fuel exhaustion of the active stage.
///
/// Below the top of the stack the spent stage is dropped: its mass leaves the
/// vehicle and the next stage up becomes active. At the top (or when nothing
/// with mass would remain aboard) the engine cuts off instead.
pub fn on_stage_exhausted(
    state: &mut SimulationState,
    stages: &[StageRuntimeState],
) -> Transition {
    let idx = state.current_stage_index;
    let dropped_mass = stages.get(idx).map_or(0.0, |s| s.mass_kg);

    if idx == 0 || state.total_mass_kg - dropped_mass <= 0.0 {
        debug!(t = state.time_s, alt_m = state.altitude_m, "engine cutoff");
        return Transition::Cutoff;
    }

    let event = StagingEvent {
        time_seconds: state.time_s,
        altitude_km: state.altitude_km(),
        stage_dropped: stages.len() - idx,
    };
    state.total_mass_kg -= dropped_mass;
    state.current_stage_index = idx - 1;
    debug!(
        t = event.time_seconds,
        alt_km = event.altitude_km,
        stage = event.stage_dropped,
        remaining_kg = state.total_mass_kg,
        "stage separation"
    );
    Transition::Separated(event)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(mass_kg: f64) -> StageRuntimeState {
        StageRuntimeState {
            mass_kg,
            propellant_kg: 0.0,
            thrust_kn: 0.0,
            burn_time_seconds: 0.0,
            fuel_remaining_kg: 0.0,
        }
    }

    #[test]
    fn separation_drops_exactly_the_stage_mass() {
        let stages = vec![stage(2_000.0), stage(500.0), stage(7_500.0)];
        let mut s = SimulationState::on_pad(10_000.0, 2);
        s.time_s = 42.0;
        s.altitude_m = 12_500.0;

        let t = on_stage_exhausted(&mut s, &stages);
        assert_eq!(
            t,
            Transition::Separated(StagingEvent {
                time_seconds: 42.0,
                altitude_km: 12.5,
                stage_dropped: 1,
            })
        );
        assert_eq!(s.total_mass_kg, 2_500.0);
        assert_eq!(s.current_stage_index, 1);
        assert_eq!(t.next_phase(&s), FlightPhase::Ascending { stage_index: 1 });

        let t = on_stage_exhausted(&mut s, &stages);
        assert!(matches!(t, Transition::Separated(StagingEvent { stage_dropped: 2, .. })));
        assert_eq!(s.total_mass_kg, 2_000.0);
        assert_eq!(s.current_stage_index, 0);
    }

    #[test]
    fn top_stage_cuts_off() {
        let stages = vec![stage(1_000.0)];
        let mut s = SimulationState::on_pad(1_000.0, 0);
        let t = on_stage_exhausted(&mut s, &stages);
        assert_eq!(t, Transition::Cutoff);
        assert_eq!(t.next_phase(&s), FlightPhase::EngineCutoff);
        assert_eq!(s.total_mass_kg, 1_000.0);
    }

    #[test]
    fn never_separates_into_an_empty_vehicle() {
        let stages = vec![stage(0.0), stage(3_000.0)];
        let mut s = SimulationState::on_pad(3_000.0, 1);
        assert_eq!(on_stage_exhausted(&mut s, &stages), Transition::Cutoff);
        assert_eq!(s.current_stage_index, 1);
        assert_eq!(s.total_mass_kg, 3_000.0);
    }

    #[test]
    fn cutoff_is_not_terminal() {
        assert!(!FlightPhase::EngineCutoff.is_terminal());
        assert!(!FlightPhase::EngineCutoff.engine_lit());
        assert!(FlightPhase::Ascending { stage_index: 0 }.engine_lit());
        assert!(FlightPhase::GroundImpact.is_terminal());
        assert!(FlightPhase::OrbitReached.is_terminal());
        assert!(FlightPhase::TimeExpired.is_terminal());
    }
}
