use tracing::{debug, warn};

use super::event::{on_sample_boundary, FlightProfileSample, StagingEvent};
use super::staging::{self, FlightPhase, Transition};
use super::state::{SimConfig, SimulationState, G};
use crate::physics::aerodynamics::drag_force;
use crate::physics::AtmosphereModel;
use crate::vehicle::StageRuntimeState;

// ---------------------------------------------------------------------------
// Fixed-step vertical flight
// ---------------------------------------------------------------------------

/// Everything a finished flight hands to the outcome classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub final_state: SimulationState,
    pub terminal_phase: FlightPhase,
    pub staging_events: Vec<StagingEvent>,
    pub flight_profile: Vec<FlightProfileSample>,
}

/// A vehicle in flight, advanced one explicit Euler step at a time.
#[derive(Debug, Clone)]
pub struct Flight {
    config: SimConfig,
    atmosphere: AtmosphereModel,
    stages: Vec<StageRuntimeState>,
    state: SimulationState,
    phase: FlightPhase,
    staging_events: Vec<StagingEvent>,
    profile: Vec<FlightProfileSample>,
}

impl Flight {
    /// Put the stack on the pad with its bottom stage active. A config whose
    /// step is not positive and finite ends the flight before it starts.
    pub fn new(stages: Vec<StageRuntimeState>, atmosphere: AtmosphereModel, config: SimConfig) -> Self {
        let total_mass: f64 = stages.iter().map(|s| s.mass_kg).sum();
        let phase = if !config.is_valid() {
            warn!(dt = config.dt, max_time = config.max_time, "unusable time step, flight not started");
            FlightPhase::TimeExpired
        } else {
            match stages.len().checked_sub(1) {
                Some(bottom) => FlightPhase::Ascending { stage_index: bottom },
                None => FlightPhase::EngineCutoff,
            }
        };
        let state = SimulationState::on_pad(total_mass, stages.len().saturating_sub(1));
        let capacity = (config.max_time / config.dt) as usize / 2 + 1;

        Self {
            config,
            atmosphere,
            stages,
            state,
            phase,
            staging_events: vec![],
            profile: Vec::with_capacity(capacity.min(10_000)),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn stages(&self) -> &[StageRuntimeState] {
        &self.stages
    }

    pub fn active_stage(&self) -> Option<&StageRuntimeState> {
        self.stages.get(self.state.current_stage_index)
    }

    pub fn staging_events(&self) -> &[StagingEvent] {
        &self.staging_events
    }

    pub fn flight_profile(&self) -> &[FlightProfileSample] {
        &self.profile
    }

    /// Thrust for this step, N, burning the active stage's propellant and
    /// running the staging machine if the tank runs dry. A stage with no
    /// propellant listed keeps its thrust and is never exhausted by burning.
    fn resolve_thrust(&mut self, dt: f64) -> f64 {
        if !self.phase.engine_lit() {
            return 0.0;
        }
        let Some(stage) = self.stages.get_mut(self.state.current_stage_index) else {
            return 0.0;
        };

        let mut thrust = stage.thrust_n();
        let exhausted = stage.has_fuel() && thrust > 0.0 && stage.burn(dt);

        if exhausted {
            let transition = staging::on_stage_exhausted(&mut self.state, &self.stages);
            self.phase = transition.next_phase(&self.state);
            match transition {
                Transition::Separated(event) => self.staging_events.push(event),
                Transition::Cutoff => thrust = 0.0,
            }
        }
        thrust
    }

    /// Advance one tick and return the phase afterwards. Calling it again
    /// after a terminal phase is a no-op.
    pub fn step(&mut self) -> FlightPhase {
        if self.phase.is_terminal() {
            return self.phase;
        }
        if self.state.time_s >= self.config.max_time {
            self.phase = FlightPhase::TimeExpired;
            return self.phase;
        }

        let dt = self.config.dt;
        let thrust = self.resolve_thrust(dt);

        let mass = self.state.total_mass_kg;
        let gravity = G * mass;
        let drag = drag_force(self.atmosphere, self.state.altitude_m, self.state.velocity_ms);
        let accel = (thrust - gravity - drag) / mass;

        // Velocity first, then altitude with the updated velocity.
        self.state.velocity_ms += accel * dt;
        self.state.altitude_m += self.state.velocity_ms * dt;
        self.state.time_s += dt;

        if self.state.altitude_m < 0.0 && self.state.velocity_ms < 0.0 {
            self.state.altitude_m = 0.0;
            self.state.velocity_ms = 0.0;
            debug!(t = self.state.time_s, "ground impact");
            self.phase = FlightPhase::GroundImpact;
            return self.phase;
        }

        if self.state.altitude_m > self.state.max_altitude_m {
            self.state.max_altitude_m = self.state.altitude_m;
            self.state.max_altitude_time_s = self.state.time_s;
        }

        if on_sample_boundary(self.state.time_s) {
            self.profile.push(FlightProfileSample {
                time_seconds: self.state.time_s,
                altitude_km: self.state.altitude_km(),
                velocity_ms: self.state.velocity_ms,
                acceleration_g: accel / G,
                mass_kg: mass,
                thrust_kn: thrust / 1000.0,
                drag_kn: drag / 1000.0,
            });
        }

        if self.state.in_orbit() {
            debug!(t = self.state.time_s, v = self.state.velocity_ms, "orbit reached");
            self.phase = FlightPhase::OrbitReached;
        } else if self.state.time_s >= self.config.max_time {
            self.phase = FlightPhase::TimeExpired;
        }
        self.phase
    }

    /// Step until a terminal phase and hand back the record.
    pub fn run(mut self) -> FlightRecord {
        while !self.step().is_terminal() {}
        FlightRecord {
            final_state: self.state,
            terminal_phase: self.phase,
            staging_events: self.staging_events,
            flight_profile: self.profile,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(mass_kg: f64, propellant_kg: f64, thrust_kn: f64, burn_time: f64) -> StageRuntimeState {
        StageRuntimeState {
            mass_kg,
            propellant_kg,
            thrust_kn,
            burn_time_seconds: burn_time,
            fuel_remaining_kg: propellant_kg,
        }
    }

    fn flight(stages: Vec<StageRuntimeState>) -> Flight {
        Flight::new(stages, AtmosphereModel::Simple, SimConfig::default())
    }

    #[test]
    fn first_step_matches_hand_derivation() {
        // 500 kN on 4 t: a = 500_000/4000 - 9.81 = 115.19 m/s^2, no drag at rest.
        let mut f = flight(vec![stage(4_000.0, 2_000.0, 500.0, 120.0)]);
        f.step();
        let s = f.state();
        assert!((s.velocity_ms - 57.595).abs() < 1e-9, "v = {}", s.velocity_ms);
        assert!((s.altitude_m - 28.7975).abs() < 1e-9, "h = {}", s.altitude_m);
        assert_eq!(s.time_s, 0.5);
        // 2000 kg over 120 s, half a second
        assert!((f.stages()[0].fuel_remaining_kg - (2_000.0 - 2_000.0 / 120.0 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn fuel_never_increases_and_never_goes_negative() {
        let mut f = flight(vec![stage(4_000.0, 2_000.0, 500.0, 120.0)]);
        let mut prev = f.stages()[0].fuel_remaining_kg;
        while !f.step().is_terminal() {
            let fuel = f.stages()[0].fuel_remaining_kg;
            assert!(fuel <= prev, "fuel rose from {} to {}", prev, fuel);
            assert!(fuel >= 0.0);
            prev = fuel;
        }
    }

    #[test]
    fn mass_drops_by_stage_mass_at_separation() {
        let mut f = flight(vec![stage(2_000.0, 1_000.0, 100.0, 60.0), stage(7_500.0, 4_000.0, 200.0, 60.0)]);
        let dropped = f.stages()[1].mass_kg;
        loop {
            let before = f.state().total_mass_kg;
            let events_before = f.staging_events().len();
            let phase = f.step();
            if f.staging_events().len() > events_before {
                assert_eq!(before - f.state().total_mass_kg, dropped);
                assert_eq!(f.state().current_stage_index, 0);
                assert_eq!(f.staging_events()[0].stage_dropped, 1);
                break;
            }
            assert_eq!(f.state().total_mass_kg, before, "mass only changes at separation");
            assert!(!phase.is_terminal(), "flight ended before staging");
        }
    }

    #[test]
    fn stage_index_never_increases() {
        let mut f = flight(vec![
            stage(1_000.0, 500.0, 50.0, 60.0),
            stage(2_000.0, 1_000.0, 100.0, 60.0),
            stage(7_000.0, 4_000.0, 250.0, 60.0),
        ]);
        let mut prev = f.state().current_stage_index;
        assert_eq!(prev, 2);
        while !f.step().is_terminal() {
            let idx = f.state().current_stage_index;
            assert!(idx <= prev);
            prev = idx;
        }
        assert_eq!(f.staging_events().len(), 2);
    }

    #[test]
    fn samples_match_state_at_sample_time() {
        let mut f = flight(vec![stage(4_000.0, 2_000.0, 500.0, 120.0)]);
        loop {
            let n = f.flight_profile().len();
            let phase = f.step();
            if f.flight_profile().len() > n {
                let sample = f.flight_profile().last().unwrap();
                assert_eq!(sample.time_seconds, f.state().time_s);
                assert!((sample.altitude_km - f.state().altitude_m / 1000.0).abs() < 1e-6);
                assert_eq!(sample.velocity_ms, f.state().velocity_ms);
            }
            if phase.is_terminal() {
                break;
            }
        }
        assert!(!f.flight_profile().is_empty());
    }

    #[test]
    fn engine_stays_off_after_cutoff() {
        let mut f = flight(vec![stage(4_000.0, 600.0, 60.0, 60.0)]);
        while f.phase().engine_lit() {
            f.step();
        }
        assert_eq!(f.phase(), FlightPhase::EngineCutoff);
        assert_eq!(f.stages()[0].fuel_remaining_kg, 0.0);
        while !f.step().is_terminal() {
            if let Some(sample) = f.flight_profile().last() {
                if sample.time_seconds == f.state().time_s {
                    assert_eq!(sample.thrust_kn, 0.0);
                }
            }
        }
    }

    #[test]
    fn weak_rocket_falls_back_and_stops_at_ground() {
        // TWR just above 1: lifts a few hundred metres, then falls.
        let record = flight(vec![stage(10_000.0, 1_000.0, 100.0, 60.0)]).run();
        assert_eq!(record.terminal_phase, FlightPhase::GroundImpact);
        assert_eq!(record.final_state.altitude_m, 0.0);
        assert_eq!(record.final_state.velocity_ms, 0.0);
        assert!(record.final_state.max_altitude_m > 0.0);
        assert!(record.final_state.time_s < 600.0);
    }

    #[test]
    fn engine_only_stage_keeps_thrusting() {
        // 500 kN on 1 t with nothing to burn: thrust never stops.
        let mut f = flight(vec![stage(1_000.0, 0.0, 500.0, 60.0)]);
        assert_eq!(f.step(), FlightPhase::Ascending { stage_index: 0 });
        assert!(f.state().velocity_ms > 0.0);
        assert!(f.state().altitude_m > 0.0);

        let record = f.run();
        assert_ne!(record.terminal_phase, FlightPhase::GroundImpact);
        assert!(record.final_state.max_altitude_m > 200_000.0);
        assert!(record.flight_profile.iter().all(|s| s.thrust_kn == 500.0));
    }

    #[test]
    fn propellant_free_bottom_stage_is_never_dropped() {
        let record = flight(vec![stage(2_000.0, 1_000.0, 100.0, 60.0), stage(8_000.0, 0.0, 200.0, 60.0)]).run();
        assert!(record.staging_events.is_empty());
        assert_eq!(record.final_state.current_stage_index, 1);
        assert_eq!(record.final_state.total_mass_kg, 10_000.0);
        assert_ne!(record.terminal_phase, FlightPhase::GroundImpact);
        assert!(record.final_state.max_altitude_m > 0.0);
    }

    #[test]
    fn unusable_time_step_ends_before_flight() {
        for dt in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = SimConfig { dt, ..SimConfig::default() };
            let record = Flight::new(vec![stage(4_000.0, 2_000.0, 500.0, 120.0)], AtmosphereModel::Simple, config).run();
            assert_eq!(record.terminal_phase, FlightPhase::TimeExpired, "dt = {}", dt);
            assert_eq!(record.final_state.time_s, 0.0);
            assert!(record.flight_profile.is_empty());
        }
        let config = SimConfig { max_time: f64::INFINITY, ..SimConfig::default() };
        let f = Flight::new(vec![stage(4_000.0, 2_000.0, 500.0, 120.0)], AtmosphereModel::Simple, config);
        assert_eq!(f.phase(), FlightPhase::TimeExpired);
    }

    #[test]
    fn hovering_vehicle_runs_out_the_clock() {
        // Exactly TWR 1 and a very long burn: never moves, never lands.
        let mut f = Flight::new(
            vec![stage(1_000.0, 1.0e6, 9.81, 1.0e6)],
            AtmosphereModel::Simple,
            SimConfig::default(),
        );
        let mut steps = 0;
        while !f.step().is_terminal() {
            steps += 1;
        }
        assert_eq!(f.phase(), FlightPhase::TimeExpired);
        assert_eq!(steps + 1, 1200);
        assert_eq!(f.state().time_s, 600.0);
        assert_eq!(f.state().max_altitude_m, 0.0);
    }

    #[test]
    fn max_altitude_time_tracks_the_highest_tick() {
        let mut f = flight(vec![stage(10_000.0, 1_000.0, 100.0, 60.0)]);
        let (mut best_h, mut best_t) = (0.0, 0.0);
        while !f.step().is_terminal() {
            if f.state().altitude_m > best_h {
                best_h = f.state().altitude_m;
                best_t = f.state().time_s;
            }
        }
        assert!(best_t > 0.0);
        assert_eq!(f.state().max_altitude_m, best_h);
        assert_eq!(f.state().max_altitude_time_s, best_t);
    }

    #[test]
    fn step_after_terminal_is_noop() {
        let mut f = flight(vec![stage(10_000.0, 1_000.0, 100.0, 60.0)]);
        while !f.step().is_terminal() {}
        let frozen = f.state().clone();
        assert_eq!(f.step(), FlightPhase::GroundImpact);
        assert_eq!(f.state(), &frozen);
    }
}
