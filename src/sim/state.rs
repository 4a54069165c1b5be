// ---------------------------------------------------------------------------
// Physical and mission constants
// ---------------------------------------------------------------------------

pub const G: f64 = 9.81;                        // m/s^2, constant with altitude
pub const ORBITAL_VELOCITY: f64 = 7_800.0;      // m/s, circular LEO speed
pub const ORBIT_VELOCITY_FRACTION: f64 = 0.8;   // share of ORBITAL_VELOCITY that counts as orbit
pub const ORBIT_ALTITUDE_KM: f64 = 200.0;
pub const KARMAN_LINE_KM: f64 = 100.0;
pub const BARELY_OFF_GROUND_KM: f64 = 10.0;

/// Velocity needed to count as orbital, m/s (6240).
pub fn orbit_velocity() -> f64 {
    ORBIT_VELOCITY_FRACTION * ORBITAL_VELOCITY
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub dt: f64,        // fixed integration step, s
    pub max_time: f64,  // hard stop, s
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.5,
            max_time: 600.0, // 10 min, at most 1200 steps
        }
    }
}

impl SimConfig {
    /// A flight only terminates if the step is positive and both values are
    /// finite.
    pub fn is_valid(&self) -> bool {
        self.dt > 0.0 && self.dt.is_finite() && self.max_time.is_finite()
    }
}

// ---------------------------------------------------------------------------
// Point-mass vertical state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub time_s: f64,
    pub altitude_m: f64,
    pub velocity_ms: f64,          // positive = up
    pub total_mass_kg: f64,        // only changes at separation
    pub current_stage_index: usize,
    pub max_altitude_m: f64,
    pub max_altitude_time_s: f64,  // tick on which max_altitude_m was set
}

impl SimulationState {
    /// On the pad with the bottom stage active.
    pub fn on_pad(total_mass_kg: f64, bottom_stage: usize) -> Self {
        Self {
            time_s: 0.0,
            altitude_m: 0.0,
            velocity_ms: 0.0,
            total_mass_kg,
            current_stage_index: bottom_stage,
            max_altitude_m: 0.0,
            max_altitude_time_s: 0.0,
        }
    }

    pub fn altitude_km(&self) -> f64 {
        self.altitude_m / 1000.0
    }

    pub fn in_orbit(&self) -> bool {
        self.altitude_km() >= ORBIT_ALTITUDE_KM && self.velocity_ms >= orbit_velocity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_velocity_is_6240() {
        assert_eq!(orbit_velocity(), 6_240.0);
    }

    #[test]
    fn default_config_caps_steps() {
        let c = SimConfig::default();
        assert_eq!((c.max_time / c.dt) as usize, 1200);
    }

    #[test]
    fn orbit_needs_altitude_and_speed() {
        let mut s = SimulationState::on_pad(1000.0, 0);
        s.altitude_m = 200_000.0;
        s.velocity_ms = 6_239.0;
        assert!(!s.in_orbit());
        s.velocity_ms = 6_240.0;
        assert!(s.in_orbit());
        s.altitude_m = 199_999.0;
        assert!(!s.in_orbit());
    }
}
