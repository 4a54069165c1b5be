use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Flight records
// ---------------------------------------------------------------------------

/// One stage separation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingEvent {
    pub time_seconds: f64,
    pub altitude_km: f64,
    /// 1-based count from the bottom: the first stage to burn is stage 1.
    pub stage_dropped: usize,
}

/// Snapshot written to the flight profile on the sampling cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightProfileSample {
    pub time_seconds: f64,
    pub altitude_km: f64,
    pub velocity_ms: f64,
    pub acceleration_g: f64,
    pub mass_kg: f64,
    pub thrust_kn: f64,
    pub drag_kn: f64,
}

/// Samples are taken on every tick whose whole-second part is even, so at
/// dt = 0.5 the profile holds t = 0.5, 2.0, 2.5, 4.0, 4.5, ...
pub fn on_sample_boundary(time_s: f64) -> bool {
    time_s.floor().rem_euclid(2.0) == 0.0
}
