use crate::physics::atmosphere::{self, AtmosphereModel};

/// Drag coefficient of every student vehicle.
pub const DRAG_COEFFICIENT: f64 = 0.3;
/// Frontal reference area, m^2.
pub const REFERENCE_AREA: f64 = 10.0;

/// Drag force along the vertical axis, N, positive meaning "subtracted from
/// thrust".
///
/// The simple model always returns the unsigned magnitude 0.5·rho·v²·Cd·A, so
/// drag keeps pushing down even while the vehicle falls. The realistic model
/// signs it with the velocity so it always opposes motion.
pub fn drag_force(model: AtmosphereModel, altitude_m: f64, velocity_ms: f64) -> f64 {
    let rho = atmosphere::density(model, altitude_m);
    let q_area = 0.5 * rho * DRAG_COEFFICIENT * REFERENCE_AREA;
    match model {
        AtmosphereModel::Simple => q_area * velocity_ms * velocity_ms,
        AtmosphereModel::Realistic => q_area * velocity_ms * velocity_ms.abs(),
    }
}
