use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Atmosphere model selection
// ---------------------------------------------------------------------------

/// Which density curve (and drag sign convention) a flight uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtmosphereModel {
    /// Single exponential density curve, drag always subtracted.
    #[default]
    Simple,
    /// ISA 1976 layered density, drag opposes the direction of motion.
    Realistic,
}

/// Above this altitude both models treat the air as vacuum, m.
pub const ATMOSPHERE_CEILING: f64 = 100_000.0;

pub const SEA_LEVEL_DENSITY: f64 = 1.225;   // kg/m^3
pub const SCALE_HEIGHT: f64 = 8_500.0;      // m

/// Air density for the given model at a geometric altitude, kg/m^3.
pub fn density(model: AtmosphereModel, altitude_m: f64) -> f64 {
    match model {
        AtmosphereModel::Simple => exponential_density(altitude_m),
        AtmosphereModel::Realistic => {
            if altitude_m < ATMOSPHERE_CEILING {
                isa(altitude_m).density
            } else {
                0.0
            }
        }
    }
}

/// rho(h) = 1.225 * exp(-h / 8500) below the ceiling, zero above.
pub fn exponential_density(altitude_m: f64) -> f64 {
    if altitude_m < ATMOSPHERE_CEILING {
        SEA_LEVEL_DENSITY * (-altitude_m / SCALE_HEIGHT).exp()
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// ISA 1976 Standard Atmosphere (sea level to 86 km)
// ---------------------------------------------------------------------------

const R_AIR: f64 = 287.052_87; // specific gas constant for dry air, J/(kg·K)
const GAMMA: f64 = 1.4;        // ratio of specific heats
const G_STD: f64 = 9.80665;    // standard gravity used by the barometric formula

/// Atmospheric properties at a given geometric altitude.
#[derive(Debug, Clone, Copy)]
pub struct Atmo {
    pub density: f64,      // kg/m^3
    pub pressure: f64,     // Pa
    pub temperature: f64,  // K
    pub sound_speed: f64,  // m/s
}

/// Base of one ISA layer: (base altitude m, base temperature K, lapse K/m, base pressure Pa).
const LAYERS: [(f64, f64, f64, f64); 7] = [
    (0.0, 288.15, -0.0065, 101_325.0),      // troposphere
    (11_000.0, 216.65, 0.0, 22_632.1),      // tropopause
    (20_000.0, 216.65, 0.001, 5_474.89),    // stratosphere I
    (32_000.0, 228.65, 0.0028, 868.019),    // stratosphere II
    (47_000.0, 270.65, 0.0, 110.906),       // stratopause
    (51_000.0, 270.65, -0.0028, 66.9389),   // mesosphere I
    (71_000.0, 214.65, -0.002, 3.956_42),   // mesosphere II
];

const ISA_TOP: f64 = 86_000.0;

/// ISA 1976 standard atmosphere. Negative altitudes read as sea level; above
/// 86 km pressure decays exponentially from the last layer's value.
pub fn isa(altitude_m: f64) -> Atmo {
    let h = altitude_m.max(0.0);

    let (temperature, pressure) = if h < ISA_TOP {
        let (base, t_base, lapse, p_base) = LAYERS
            .iter()
            .rev()
            .find(|layer| h >= layer.0)
            .copied()
            .unwrap_or(LAYERS[0]);
        layer_conditions(h, base, t_base, lapse, p_base)
    } else {
        let p = 0.3734 * (-0.000_15 * (h - ISA_TOP)).exp();
        (186.87, p.max(0.0))
    };

    Atmo {
        density: pressure / (R_AIR * temperature),
        pressure,
        temperature,
        sound_speed: (GAMMA * R_AIR * temperature).sqrt(),
    }
}

fn layer_conditions(h: f64, base: f64, t_base: f64, lapse: f64, p_base: f64) -> (f64, f64) {
    let dh = h - base;
    if lapse == 0.0 {
        (t_base, p_base * (-G_STD * dh / (R_AIR * t_base)).exp())
    } else {
        let t = t_base + lapse * dh;
        (t, p_base * (t / t_base).powf(-G_STD / (lapse * R_AIR)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_sea_level_and_scale_height() {
        assert!((exponential_density(0.0) - 1.225).abs() < 1e-12);
        let e_fold = exponential_density(SCALE_HEIGHT);
        assert!((e_fold - 1.225 / std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn both_models_are_vacuum_at_ceiling() {
        assert_eq!(density(AtmosphereModel::Simple, 100_000.0), 0.0);
        assert_eq!(density(AtmosphereModel::Realistic, 100_000.0), 0.0);
        assert!(density(AtmosphereModel::Simple, 99_999.0) > 0.0);
    }

    #[test]
    fn isa_sea_level_standard_values() {
        let a = isa(0.0);
        assert!((a.temperature - 288.15).abs() < 0.01);
        assert!((a.pressure - 101_325.0).abs() < 1.0);
        assert!((a.density - 1.225).abs() < 0.001);
        assert!((a.sound_speed - 340.29).abs() < 0.1);
    }

    #[test]
    fn isa_tropopause_11km() {
        let a = isa(11_000.0);
        assert!((a.temperature - 216.65).abs() < 0.5);
        assert!((a.pressure - 22_632.0).abs() < 100.0);
    }

    #[test]
    fn isa_layers_are_continuous() {
        for &(base, ..) in LAYERS.iter().skip(1) {
            let below = isa(base - 1e-3).pressure;
            let above = isa(base + 1e-3).pressure;
            assert!(
                ((below - above) / below).abs() < 1e-2,
                "pressure jump at {} m: {} vs {}",
                base,
                below,
                above
            );
        }
    }

    #[test]
    fn realistic_density_decreases_with_altitude() {
        let mut prev = f64::INFINITY;
        for km in [0.0, 5.0, 15.0, 30.0, 50.0, 70.0, 90.0] {
            let rho = density(AtmosphereModel::Realistic, km * 1000.0);
            assert!(rho < prev, "density should fall at {} km", km);
            assert!(rho > 0.0);
            prev = rho;
        }
    }

    #[test]
    fn models_differ_at_altitude() {
        let simple = density(AtmosphereModel::Simple, 30_000.0);
        let real = density(AtmosphereModel::Realistic, 30_000.0);
        assert!((simple - real).abs() > 1e-4, "{} vs {}", simple, real);
    }

    #[test]
    fn negative_altitude_clamps_to_sea_level() {
        let a = isa(-500.0);
        assert!((a.temperature - 288.15).abs() < 0.01);
    }
}
