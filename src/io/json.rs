use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::sim::LaunchResult;
use crate::vehicle::{ComponentCatalog, MissionTarget, RocketConfiguration};

// ---------------------------------------------------------------------------
// Scenario files: everything `simulate` needs, in one JSON document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub catalog: ComponentCatalog,
    pub configuration: RocketConfiguration,
    #[serde(default)]
    pub mission: MissionTarget,
}

impl Scenario {
    /// Built-in scenario over the preset parts bin.
    pub fn preset(name: &str, configuration: RocketConfiguration, mission: MissionTarget) -> Self {
        Self {
            name: name.into(),
            catalog: crate::vehicle::presets::starter_catalog(),
            configuration,
            mission,
        }
    }

    pub fn run(&self) -> LaunchResult {
        crate::sim::simulate(&self.configuration, &self.mission, &self.catalog)
    }
}

/// Parse a scenario. With `strict`, component references and quantities are
/// validated too; otherwise unknown ids are left for the simulator to ignore.
pub fn read_scenario<R: Read>(reader: R, strict: bool) -> Result<Scenario, ScenarioError> {
    let scenario: Scenario = serde_json::from_reader(reader)?;
    if strict {
        scenario.configuration.validate(&scenario.catalog)?;
    }
    Ok(scenario)
}

pub fn read_scenario_file(path: impl AsRef<Path>, strict: bool) -> Result<Scenario, ScenarioError> {
    let file = File::open(path)?;
    read_scenario(BufReader::new(file), strict)
}

// ---------------------------------------------------------------------------
// Result export
// ---------------------------------------------------------------------------

/// Headline numbers pulled out of a flight profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSummary {
    pub apogee_km: f64,
    pub apogee_time_s: f64,
    pub max_speed_ms: f64,
    pub max_accel_g: f64,
    pub max_drag_kn: f64,
    pub flight_time_s: f64,
    pub stages_dropped: usize,
}

impl FlightSummary {
    pub fn from_result(result: &LaunchResult) -> Self {
        let fold_max = |f: fn(&crate::sim::FlightProfileSample) -> f64| {
            result.flight_profile.iter().map(f).fold(0.0_f64, f64::max)
        };

        FlightSummary {
            apogee_km: result.max_altitude_km,
            apogee_time_s: result.max_altitude_time_s,
            max_speed_ms: fold_max(|s| s.velocity_ms.abs()),
            max_accel_g: fold_max(|s| s.acceleration_g.abs()),
            max_drag_kn: fold_max(|s| s.drag_kn.abs()),
            flight_time_s: result.flight_time_s,
            stages_dropped: result.staging_events.len(),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    scenario: &'a str,
    summary: FlightSummary,
    failure_message: Option<String>,
    result: &'a LaunchResult,
}

/// Write the full result, with a summary and the formatted failure message,
/// as pretty JSON.
pub fn write_result<W: Write>(writer: W, scenario: &str, result: &LaunchResult) -> serde_json::Result<()> {
    let report = Report {
        scenario,
        summary: FlightSummary::from_result(result),
        failure_message: result.failure_message(),
        result,
    };
    serde_json::to_writer_pretty(writer, &report)
}

pub fn write_result_file(path: impl AsRef<Path>, scenario: &str, result: &LaunchResult) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_result(&mut writer, scenario, result)?;
    writer.flush()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
