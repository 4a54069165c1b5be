use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ascent_sim::io::csv;
use ascent_sim::io::json::{self, FlightSummary, Scenario};
use ascent_sim::vehicle::{presets, MissionTarget};
use ascent_sim::{AtmosphereModel, LaunchResult};

#[derive(Parser, Debug)]
#[command(name = "ascent-sim")]
#[command(about = "Multi-stage rocket ascent simulator")]
#[command(version)]
struct Args {
    /// Scenario JSON (catalog, configuration, mission). A preset flies if omitted.
    scenario: Option<PathBuf>,

    /// Built-in vehicle used when no scenario file is given
    #[arg(long, value_enum, default_value = "pathfinder")]
    preset: Preset,

    /// Override the target altitude, km
    #[arg(long)]
    target_km: Option<f64>,

    /// Require orbit instead of an altitude
    #[arg(long)]
    orbit: bool,

    /// Override the atmosphere model
    #[arg(long, value_enum)]
    atmosphere: Option<Atmosphere>,

    /// Reject unknown component ids and invalid quantities before flying
    #[arg(long)]
    strict: bool,

    /// Write the full result as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the flight profile as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// -v for staging events, -vv for everything
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Pathfinder,
    Skylark,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Atmosphere {
    Simple,
    Realistic,
}

impl From<Atmosphere> for AtmosphereModel {
    fn from(a: Atmosphere) -> Self {
        match a {
            Atmosphere::Simple => AtmosphereModel::Simple,
            Atmosphere::Realistic => AtmosphereModel::Realistic,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut scenario = load_scenario(&args)?;
    if let Some(km) = args.target_km {
        scenario.mission.target_altitude_km = km;
    }
    if args.orbit {
        scenario.mission.target_orbit = true;
    }
    if let Some(a) = args.atmosphere {
        scenario.mission.atmosphere_model = a.into();
    }

    info!(scenario = %scenario.name, stages = scenario.configuration.stages.len(), "flying");
    let result = scenario.run();
    print_report(&scenario, &result);

    if let Some(path) = &args.json {
        json::write_result_file(path, &scenario.name, &result)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("  Exported result: {}", path.display());
    }
    if let Some(path) = &args.csv {
        csv::write_profile_file(path, &result.flight_profile, &result.staging_events)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("  Exported profile: {}", path.display());
    }

    Ok(())
}

fn load_scenario(args: &Args) -> Result<Scenario> {
    match &args.scenario {
        Some(path) => json::read_scenario_file(path, args.strict)
            .with_context(|| format!("loading scenario {}", path.display())),
        None => {
            let (name, config) = match args.preset {
                Preset::Pathfinder => ("Pathfinder", presets::pathfinder()),
                Preset::Skylark => ("Skylark", presets::skylark()),
            };
            let scenario = Scenario::preset(name, config, MissionTarget::default());
            if args.strict {
                scenario
                    .configuration
                    .validate(&scenario.catalog)
                    .context("preset failed validation")?;
            }
            Ok(scenario)
        }
    }
}

fn print_report(scenario: &Scenario, result: &LaunchResult) {
    let mission = &scenario.mission;
    let summary = FlightSummary::from_result(result);

    println!();
    println!("====================================================================");
    println!("  ASCENT SIMULATION — {}", scenario.name);
    println!("====================================================================");
    println!();
    println!("  Mission");
    println!("  ──────────────────────────────────────────────────────────────────");
    if mission.target_orbit {
        println!("  Target:        orbit (>= 200 km at >= 6240 m/s)");
    } else {
        println!("  Target:        {:>8.1} km", mission.target_altitude_km);
    }
    println!("  Atmosphere:    {:?}", mission.atmosphere_model);
    println!("  Stages:        {:>8}", scenario.configuration.stages.len());
    if let Some(twr) = result.initial_twr {
        println!("  Liftoff TWR:   {:>8.2}", twr);
    }
    println!();

    if !result.staging_events.is_empty() {
        println!("  Staging");
        println!("  ──────────────────────────────────────────────────────────────────");
        for e in &result.staging_events {
            println!(
                "  STAGE {:<2}  t={:>6.1}s   alt={:>8.2}km",
                e.stage_dropped, e.time_seconds, e.altitude_km
            );
        }
        println!();
    }

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Max altitude:  {:>8.2} km  (t={:.1} s)", summary.apogee_km, summary.apogee_time_s);
    println!("  Max speed:     {:>8.1} m/s", summary.max_speed_ms);
    println!("  Max accel:     {:>8.2} g", summary.max_accel_g);
    println!("  Max drag:      {:>8.1} kN", summary.max_drag_kn);
    println!("  Flight time:   {:>8.1} s", summary.flight_time_s);
    match result.terminal_phase {
        Some(phase) => println!("  Ended by:      {:?}", phase),
        None => println!("  Ended by:      rejected on the pad"),
    }
    println!();

    if result.success {
        println!("  RESULT: SUCCESS");
    } else {
        println!("  RESULT: FAILED");
    }
    if let Some(msg) = result.failure_message() {
        println!("  {}", msg);
    }
    println!("====================================================================");
    println!();
}
