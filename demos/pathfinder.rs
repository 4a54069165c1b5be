use ascent_sim::io::csv;
use ascent_sim::io::json::{self, FlightSummary, Scenario};
use ascent_sim::vehicle::{presets, MissionTarget};

fn main() {
    let scenario = Scenario::preset("Pathfinder", presets::pathfinder(), MissionTarget::altitude(50.0));

    println!("Simulating {} ...", scenario.name);
    let result = scenario.run();

    let summary = FlightSummary::from_result(&result);
    println!("Apogee: {:.1} km (t={:.1} s)", summary.apogee_km, summary.apogee_time_s);
    println!("Max speed: {:.1} m/s", summary.max_speed_ms);
    println!("Flight time: {:.1} s", summary.flight_time_s);
    match result.failure_message() {
        Some(msg) => println!("Failed: {}", msg),
        None => println!("Mission target met"),
    }

    csv::write_profile_file("pathfinder_profile.csv", &result.flight_profile, &result.staging_events)
        .expect("Failed to write CSV");
    json::write_result_file("pathfinder_result.json", &scenario.name, &result)
        .expect("Failed to write JSON");

    println!("Exported: pathfinder_profile.csv, pathfinder_result.json");
}
