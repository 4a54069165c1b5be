use std::io::{self, Write};

use crate::sim::{FlightProfileSample, StagingEvent};

/// Write the flight profile as CSV.
///
/// Columns: time_s, altitude_km, velocity_ms, acceleration_g, mass_kg,
///          thrust_kn, drag_kn, staged
///
/// `staged` is 1 on the first sample after each separation.
pub fn write_profile<W: Write>(
    writer: &mut W,
    profile: &[FlightProfileSample],
    staging: &[StagingEvent],
) -> io::Result<()> {
    writeln!(
        writer,
        "time_s,altitude_km,velocity_ms,acceleration_g,mass_kg,thrust_kn,drag_kn,staged"
    )?;

    let mut pending = staging.iter().peekable();
    for s in profile {
        let mut staged = 0;
        while pending.next_if(|e| e.time_seconds < s.time_seconds).is_some() {
            staged = 1;
        }
        writeln!(
            writer,
            "{:.1},{:.4},{:.2},{:.3},{:.1},{:.2},{:.3},{}",
            s.time_seconds,
            s.altitude_km,
            s.velocity_ms,
            s.acceleration_g,
            s.mass_kg,
            s.thrust_kn,
            s.drag_kn,
            staged,
        )?;
    }

    Ok(())
}

/// Write the flight profile to a CSV file at the given path.
pub fn write_profile_file(
    path: impl AsRef<std::path::Path>,
    profile: &[FlightProfileSample],
    staging: &[StagingEvent],
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_profile(&mut file, profile, staging)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f64, mass: f64) -> FlightProfileSample {
        FlightProfileSample {
            time_seconds: t,
            altitude_km: t * 0.1,
            velocity_ms: 100.0,
            acceleration_g: 1.5,
            mass_kg: mass,
            thrust_kn: 200.0,
            drag_kn: 3.25,
        }
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let profile = vec![sample(0.5, 9_500.0), sample(2.0, 9_500.0)];
        let mut buf = Vec::new();
        write_profile(&mut buf, &profile, &[]).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("time_s,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert_eq!(lines[1], "0.5,0.0500,100.00,1.500,9500.0,200.00,3.250,0");
    }

    #[test]
    fn separation_marked_on_next_sample() {
        let profile = vec![sample(58.5, 9_500.0), sample(60.0, 2_000.0), sample(60.5, 2_000.0)];
        let staging = vec![StagingEvent { time_seconds: 59.5, altitude_km: 13.1, stage_dropped: 1 }];
        let mut buf = Vec::new();
        write_profile(&mut buf, &profile, &staging).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let flags: Vec<&str> = output.lines().skip(1).map(|l| l.rsplit(',').next().unwrap()).collect();
        assert_eq!(flags, vec!["0", "1", "0"]);
    }
}
