//! Extract severe slope segments from a routing response.
//!
//! Run with: cargo run --example slope_segments [route.json]
//!
//! Without an argument a small built-in response is used.

use route_slopes::{extract_from_json, SlopeConfig};

const SAMPLE_RESPONSE: &str = r#"{
  "paths": [{
    "distance": 412.7,
    "points": {
      "type": "LineString",
      "coordinates": [
        [13.344726, 52.595553, 36.1], [13.344801, 52.595611, 36.9], [13.344877, 52.595670, 38.2],
        [13.344952, 52.595728, 39.8], [13.345028, 52.595787, 41.0], [13.345103, 52.595845, 42.5],
        [13.345179, 52.595904, 43.1], [13.345254, 52.595962, 43.4], [13.345330, 52.596021, 43.2],
        [13.345405, 52.596079, 42.0], [13.345481, 52.596138, 40.1], [13.345556, 52.596196, 38.0]
      ]
    },
    "details": {
      "max_slope": [[0, 6, 24], [6, 8, 3], [8, 11, -22]],
      "average_slope": [[0, 4, 11], [4, 9, 2], [9, 11, -9]]
    }
  }]
}"#;

fn main() {
    env_logger::init();

    let json = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SAMPLE_RESPONSE.to_string(),
    };

    let config = SlopeConfig::prosthesis().with_reduction(10.0);

    println!("Slope segments\n");
    println!(
        "Thresholds: max slope {}%, average slope {}%, reduction {:?}m\n",
        config.thresholds.max_slope, config.thresholds.avg_slope, config.reduce_within_meters
    );

    let report = match extract_from_json(&json, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Extraction failed: {}", e);
            std::process::exit(1);
        }
    };

    for warning in &report.warnings {
        println!("Warning: {}", warning);
    }

    for (i, seg) in report.segments.iter().enumerate() {
        println!(
            "{}. indices {}..={} | max {:.1}% avg {:.1}% | {} points, {:.0}m, elevation change {}",
            i + 1,
            seg.start_index,
            seg.end_index,
            seg.max_slope,
            seg.avg_slope,
            seg.len(),
            seg.length_meters(),
            seg.elevation_change()
                .map_or("n/a".to_string(), |d| format!("{:+.1}m", d)),
        );
    }

    if let Some(points) = &report.reduced_points {
        println!("\nReduced to {} points", points.len());
    }

    match report.to_json_pretty() {
        Ok(text) => println!("\n{}", text),
        Err(e) => eprintln!("Failed to serialize report: {}", e),
    }
}
