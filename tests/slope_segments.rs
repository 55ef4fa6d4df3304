//! End-to-end tests for slope extraction and point reduction

use route_slopes::geo_utils::coordinate_distance;
use route_slopes::*;

fn interval(start: usize, end: usize, value: f64) -> SlopeInterval {
    SlopeInterval::new(start, end, value).unwrap()
}

/// Route heading north-east from Berlin-Reinickendorf, one point every ~8m.
fn berlin_route(n: usize) -> Vec<Coordinate> {
    (0..n)
        .map(|i| {
            Coordinate::with_elevation(
                13.344726 + i as f64 * 0.00005,
                52.595553 + i as f64 * 0.00005,
                36.0 + (i as f64 * 0.3).sin() * 4.0,
            )
        })
        .collect()
}

fn route_json(coords: &[Coordinate], max: &[SlopeInterval], avg: &[SlopeInterval]) -> String {
    serde_json::json!({
        "paths": [{
            "points": { "type": "LineString", "coordinates": coords },
            "details": { "max_slope": max, "average_slope": avg },
        }]
    })
    .to_string()
}

#[test]
fn test_two_severe_stretches() {
    let coords = berlin_route(31);
    let max = [interval(0, 10, 30.0), interval(20, 30, -28.0)];
    let avg = [interval(5, 12, 12.0), interval(22, 29, 8.0)];

    let segments = correlate_severe(&coords, &max, &avg, &SlopeThresholds::new(20.0, 5.0)).unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!((segments[0].start_index, segments[0].end_index), (5, 10));
    assert_eq!((segments[1].start_index, segments[1].end_index), (22, 29));
    assert_eq!(segments[0].segment, coords[5..=10].to_vec());
    assert_eq!(segments[1].segment, coords[22..=29].to_vec());
    assert_eq!(segments[1].max_slope, -28.0);
    assert_eq!(segments[1].avg_slope, 8.0);
}

#[test]
fn test_pipeline_from_json_matches_direct_correlation() {
    let coords = berlin_route(31);
    let max = vec![interval(0, 10, 30.0), interval(10, 20, 2.0), interval(20, 30, -28.0)];
    let avg = vec![interval(5, 12, 12.0), interval(22, 29, 8.0)];
    let json = route_json(&coords, &max, &avg);

    let report = extract_from_json(&json, &SlopeConfig::prosthesis()).unwrap();
    let direct = correlate_severe(&coords, &max, &avg, &SlopeThresholds::new(20.0, 5.0)).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.segments, direct);
}

#[test]
fn test_pipeline_reduction_spacing() {
    let coords = berlin_route(200);
    let max = vec![interval(0, 199, 30.0)];
    let avg = vec![interval(0, 120, 6.0), interval(100, 199, -7.0)];
    let config = SlopeConfig::prosthesis().with_reduction(25.0);

    let report = extract_slope_segments(&RouteData::new(coords, max, avg), &config).unwrap();
    let reduced = report.reduced_points.unwrap();

    assert_eq!(report.segments.len(), 2);
    assert!(reduced.len() < flatten_segments(&report.segments).len());
    for pair in reduced.windows(2) {
        assert!(coordinate_distance(&pair[0], &pair[1]) > 25.0);
    }
}

#[test]
fn test_unroutable_response() {
    let json = r#"{"message": "Connection between locations not found", "hints": [{"details": "ConnectionNotFoundException"}]}"#;
    let report = extract_from_json(json, &SlopeConfig::wheelchair()).unwrap();

    assert!(report.segments.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].to_string().contains("Connection between locations not found"));
}

#[test]
fn test_out_of_range_interval_is_an_error() {
    let coords = berlin_route(10);
    let json = route_json(&coords, &[interval(0, 12, 30.0)], &[interval(0, 9, 12.0)]);

    let err = extract_from_json(&json, &SlopeConfig::prosthesis()).unwrap_err();
    assert!(matches!(err, SlopeError::InvalidIntervalBounds { end: 12, len: 10, .. }));
}

#[test]
fn test_identical_points_reduce_to_one() {
    let point = Coordinate::with_elevation(13.352508, 52.524189, 36.12);
    for threshold in [0.0, 1.0, 100.0] {
        assert_eq!(reduce_points(&vec![point; 25], threshold).unwrap(), vec![point]);
    }
}

#[test]
fn test_report_json_shape() {
    let coords = berlin_route(16);
    let json = route_json(&coords, &[interval(0, 10, 30.0)], &[interval(5, 15, 12.0)]);
    let report = extract_from_json(&json, &SlopeConfig::prosthesis()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    let segment = &value["segments"][0];
    assert_eq!(segment["startIndex"], 5);
    assert_eq!(segment["endIndex"], 10);
    assert_eq!(segment["segment"].as_array().unwrap().len(), 6);
    assert_eq!(segment["segment"][0].as_array().unwrap().len(), 3);
}
