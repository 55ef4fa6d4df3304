//! Extract slope segments from many routes in parallel.
//!
//! Run with: cargo run --example batch_extraction --features parallel

use route_slopes::{
    extract_batch, extract_batch_parallel, Coordinate, RouteData, SlopeConfig, SlopeInterval,
};
use std::time::Instant;

fn synthetic_route(seed: usize, len: usize) -> RouteData {
    let coordinates: Vec<Coordinate> = (0..len)
        .map(|i| {
            let t = i as f64;
            Coordinate::with_elevation(
                13.2 + seed as f64 * 0.01 + t * 0.00004,
                52.4 + t * 0.00003,
                40.0 + (t * 0.05 + seed as f64).sin() * 15.0,
            )
        })
        .collect();

    // Alternate slope values so some stretches are severe
    let step = 25;
    let mut max_slope = Vec::new();
    let mut average_slope = Vec::new();
    for (k, start) in (0..len - 1).step_by(step).enumerate() {
        let end = (start + step).min(len - 1);
        let sign = if (k + seed) % 2 == 0 { 1.0 } else { -1.0 };
        max_slope.push(SlopeInterval { start, end, value: sign * (12.0 + (k % 4) as f64 * 5.0) });
        let mid = (start + step / 2).min(end);
        average_slope.push(SlopeInterval { start: mid, end, value: sign * (3.0 + (k % 3) as f64 * 2.0) });
    }

    RouteData::new(coordinates, max_slope, average_slope)
}

fn main() {
    env_logger::init();

    let routes: Vec<RouteData> = (0..500).map(|seed| synthetic_route(seed, 2000)).collect();
    let config = SlopeConfig::prosthesis().with_reduction(15.0);

    println!("Batch extraction over {} routes\n", routes.len());

    let start = Instant::now();
    let sequential = extract_batch(&routes, &config);
    println!("Sequential: {:?}", start.elapsed());

    let start = Instant::now();
    let parallel = extract_batch_parallel(&routes, &config);
    println!("Parallel:   {:?}", start.elapsed());

    let segments: usize = parallel
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .map(|r| r.segments.len())
        .sum();
    let failures = parallel.iter().filter(|r| r.is_err()).count();
    let agree = sequential
        .iter()
        .zip(&parallel)
        .all(|(a, b)| match (a, b) {
            (Ok(a), Ok(b)) => a == b,
            (Err(_), Err(_)) => true,
            _ => false,
        });

    println!("\n{} segments, {} failed routes, results agree: {}", segments, failures, agree);
}
