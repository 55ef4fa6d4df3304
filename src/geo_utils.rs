//! # Geographic Utilities
//!
//! Geodesic computations used by the point reducer and by segment statistics.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two (lat, lon) pairs |
//! | [`coordinate_distance`] | Same, for two route [`Coordinate`]s |
//! | [`polyline_length`] | Total length of a coordinate sequence in meters |
//! | [`to_line_string`] | Convert coordinates to a [`geo::LineString`] |
//! | [`compute_bounds`] | Bounding rectangle of a coordinate sequence |
//!
//! ## Example
//!
//! ```rust
//! use route_slopes::{Coordinate, geo_utils};
//!
//! let a = Coordinate::new(13.3447, 52.5955);
//! let b = Coordinate::new(13.3450, 52.5960);
//!
//! let dist = geo_utils::coordinate_distance(&a, &b);
//! assert!(dist > 50.0 && dist < 70.0);
//! ```
//!
//! ## Algorithm Notes
//!
//! ### Haversine Formula
//!
//! Distances assume a spherical Earth with radius [`EARTH_RADIUS_M`]
//! (6,371,000 m). Accuracy is within 0.3% for practical route lengths.
//!
//! Reference: [Haversine formula (Wikipedia)](https://en.wikipedia.org/wiki/Haversine_formula)
//!
//! ### Coordinate System
//!
//! Route coordinates are stored as `[longitude, latitude, elevation]`, the
//! GeoJSON order used by routing services, while [`haversine_distance`] takes
//! `(latitude, longitude)` pairs. [`coordinate_distance`] does the swap.

use geo::{BoundingRect, Coord, LineString, Rect};
use crate::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two points using the Haversine formula.
///
/// Inputs are degrees, result is meters. Non-finite inputs produce a non-finite
/// result; nothing is clamped or masked.
///
/// # Example
///
/// ```rust
/// use route_slopes::geo_utils::haversine_distance;
///
/// // London to Paris
/// let d = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
/// assert!((d - 343_500.0).abs() < 1000.0);
/// ```
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Great-circle distance between two route coordinates in meters.
///
/// Elevation is ignored.
#[inline]
pub fn coordinate_distance(p1: &Coordinate, p2: &Coordinate) -> f64 {
    haversine_distance(p1.latitude, p1.longitude, p2.latitude, p2.longitude)
}

/// Calculate the total length of a coordinate sequence in meters.
///
/// Empty or single-point sequences return 0.0.
pub fn polyline_length(points: &[Coordinate]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| coordinate_distance(&w[0], &w[1]))
        .sum()
}

// =============================================================================
// Geometry Conversions
// =============================================================================

/// Convert coordinates to a [`LineString`] (x = longitude, y = latitude).
pub fn to_line_string(points: &[Coordinate]) -> LineString<f64> {
    points.iter().map(|p| Coord::from(*p)).collect()
}

/// Compute the bounding rectangle of a coordinate sequence.
///
/// Returns `None` for empty input.
pub fn compute_bounds(points: &[Coordinate]) -> Option<Rect<f64>> {
    to_line_string(points).bounding_rect()
}

// =============================================================================
// Unit Tests
// =============================================================================
