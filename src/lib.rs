//! # Route Slopes
//!
//! Severe slope detection and point reduction for accessible routing.
//!
//! This library provides:
//! - Correlation of max-slope and average-slope interval details into
//!   coordinate segments where both are severe
//! - Greedy geodesic point reduction of those segments
//! - A typed boundary for routing-service JSON
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch extraction with rayon
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use route_slopes::{extract_from_json, SlopeConfig};
//!
//! let json = r#"{"paths": [{
//!     "points": {"coordinates": [[13.40, 52.50, 34.0], [13.40, 52.51, 36.0], [13.40, 52.52, 41.0]]},
//!     "details": {"max_slope": [[0, 2, 30]], "average_slope": [[1, 2, 12]]}
//! }]}"#;
//!
//! let report = extract_from_json(json, &SlopeConfig::prosthesis().with_reduction(10.0)).unwrap();
//! assert_eq!(report.segments.len(), 1);
//! assert_eq!(report.segments[0].start_index, 1);
//! assert_eq!(report.reduced_points.unwrap().len(), 2);
//! ```

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Result, SlopeError};

pub mod geo_utils;

pub mod intervals;
pub use intervals::{filter_severe, SlopeInterval, SlopeMetric};

pub mod correlate;
pub use correlate::{correlate, correlate_severe, CorrelatedSegment, SlopeThresholds};

pub mod reduce;
pub use reduce::{flatten_segments, reduce_points, PointReducer};

pub mod route;
pub use route::{RouteData, RoutePath, RouteResponse, RouteWarning};

pub mod pipeline;
pub use pipeline::{
    extract_batch, extract_from_json, extract_from_response, extract_slope_segments,
    SlopeConfig, SlopeReport,
};

#[cfg(feature = "parallel")]
pub use pipeline::extract_batch_parallel;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("RouteSlopesRust")
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A route coordinate: longitude, latitude and optional elevation.
///
/// Serialized as `[lon, lat]` or `[lon, lat, ele]`, the order routing
/// services use for unencoded points.
///
/// # Example
/// ```
/// use route_slopes::Coordinate;
/// let point = Coordinate::with_elevation(13.3447, 52.5955, 36.1);
/// assert_eq!(point.latitude, 52.5955);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
    /// Elevation in meters, when the route was requested with elevation
    pub elevation: Option<f64>,
}

impl Coordinate {
    /// Create a coordinate without elevation.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude, elevation: None }
    }

    /// Create a coordinate with elevation.
    pub fn with_elevation(longitude: f64, latitude: f64, elevation: f64) -> Self {
        Self { longitude, latitude, elevation: Some(elevation) }
    }

    /// Check if the coordinate is finite and within WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
            && self.elevation.map_or(true, f64::is_finite)
    }
}

impl TryFrom<Vec<f64>> for Coordinate {
    type Error = SlopeError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        match values.as_slice() {
            [lon, lat] => Ok(Self::new(*lon, *lat)),
            [lon, lat, ele] => Ok(Self::with_elevation(*lon, *lat, *ele)),
            other => Err(SlopeError::InvalidCoordinate(format!(
                "expected [lon, lat] or [lon, lat, ele], got {} values",
                other.len()
            ))),
        }
    }
}

impl From<Coordinate> for Vec<f64> {
    fn from(c: Coordinate) -> Self {
        match c.elevation {
            Some(ele) => vec![c.longitude, c.latitude, ele],
            None => vec![c.longitude, c.latitude],
        }
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(c: Coordinate) -> Self {
        Coord { x: c.longitude, y: c.latitude }
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        Point::new(c.longitude, c.latitude)
    }
}

// ============================================================================
// FFI Exports (only when feature enabled)
// ============================================================================

#[cfg(feature = "ffi")]
mod ffi {
    use super::*;
    use log::{info, warn};

    /// Correlated segment with FFI-friendly index types.
    #[derive(Debug, Clone, uniffi::Record)]
    pub struct FfiCorrelatedSegment {
        pub max_slope: f64,
        pub avg_slope: f64,
        pub start_index: u32,
        pub end_index: u32,
        pub segment: Vec<Coordinate>,
    }

    impl TryFrom<CorrelatedSegment> for FfiCorrelatedSegment {
        type Error = std::num::TryFromIntError;

        fn try_from(s: CorrelatedSegment) -> std::result::Result<Self, Self::Error> {
            Ok(Self {
                max_slope: s.max_slope,
                avg_slope: s.avg_slope,
                start_index: u32::try_from(s.start_index)?,
                end_index: u32::try_from(s.end_index)?,
                segment: s.segment,
            })
        }
    }

    /// Slope report for mobile hosts. Warnings are rendered as text.
    #[derive(Debug, Clone, uniffi::Record)]
    pub struct FfiSlopeReport {
        pub segments: Vec<FfiCorrelatedSegment>,
        /// Empty when reduction was not configured
        pub reduced_points: Vec<Coordinate>,
        pub warnings: Vec<String>,
    }

    impl From<SlopeReport> for FfiSlopeReport {
        fn from(report: SlopeReport) -> Self {
            Self {
                segments: report
                    .segments
                    .into_iter()
                    .filter_map(|s| {
                        let (start, end) = (s.start_index, s.end_index);
                        FfiCorrelatedSegment::try_from(s)
                            .map_err(|e| {
                                warn!(
                                    "[RouteSlopesRust] Skipping segment {}..{}: index exceeds u32 ({})",
                                    start, end, e
                                );
                            })
                            .ok()
                    })
                    .collect(),
                reduced_points: report.reduced_points.unwrap_or_default(),
                warnings: report.warnings.iter().map(|w| w.to_string()).collect(),
            }
        }
    }

    /// Extract severe slope segments from routing JSON.
    ///
    /// Returns `None` if the JSON is malformed or the route data violates
    /// its index contract; the reason is logged.
    #[uniffi::export]
    pub fn ffi_extract_slope_segments(route_json: String, config: SlopeConfig) -> Option<FfiSlopeReport> {
        init_logging();
        info!(
            "[RouteSlopesRust] extract_slope_segments: {} bytes, thresholds {}/{}",
            route_json.len(),
            config.thresholds.max_slope,
            config.thresholds.avg_slope
        );

        match extract_from_json(&route_json, &config) {
            Ok(report) => Some(report.into()),
            Err(e) => {
                warn!("[RouteSlopesRust] Slope extraction failed: {}", e);
                None
            }
        }
    }

    /// Reduce points so consecutive ones are more than `threshold_meters` apart.
    #[uniffi::export]
    pub fn ffi_reduce_points(points: Vec<Coordinate>, threshold_meters: f64) -> Vec<Coordinate> {
        init_logging();
        match reduce_points(&points, threshold_meters) {
            Ok(reduced) => {
                info!(
                    "[RouteSlopesRust] Reduced {} points to {} ({}m)",
                    points.len(),
                    reduced.len(),
                    threshold_meters
                );
                reduced
            }
            Err(e) => {
                warn!("[RouteSlopesRust] Point reduction failed: {}", e);
                points
            }
        }
    }

    /// Get the prosthesis profile configuration.
    #[uniffi::export]
    pub fn prosthesis_config() -> SlopeConfig {
        SlopeConfig::prosthesis()
    }

    /// Get the wheelchair profile configuration.
    #[uniffi::export]
    pub fn wheelchair_config() -> SlopeConfig {
        SlopeConfig::wheelchair()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn segment(start_index: usize, end_index: usize) -> CorrelatedSegment {
            CorrelatedSegment {
                max_slope: 30.0,
                avg_slope: 12.0,
                start_index,
                end_index,
                segment: vec![Coordinate::new(13.1, 52.1), Coordinate::new(13.2, 52.2)],
            }
        }

        #[test]
        fn test_ffi_report_keeps_segments_in_range() {
            let report = SlopeReport {
                segments: vec![segment(0, 1), segment(4, 5)],
                reduced_points: None,
                warnings: vec![RouteWarning::MissingDetails],
            };
            let ffi: FfiSlopeReport = report.into();
            assert_eq!(ffi.segments.len(), 2);
            assert_eq!(ffi.segments[1].start_index, 4);
            assert_eq!(ffi.segments[1].end_index, 5);
            assert!(ffi.reduced_points.is_empty());
            assert_eq!(ffi.warnings, vec![RouteWarning::MissingDetails.to_string()]);
        }

        #[cfg(target_pointer_width = "64")]
        #[test]
        fn test_ffi_report_skips_indices_beyond_u32() {
            let big = u32::MAX as usize + 1;
            assert!(FfiCorrelatedSegment::try_from(segment(big, big + 1)).is_err());

            let report = SlopeReport {
                segments: vec![segment(0, 1), segment(big, big + 1), segment(2, big)],
                reduced_points: Some(Vec::new()),
                warnings: Vec::new(),
            };
            let ffi: FfiSlopeReport = report.into();
            assert_eq!(ffi.segments.len(), 1);
            assert_eq!(ffi.segments[0].start_index, 0);
            assert_eq!(ffi.segments[0].end_index, 1);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
