//! Slope extraction pipeline.
//!
//! Route data → severity filter (one per metric) → correlation → optional
//! point reduction. A single code path serves both the plain extraction and
//! the reduced variant; reduction is switched on by
//! [`SlopeConfig::reduce_within_meters`].

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::correlate::{correlate_severe, CorrelatedSegment, SlopeThresholds};
use crate::error::{check_threshold, Result};
use crate::reduce::{flatten_segments, reduce_points};
use crate::route::{RouteData, RouteResponse, RouteWarning};
use crate::Coordinate;

/// Configuration for slope extraction.
///
/// There is no `Default`: thresholds are a routing-profile decision. Use one of
/// the presets or [`SlopeConfig::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct SlopeConfig {
    /// Severity thresholds for the two slope metrics (percent)
    pub thresholds: SlopeThresholds,
    /// When set, the flattened segment coordinates are reduced so that
    /// consecutive points are more than this many meters apart.
    pub reduce_within_meters: Option<f64>,
}

impl SlopeConfig {
    pub fn new(thresholds: SlopeThresholds) -> Self {
        Self { thresholds, reduce_within_meters: None }
    }

    /// Prosthesis profile: max slope 20%, average slope 5%.
    pub fn prosthesis() -> Self {
        Self::new(SlopeThresholds::new(20.0, 5.0))
    }

    /// Wheelchair profile: max slope 25%, average slope 10%.
    pub fn wheelchair() -> Self {
        Self::new(SlopeThresholds::new(25.0, 10.0))
    }

    /// Enable point reduction of the extracted segments.
    pub fn with_reduction(mut self, meters: f64) -> Self {
        self.reduce_within_meters = Some(meters);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if let Some(meters) = self.reduce_within_meters {
            check_threshold("reduction distance", meters)?;
        }
        Ok(())
    }
}

/// Result of running the pipeline over one route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlopeReport {
    /// Overlaps of severe max-slope and severe average-slope intervals
    pub segments: Vec<CorrelatedSegment>,
    /// Reduced segment coordinates, present when reduction is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_points: Option<Vec<Coordinate>>,
    /// Recoverable conditions met while reading the route
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RouteWarning>,
}

impl SlopeReport {
    /// Empty report for a route that could not be read.
    ///
    /// `reduced_points` is `Some(vec![])` when reduction is configured, so it
    /// stays distinguishable from reduction being off.
    fn unreadable(warnings: Vec<RouteWarning>, config: &SlopeConfig) -> Self {
        Self {
            segments: Vec::new(),
            reduced_points: config.reduce_within_meters.map(|_| Vec::new()),
            warnings,
        }
    }

    /// True when the route was read without any warning.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Extract severe slope segments from in-memory route data.
///
/// # Example
///
/// ```rust
/// use route_slopes::{Coordinate, RouteData, SlopeConfig, SlopeInterval, extract_slope_segments};
///
/// let coords: Vec<Coordinate> = (0..31)
///     .map(|i| Coordinate::new(13.4, 52.5 + i as f64 * 0.0001))
///     .collect();
/// let route = RouteData::new(
///     coords,
///     vec![SlopeInterval::new(0, 10, 30.0).unwrap(), SlopeInterval::new(20, 30, -28.0).unwrap()],
///     vec![SlopeInterval::new(5, 12, 12.0).unwrap(), SlopeInterval::new(22, 29, 8.0).unwrap()],
/// );
///
/// let report = extract_slope_segments(&route, &SlopeConfig::prosthesis()).unwrap();
/// assert_eq!(report.segments.len(), 2);
/// ```
pub fn extract_slope_segments(route: &RouteData, config: &SlopeConfig) -> Result<SlopeReport> {
    config.validate()?;

    debug!(
        "[RouteSlopesRust] {} coordinates, {} max_slope / {} average_slope intervals",
        route.coordinates.len(),
        route.max_slope.len(),
        route.average_slope.len()
    );

    let segments = correlate_severe(
        &route.coordinates,
        &route.max_slope,
        &route.average_slope,
        &config.thresholds,
    )?;

    debug!(
        "[RouteSlopesRust] Correlated at thresholds max_slope {} / average_slope {}",
        config.thresholds.max_slope,
        config.thresholds.avg_slope
    );

    let reduced_points = match config.reduce_within_meters {
        Some(meters) => {
            let flat = flatten_segments(&segments);
            let reduced = reduce_points(&flat, meters)?;
            debug!(
                "[RouteSlopesRust] Reduced {} segment points to {} ({}m)",
                flat.len(),
                reduced.len(),
                meters
            );
            Some(reduced)
        }
        None => None,
    };

    info!("[RouteSlopesRust] Found {} correlated slope segments", segments.len());

    Ok(SlopeReport { segments, reduced_points, warnings: Vec::new() })
}

/// Extract severe slope segments from a parsed routing response.
///
/// A response without paths, a path without coordinates, or a path without
/// details yields an empty report carrying the matching [`RouteWarning`].
pub fn extract_from_response(response: &RouteResponse, config: &SlopeConfig) -> Result<SlopeReport> {
    config.validate()?;

    let path = match response.first_path() {
        Ok(path) => path,
        Err(warning) => {
            warn!("[RouteSlopesRust] {}", warning);
            return Ok(SlopeReport::unreadable(vec![warning], config));
        }
    };

    let (route, warnings) = path.to_route_data();
    for warning in &warnings {
        warn!("[RouteSlopesRust] {}", warning);
    }
    let unreadable = warnings.iter().any(|w| {
        matches!(w, RouteWarning::MissingCoordinates | RouteWarning::MissingDetails)
    });
    if unreadable {
        return Ok(SlopeReport::unreadable(warnings, config));
    }

    let mut report = extract_slope_segments(&route, config)?;
    report.warnings = warnings;
    Ok(report)
}

/// Parse routing JSON and extract severe slope segments.
pub fn extract_from_json(json: &str, config: &SlopeConfig) -> Result<SlopeReport> {
    let response = RouteResponse::from_json(json)?;
    extract_from_response(&response, config)
}

/// Run the pipeline over many independent routes.
///
/// Each route gets its own result; one failing route does not affect the rest.
pub fn extract_batch(routes: &[RouteData], config: &SlopeConfig) -> Vec<Result<SlopeReport>> {
    routes
        .iter()
        .map(|route| extract_slope_segments(route, config))
        .collect()
}

/// Run the pipeline over many routes using rayon.
///
/// Same output, in the same order, as [`extract_batch`].
#[cfg(feature = "parallel")]
pub fn extract_batch_parallel(routes: &[RouteData], config: &SlopeConfig) -> Vec<Result<SlopeReport>> {
    use rayon::prelude::*;

    routes
        .par_iter()
        .map(|route| extract_slope_segments(route, config))
        .collect()
}
