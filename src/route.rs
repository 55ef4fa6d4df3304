//! Route data as delivered by the routing service.
//!
//! The service answers with JSON shaped like
//!
//! ```json
//! {
//!   "paths": [{
//!     "points": { "type": "LineString", "coordinates": [[13.34, 52.59, 36.1], ...] },
//!     "details": {
//!       "max_slope": [[0, 10, 30], ...],
//!       "average_slope": [[5, 12, 12], ...]
//!     }
//!   }]
//! }
//! ```
//!
//! This module is the only place where that JSON becomes typed data. Only the
//! first path is used. Missing `paths`, `points`, `details` or metric keys are
//! not parse errors; they surface as [`RouteWarning`]s from [`RoutePath::to_route_data`]
//! and [`RouteResponse::first_path`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::intervals::{SlopeInterval, SlopeMetric};
use crate::Coordinate;

/// Top-level routing response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub paths: Vec<RoutePath>,
    /// Error text returned by the service when no route was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One routed path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<PathPoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<PathDetails>,
    /// Total distance in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Total ascent in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascend: Option<f64>,
    /// Total descent in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descend: Option<f64>,
}

/// Unencoded path geometry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathPoints {
    pub coordinates: Vec<Coordinate>,
}

/// Per-metric interval details attached to a path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slope: Option<Vec<SlopeInterval>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_slope: Option<Vec<SlopeInterval>>,
}

impl PathDetails {
    pub fn metric(&self, metric: SlopeMetric) -> Option<&[SlopeInterval]> {
        match metric {
            SlopeMetric::MaxSlope => self.max_slope.as_deref(),
            SlopeMetric::AverageSlope => self.average_slope.as_deref(),
        }
    }
}

/// Recoverable condition found while reading route data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteWarning {
    /// The response holds no path, e.g. the endpoints could not be routed.
    NoPath { message: Option<String> },
    /// The path has no `points` object or no coordinates in it.
    MissingCoordinates,
    /// Some coordinates are non-finite or outside WGS84 ranges.
    InvalidCoordinates { count: usize },
    /// The path carries no details object at all.
    MissingDetails,
    /// One slope metric is absent and was treated as empty.
    MissingMetric { metric: SlopeMetric },
}

impl fmt::Display for RouteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteWarning::NoPath { message: Some(message) } => {
                write!(f, "No paths found in route data: {}", message)
            }
            RouteWarning::NoPath { message: None } => write!(f, "No paths found in route data"),
            RouteWarning::MissingCoordinates => write!(f, "No coordinates found in route data"),
            RouteWarning::InvalidCoordinates { count } => {
                write!(f, "{} invalid coordinates in route data", count)
            }
            RouteWarning::MissingDetails => write!(f, "No details found in route data"),
            RouteWarning::MissingMetric { metric } => {
                write!(f, "No {} details found in route data", metric)
            }
        }
    }
}

/// In-memory route: coordinates plus the two slope interval lists over them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteData {
    pub coordinates: Vec<Coordinate>,
    pub max_slope: Vec<SlopeInterval>,
    pub average_slope: Vec<SlopeInterval>,
}

impl RouteData {
    pub fn new(
        coordinates: Vec<Coordinate>,
        max_slope: Vec<SlopeInterval>,
        average_slope: Vec<SlopeInterval>,
    ) -> Self {
        Self { coordinates, max_slope, average_slope }
    }

    pub fn intervals(&self, metric: SlopeMetric) -> &[SlopeInterval] {
        match metric {
            SlopeMetric::MaxSlope => &self.max_slope,
            SlopeMetric::AverageSlope => &self.average_slope,
        }
    }
}

impl RouteResponse {
    /// Parse a routing response from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a routing response from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// First path of the response, or a [`RouteWarning::NoPath`].
    pub fn first_path(&self) -> std::result::Result<&RoutePath, RouteWarning> {
        self.paths.first().ok_or_else(|| RouteWarning::NoPath {
            message: self.message.clone(),
        })
    }
}

impl RoutePath {
    /// Convert to [`RouteData`], collecting warnings for absent data.
    ///
    /// Without coordinates a single [`RouteWarning::MissingCoordinates`] is
    /// reported and both interval lists are empty. Without a details object
    /// both lists are empty and [`RouteWarning::MissingDetails`] is reported.
    /// Invalid coordinates are kept in place so interval indices stay aligned.
    pub fn to_route_data(&self) -> (RouteData, Vec<RouteWarning>) {
        let coordinates = match &self.points {
            Some(points) if !points.coordinates.is_empty() => points.coordinates.clone(),
            _ => return (RouteData::default(), vec![RouteWarning::MissingCoordinates]),
        };

        let mut warnings = Vec::new();
        let invalid = coordinates.iter().filter(|c| !c.is_valid()).count();
        if invalid > 0 {
            warnings.push(RouteWarning::InvalidCoordinates { count: invalid });
        }

        let Some(details) = &self.details else {
            warnings.push(RouteWarning::MissingDetails);
            let route = RouteData::new(coordinates, Vec::new(), Vec::new());
            return (route, warnings);
        };

        let mut take = |metric: SlopeMetric| match details.metric(metric) {
            Some(intervals) => intervals.to_vec(),
            None => {
                warnings.push(RouteWarning::MissingMetric { metric });
                Vec::new()
            }
        };
        let max_slope = take(SlopeMetric::MaxSlope);
        let average_slope = take(SlopeMetric::AverageSlope);

        (RouteData::new(coordinates, max_slope, average_slope), warnings)
    }
}
