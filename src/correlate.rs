//! # Slope Interval Correlation
//!
//! Finds the stretches of a route where a severe maximum slope and a severe
//! average slope are reported at the same time.
//!
//! ## Algorithm
//! 1. Filter both metric lists with their own symmetric threshold
//! 2. Intersect every max-slope interval with every average-slope interval
//! 3. For each non-empty intersection, copy the covered coordinates
//!
//! The cross product is quadratic in the number of *severe* intervals, not in
//! route length. Overlapping pairs each produce their own segment; segments
//! from different pairs may cover the same indices.

use serde::{Deserialize, Serialize};

use crate::error::{check_threshold, Result};
use crate::geo_utils;
use crate::intervals::{filter_severe, SlopeInterval};
use crate::Coordinate;

/// Severity thresholds for the two slope metrics, in percent.
///
/// Both values are applied symmetrically (`>= T` or `<= -T`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct SlopeThresholds {
    /// Threshold for the maximum-slope metric.
    pub max_slope: f64,
    /// Threshold for the average-slope metric.
    pub avg_slope: f64,
}

impl SlopeThresholds {
    pub fn new(max_slope: f64, avg_slope: f64) -> Self {
        Self { max_slope, avg_slope }
    }

    /// Reject negative or non-finite thresholds.
    pub fn validate(&self) -> Result<()> {
        check_threshold("max slope", self.max_slope)?;
        check_threshold("average slope", self.avg_slope)?;
        Ok(())
    }
}

/// A stretch of route where both slope metrics are severe.
///
/// `segment` holds `coordinates[start_index..=end_index]` of the source route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelatedSegment {
    /// Value of the max-slope interval of the pair
    pub max_slope: f64,
    /// Value of the average-slope interval of the pair
    pub avg_slope: f64,
    /// First index of the intersection (inclusive)
    pub start_index: usize,
    /// Last index of the intersection (inclusive)
    pub end_index: usize,
    /// Coordinates covered by the intersection
    pub segment: Vec<Coordinate>,
}

impl CorrelatedSegment {
    /// Number of coordinates in the segment.
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Length of the segment along the route in meters.
    pub fn length_meters(&self) -> f64 {
        geo_utils::polyline_length(&self.segment)
    }

    /// Elevation difference between the last and first point, if both have one.
    pub fn elevation_change(&self) -> Option<f64> {
        let first = self.segment.first()?.elevation?;
        let last = self.segment.last()?.elevation?;
        Some(last - first)
    }

    /// Segment geometry for rendering.
    pub fn line_string(&self) -> geo::LineString<f64> {
        geo_utils::to_line_string(&self.segment)
    }

    /// Bounding rectangle of the segment.
    pub fn bounds(&self) -> Option<geo::Rect<f64>> {
        geo_utils::compute_bounds(&self.segment)
    }
}

/// Intersect two intervals.
///
/// Returns the inclusive `(start, end)` of the overlap, or `None` if the
/// intervals are disjoint. Intervals sharing a single index overlap.
#[inline]
pub fn intersect(a: &SlopeInterval, b: &SlopeInterval) -> Option<(usize, usize)> {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    (start <= end).then_some((start, end))
}

/// Correlate two already filtered interval lists over `coordinates`.
///
/// Every interval is bounds-checked against `coordinates` before any segment
/// is built, so the result is either complete or an error. Output order is
/// max-major: all segments of the first max-slope interval come first.
///
/// # Example
///
/// ```rust
/// use route_slopes::{Coordinate, SlopeInterval, correlate::correlate};
///
/// let coords: Vec<Coordinate> = (0..16)
///     .map(|i| Coordinate::new(13.0, 52.0 + i as f64 * 0.0001))
///     .collect();
/// let max = [SlopeInterval::new(0, 10, 30.0).unwrap()];
/// let avg = [SlopeInterval::new(5, 15, 12.0).unwrap()];
///
/// let segments = correlate(&coords, &max, &avg).unwrap();
/// assert_eq!(segments.len(), 1);
/// assert_eq!((segments[0].start_index, segments[0].end_index), (5, 10));
/// assert_eq!(segments[0].segment.len(), 6);
/// ```
pub fn correlate(
    coordinates: &[Coordinate],
    max_intervals: &[SlopeInterval],
    avg_intervals: &[SlopeInterval],
) -> Result<Vec<CorrelatedSegment>> {
    for interval in max_intervals.iter().chain(avg_intervals) {
        interval.check_bounds(coordinates.len())?;
    }

    let mut segments = Vec::new();
    for max in max_intervals {
        for avg in avg_intervals {
            if let Some((start, end)) = intersect(max, avg) {
                segments.push(CorrelatedSegment {
                    max_slope: max.value,
                    avg_slope: avg.value,
                    start_index: start,
                    end_index: end,
                    segment: coordinates[start..=end].to_vec(),
                });
            }
        }
    }

    Ok(segments)
}

/// Filter both metric lists with `thresholds`, then correlate them.
///
/// Only the severe intervals are bounds-checked; intervals that the filter
/// drops never index into `coordinates`.
pub fn correlate_severe(
    coordinates: &[Coordinate],
    max_intervals: &[SlopeInterval],
    avg_intervals: &[SlopeInterval],
    thresholds: &SlopeThresholds,
) -> Result<Vec<CorrelatedSegment>> {
    thresholds.validate()?;

    let severe_max = filter_severe(max_intervals, thresholds.max_slope);
    let severe_avg = filter_severe(avg_intervals, thresholds.avg_slope);

    correlate(coordinates, &severe_max, &severe_avg)
}
