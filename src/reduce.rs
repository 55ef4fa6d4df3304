//! # Point Reduction
//!
//! Collapses a coordinate sequence so that no two consecutive retained points
//! lie within `threshold` meters of each other.
//!
//! ## Algorithm
//!
//! Single forward pass. The first point is always kept and becomes the anchor.
//! Each following point is kept, and becomes the new anchor, only when its
//! great-circle distance to the anchor is strictly greater than the threshold.
//! Dropped points never affect later comparisons.
//!
//! This is a greedy approximation, not a spatial clustering: two retained
//! points that are not neighbours in the output may still be closer than the
//! threshold (for example when a route doubles back).

use crate::correlate::CorrelatedSegment;
use crate::error::{check_threshold, Result};
use crate::geo_utils::coordinate_distance;
use crate::Coordinate;

/// Streaming point reducer holding the last retained point.
///
/// # Example
///
/// ```rust
/// use route_slopes::{Coordinate, reduce::PointReducer};
///
/// let mut reducer = PointReducer::new(5.0).unwrap();
/// assert!(reducer.push(Coordinate::new(13.4, 52.5)));
/// assert!(!reducer.push(Coordinate::new(13.4, 52.50001))); // ~1m away
/// assert!(reducer.push(Coordinate::new(13.4, 52.501)));    // ~111m away
/// ```
#[derive(Debug, Clone)]
pub struct PointReducer {
    threshold: f64,
    anchor: Option<Coordinate>,
}

impl PointReducer {
    /// Create a reducer. `threshold` is in meters and must be finite and >= 0.
    pub fn new(threshold: f64) -> Result<Self> {
        Ok(Self {
            threshold: check_threshold("reduction distance", threshold)?,
            anchor: None,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Last retained point, if any.
    pub fn anchor(&self) -> Option<&Coordinate> {
        self.anchor.as_ref()
    }

    /// Offer the next point. Returns `true` if it is retained.
    pub fn push(&mut self, point: Coordinate) -> bool {
        let keep = match &self.anchor {
            None => true,
            Some(anchor) => coordinate_distance(anchor, &point) > self.threshold,
        };
        if keep {
            self.anchor = Some(point);
        }
        keep
    }

    /// Forget the anchor so the next pushed point is retained unconditionally.
    pub fn reset(&mut self) {
        self.anchor = None;
    }
}

/// Reduce `points` in one pass, keeping order.
///
/// # Example
///
/// ```rust
/// use route_slopes::{Coordinate, reduce::reduce_points};
///
/// let same = vec![Coordinate::new(13.4, 52.5); 20];
/// assert_eq!(reduce_points(&same, 1.0).unwrap().len(), 1);
/// ```
pub fn reduce_points(points: &[Coordinate], threshold: f64) -> Result<Vec<Coordinate>> {
    let mut reducer = PointReducer::new(threshold)?;
    Ok(points.iter().copied().filter(|p| reducer.push(*p)).collect())
}

/// Concatenate the coordinates of all segments, in order.
///
/// Overlapping segments contribute their shared points more than once.
/// Adjacent repeats are dropped by [`reduce_points`].
pub fn flatten_segments(segments: &[CorrelatedSegment]) -> Vec<Coordinate> {
    segments
        .iter()
        .flat_map(|s| s.segment.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SlopeError;
    use crate::geo_utils::coordinate_distance;

    /// Points heading north, `spacing_deg` apart in latitude.
    fn line(n: usize, spacing_deg: f64) -> Vec<Coordinate> {
        (0..n)
            .map(|i| Coordinate::new(13.4, 52.5 + i as f64 * spacing_deg))
            .collect()
    }

    fn assert_consecutive_spacing(points: &[Coordinate], threshold: f64) {
        for w in points.windows(2) {
            assert!(coordinate_distance(&w[0], &w[1]) > threshold);
        }
    }

    #[test]
    fn test_reduce_empty() {
        assert!(reduce_points(&[], 10.0).unwrap().is_empty());
    }

    #[test]
    fn test_reduce_single_point() {
        let pts = line(1, 0.0);
        assert_eq!(reduce_points(&pts, 10.0).unwrap(), pts);
    }

    #[test]
    fn test_reduce_identical_points() {
        let pts = vec![Coordinate::with_elevation(13.4, 52.5, 40.0); 50];
        let reduced = reduce_points(&pts, 0.0).unwrap();
        assert_eq!(reduced, vec![pts[0]]);
    }

    #[test]
    fn test_reduce_well_separated_unchanged() {
        // ~111m apart
        let pts = line(10, 0.001);
        assert_eq!(reduce_points(&pts, 50.0).unwrap(), pts);
    }

    #[test]
    fn test_reduce_dense_line() {
        // ~1.1m apart; keep roughly one point every 10m
        let pts = line(100, 0.00001);
        let reduced = reduce_points(&pts, 10.0).unwrap();
        assert!(reduced.len() > 5 && reduced.len() < 15);
        assert_eq!(reduced[0], pts[0]);
        assert_consecutive_spacing(&reduced, 10.0);
    }

    #[test]
    fn test_reduce_compares_against_retained_anchor() {
        // Each hop is ~6.7m, under the threshold, but drift adds up
        let pts = line(4, 0.00006);
        let reduced = reduce_points(&pts, 10.0).unwrap();
        assert_eq!(reduced, vec![pts[0], pts[2]]);
    }

    #[test]
    fn test_reduce_threshold_is_strict() {
        let pts = line(2, 0.001);
        let gap = coordinate_distance(&pts[0], &pts[1]);
        assert_eq!(reduce_points(&pts, gap).unwrap().len(), 1);
        assert_eq!(reduce_points(&pts, gap - 0.01).unwrap().len(), 2);
    }

    #[test]
    fn test_reduce_idempotent() {
        let pts = line(200, 0.000013);
        let once = reduce_points(&pts, 7.5).unwrap();
        let twice = reduce_points(&once, 7.5).unwrap();
        assert_eq!(once, twice);
        assert_eq!(reduce_points(&pts, 7.5).unwrap(), once);
    }

    #[test]
    fn test_reduce_rejects_bad_threshold() {
        assert!(matches!(
            reduce_points(&line(3, 0.001), -5.0),
            Err(SlopeError::InvalidThreshold { .. })
        ));
        assert!(PointReducer::new(f64::NAN).is_err());
    }

    #[test]
    fn test_reducer_reset() {
        let mut reducer = PointReducer::new(100.0).unwrap();
        let p = Coordinate::new(13.4, 52.5);
        assert!(reducer.push(p));
        assert!(!reducer.push(p));
        reducer.reset();
        assert!(reducer.anchor().is_none());
        assert!(reducer.push(p));
    }

    #[test]
    fn test_flatten_segments() {
        let pts = line(6, 0.001);
        let seg = |start: usize, end: usize| CorrelatedSegment {
            max_slope: 30.0,
            avg_slope: 12.0,
            start_index: start,
            end_index: end,
            segment: pts[start..=end].to_vec(),
        };
        let flat = flatten_segments(&[seg(0, 2), seg(2, 5)]);
        assert_eq!(flat.len(), 7);
        assert_eq!(flat[2], flat[3]);

        // The shared point collapses on reduction
        let reduced = reduce_points(&flat, 1.0).unwrap();
        assert_eq!(reduced, pts);
    }
}
