//! Slope intervals and the severity filter.
//!
//! A routing service reports per-metric details as `[start, end, value]`
//! triples over the route's coordinate indices. An interval is *severe* when
//! its value reaches the threshold in either direction, so steep climbs and
//! steep descents both count.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SlopeError};

/// Slope metric reported by the route source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum SlopeMetric {
    /// Maximum slope over the interval, in percent.
    MaxSlope,
    /// Average slope over the interval, in percent.
    AverageSlope,
}

impl SlopeMetric {
    /// Detail key used by the route source for this metric.
    pub fn detail_key(&self) -> &'static str {
        match self {
            SlopeMetric::MaxSlope => "max_slope",
            SlopeMetric::AverageSlope => "average_slope",
        }
    }
}

impl fmt::Display for SlopeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.detail_key())
    }
}

/// A contiguous run of coordinate indices with a constant slope value.
///
/// Both indices are inclusive. Serialized as `[start, end, value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize, f64)", into = "(usize, usize, f64)")]
pub struct SlopeInterval {
    pub start: usize,
    pub end: usize,
    pub value: f64,
}

impl SlopeInterval {
    /// Create an interval, rejecting `start > end`.
    pub fn new(start: usize, end: usize, value: f64) -> Result<Self> {
        if start > end {
            return Err(SlopeError::ReversedInterval { start, end });
        }
        Ok(Self { start, end, value })
    }

    /// Check that both indices address a sequence of `len` coordinates.
    pub fn check_bounds(&self, len: usize) -> Result<()> {
        if self.start > self.end {
            return Err(SlopeError::ReversedInterval {
                start: self.start,
                end: self.end,
            });
        }
        if self.end >= len {
            return Err(SlopeError::InvalidIntervalBounds {
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(())
    }
}

impl TryFrom<(usize, usize, f64)> for SlopeInterval {
    type Error = SlopeError;

    fn try_from((start, end, value): (usize, usize, f64)) -> Result<Self> {
        Self::new(start, end, value)
    }
}

impl From<SlopeInterval> for (usize, usize, f64) {
    fn from(interval: SlopeInterval) -> Self {
        (interval.start, interval.end, interval.value)
    }
}

/// Symmetric, inclusive severity test: `value >= T || value <= -T`.
#[inline]
pub fn is_severe(value: f64, threshold: f64) -> bool {
    value >= threshold || value <= -threshold
}

/// Keep only the intervals whose slope is severe for `threshold`.
///
/// Input order is preserved. Filtering an already filtered list with the same
/// threshold returns it unchanged.
///
/// # Example
///
/// ```rust
/// use route_slopes::{SlopeInterval, intervals::filter_severe};
///
/// let details = vec![
///     SlopeInterval::new(0, 10, 30.0).unwrap(),
///     SlopeInterval::new(10, 20, 4.0).unwrap(),
///     SlopeInterval::new(20, 30, -28.0).unwrap(),
/// ];
///
/// let severe = filter_severe(&details, 20.0);
/// assert_eq!(severe.len(), 2);
/// assert_eq!(severe[1].value, -28.0);
/// ```
pub fn filter_severe(intervals: &[SlopeInterval], threshold: f64) -> Vec<SlopeInterval> {
    intervals
        .iter()
        .filter(|interval| is_severe(interval.value, threshold))
        .copied()
        .collect()
}
