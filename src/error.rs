//! Error handling for slope extraction.
//!
//! Hard failures (caller contract violations, malformed JSON) are reported as
//! [`SlopeError`]. Recoverable route conditions such as an unroutable request
//! are not errors; they travel as [`RouteWarning`](crate::RouteWarning)s inside
//! a [`SlopeReport`](crate::SlopeReport).

use thiserror::Error;

/// Error type for slope extraction and point reduction.
#[derive(Error, Debug)]
pub enum SlopeError {
    /// An interval references indices outside the coordinate sequence.
    #[error("invalid interval bounds [{start}, {end}] for {len} coordinates")]
    InvalidIntervalBounds { start: usize, end: usize, len: usize },

    /// An interval starts after it ends.
    #[error("interval start {start} is after end {end}")]
    ReversedInterval { start: usize, end: usize },

    /// A threshold is negative or not finite.
    #[error("invalid {name} threshold: {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// A coordinate array did not have 2 or 3 components.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Route JSON could not be parsed.
    #[error("malformed route data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for slope operations.
pub type Result<T> = std::result::Result<T, SlopeError>;

/// Check that a threshold is usable as a symmetric or distance bound.
pub(crate) fn check_threshold(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SlopeError::InvalidThreshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SlopeError::InvalidIntervalBounds { start: 4, end: 12, len: 10 };
        let msg = err.to_string();
        assert!(msg.contains("[4, 12]"));
        assert!(msg.contains("10 coordinates"));
    }

    #[test]
    fn test_check_threshold() {
        assert_eq!(check_threshold("max slope", 0.0).unwrap(), 0.0);
        assert_eq!(check_threshold("max slope", 25.0).unwrap(), 25.0);
        assert!(matches!(
            check_threshold("avg slope", -1.0),
            Err(SlopeError::InvalidThreshold { name: "avg slope", .. })
        ));
        assert!(check_threshold("distance", f64::NAN).is_err());
        assert!(check_threshold("distance", f64::INFINITY).is_err());
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<Vec<f64>, _> = serde_json::from_str("[1, ");
        let err: SlopeError = parse.unwrap_err().into();
        assert!(matches!(err, SlopeError::Json(_)));
        assert!(err.to_string().starts_with("malformed route data"));
    }
}
