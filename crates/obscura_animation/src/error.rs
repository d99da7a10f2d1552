//! Error types for obscura_animation

use thiserror::Error;

/// Errors raised when a session is started
///
/// Parameters are validated once, at session start. A running session never
/// produces an error mid-tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A smoothing factor, duration or epsilon outside its valid range
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The scheduler behind a handle has been dropped
    #[error("animation scheduler is no longer alive")]
    SchedulerDropped,
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Validate a continuous smoothing factor, which must lie in (0, 1]
pub fn validate_factor(factor: f32) -> Result<f32> {
    if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
        return Err(AnimationError::InvalidParameter {
            name: "factor",
            value: factor as f64,
            reason: "must lie in (0, 1]",
        });
    }
    Ok(factor)
}

/// Validate a fixed duration in milliseconds
///
/// Negative durations are clamped to zero, so the session completes on its
/// first tick. Non-finite durations are rejected.
pub fn validate_duration(duration_ms: f64) -> Result<f64> {
    if !duration_ms.is_finite() {
        return Err(AnimationError::InvalidParameter {
            name: "duration_ms",
            value: duration_ms,
            reason: "must be finite",
        });
    }
    if duration_ms < 0.0 {
        tracing::warn!(duration_ms, "negative duration clamped to 0");
        return Ok(0.0);
    }
    Ok(duration_ms)
}

/// Validate a settle epsilon, which must be finite and positive
pub fn validate_epsilon(epsilon: f32) -> Result<f32> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(AnimationError::InvalidParameter {
            name: "settle_epsilon",
            value: epsilon as f64,
            reason: "must be a positive finite number",
        });
    }
    Ok(epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_range() {
        assert!(validate_factor(1.0).is_ok());
        assert!(validate_factor(0.01).is_ok());
        assert!(validate_factor(0.0).is_err());
        assert!(validate_factor(1.5).is_err());
        assert!(validate_factor(-0.2).is_err());
        assert!(validate_factor(f32::NAN).is_err());
    }

    #[test]
    fn test_duration_clamps_negative() {
        assert_eq!(validate_duration(-50.0), Ok(0.0));
        assert_eq!(validate_duration(600.0), Ok(600.0));
        assert!(validate_duration(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = validate_factor(2.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid factor = 2: must lie in (0, 1]");
    }
}
