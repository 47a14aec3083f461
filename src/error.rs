use thiserror::Error;

/// Errors reported by the trajectory solvers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BallisticsError {
    /// A launch or projectile parameter is not physically well formed
    #[error("invalid {parameter}: {reason}")]
    InvalidInput {
        parameter: &'static str,
        reason: String,
    },

    /// The drag integrator could not bring the body back to the ground in a
    /// stable, finite state within its step bound
    #[error("drag integration diverged after {steps} steps ({elapsed:.3} s simulated)")]
    Divergence { steps: usize, elapsed: f64 },

    /// A simulation config could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// A Monte Carlo spread could not be turned into a distribution
    #[error("invalid distribution: {0}")]
    Distribution(String),

    /// Every Monte Carlo run was rejected by the solver
    #[error("no successful simulations out of {attempted}")]
    NoValidRuns { attempted: usize },
}

impl BallisticsError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        BallisticsError::InvalidInput {
            parameter,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's inputs rather than by the computation
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, BallisticsError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, BallisticsError>;

/// Reject values that are NaN, infinite, or not strictly positive
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(BallisticsError::invalid(parameter, format!("must be finite, got {value}")));
    }
    if value <= 0.0 {
        return Err(BallisticsError::invalid(parameter, format!("must be > 0, got {value}")));
    }
    Ok(())
}

/// Reject values that are NaN, infinite, or negative
pub(crate) fn ensure_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(BallisticsError::invalid(parameter, format!("must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(BallisticsError::invalid(parameter, format!("must be >= 0, got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("velocity", 1.0).is_ok());
        assert!(ensure_positive("velocity", 0.0).is_err());
        assert!(ensure_positive("velocity", -3.0).is_err());
        assert!(ensure_positive("velocity", f64::NAN).is_err());
        assert!(ensure_positive("velocity", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative("initial_height", 0.0).is_ok());
        assert!(ensure_non_negative("initial_height", 12.5).is_ok());
        assert!(ensure_non_negative("initial_height", -0.1).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = BallisticsError::invalid("mass", "must be > 0, got 0");
        assert_eq!(err.to_string(), "invalid mass: must be > 0, got 0");
        assert!(err.is_invalid_input());

        let err = BallisticsError::Divergence { steps: 10, elapsed: 0.01 };
        assert!(err.to_string().contains("10 steps"));
        assert!(!err.is_invalid_input());
    }
}
