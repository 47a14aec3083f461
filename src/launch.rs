//! Launch parameters shared by both solvers

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, BallisticsError, Result};
use crate::projectile::Projectile;
use crate::trajectory::Trajectory;

/// Scalar launch conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchParameters {
    pub velocity: f64,        // m/s
    pub angle_degrees: f64,   // above horizontal
    pub initial_height: f64,  // meters above ground
    pub sample_count: usize,  // points in the output path (drag-free and sampled drag output)
}

impl Default for LaunchParameters {
    fn default() -> Self {
        Self {
            velocity: 10.0,
            angle_degrees: 45.0,
            initial_height: 0.0,
            sample_count: 50,
        }
    }
}

impl LaunchParameters {
    pub fn new(velocity: f64, angle_degrees: f64, initial_height: f64, sample_count: usize) -> Self {
        Self {
            velocity,
            angle_degrees,
            initial_height,
            sample_count,
        }
    }

    /// Drag-free launches accept the closed interval [0, 90] degrees.
    /// A flat launch from the ground never leaves it and is rejected.
    pub fn validate_no_drag(&self) -> Result<()> {
        ensure_positive("velocity", self.velocity)?;
        ensure_non_negative("initial_height", self.initial_height)?;
        validate_sample_count(self.sample_count)?;
        if !self.angle_degrees.is_finite() || !(0.0..=90.0).contains(&self.angle_degrees) {
            return Err(BallisticsError::invalid(
                "angle_degrees",
                format!("must be within [0, 90], got {}", self.angle_degrees),
            ));
        }
        if self.angle_degrees == 0.0 && self.initial_height == 0.0 {
            return Err(BallisticsError::invalid(
                "angle_degrees",
                "a horizontal launch from ground level has zero flight time",
            ));
        }
        Ok(())
    }

    /// Drag launches need the open interval (0, 90) degrees.
    /// `sample_count` is only checked by the sampled drag solver.
    pub fn validate_drag(&self) -> Result<()> {
        ensure_positive("velocity", self.velocity)?;
        ensure_non_negative("initial_height", self.initial_height)?;
        validate_open_angle(self.angle_degrees)
    }

    /// Closed-form drag-free trajectory for these parameters
    pub fn solve_no_drag(&self) -> Result<Trajectory> {
        crate::analytic::solve_no_drag(
            self.velocity,
            self.angle_degrees,
            self.initial_height,
            self.sample_count,
        )
    }

    /// Drag-aware trajectory resampled to `sample_count` evenly timed points
    pub fn solve_with_drag<P: Projectile + ?Sized>(&self, projectile: &P) -> Result<Trajectory> {
        crate::drag_integrator::solve_with_drag_sampled(
            projectile,
            self.velocity,
            self.angle_degrees,
            self.initial_height,
            self.sample_count,
        )
    }
}

pub(crate) fn validate_sample_count(sample_count: usize) -> Result<()> {
    if sample_count == 0 {
        return Err(BallisticsError::invalid("sample_count", "must be > 0"));
    }
    Ok(())
}

pub(crate) fn validate_open_angle(angle_degrees: f64) -> Result<()> {
    if !angle_degrees.is_finite() || angle_degrees <= 0.0 || angle_degrees >= 90.0 {
        return Err(BallisticsError::invalid(
            "angle_degrees",
            format!("must be within (0, 90), got {angle_degrees}"),
        ));
    }
    Ok(())
}
