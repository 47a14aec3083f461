//! Parallel evaluation of independent launches.
//!
//! The solvers hold no state, so each launch runs on its own rayon worker
//! without any locking.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::constants::MIN_SWEEP_RESOLUTION_DEG;
use crate::drag_integrator::solve_with_drag;
use crate::error::{ensure_non_negative, ensure_positive, BallisticsError, Result};
use crate::launch::LaunchParameters;
use crate::projectile::Projectile;
use crate::trajectory::Trajectory;

/// Drag-free trajectories for every launch, in input order
pub fn solve_batch_no_drag(launches: &[LaunchParameters]) -> Vec<Result<Trajectory>> {
    launches.par_iter().map(|launch| launch.solve_no_drag()).collect()
}

/// Sampled drag trajectories for every launch, in input order
pub fn solve_batch_with_drag<P>(projectile: &P, launches: &[LaunchParameters]) -> Vec<Result<Trajectory>>
where
    P: Projectile + Sync + ?Sized,
{
    launches
        .par_iter()
        .map(|launch| launch.solve_with_drag(projectile))
        .collect()
}

/// Launch angle with the greatest drag-aware range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeOptimum {
    pub angle_degrees: f64,
    pub distance: f64,
    pub air_time: f64,
}

/// Sweep launch angles `resolution, 2·resolution, ...` below 90° and return the
/// one that carries furthest.
pub fn max_range_angle<P>(
    projectile: &P,
    velocity: f64,
    initial_height: f64,
    resolution_degrees: f64,
) -> Result<RangeOptimum>
where
    P: Projectile + Sync + ?Sized,
{
    ensure_positive("velocity", velocity)?;
    ensure_non_negative("initial_height", initial_height)?;
    ensure_positive("resolution_degrees", resolution_degrees)?;
    if !(MIN_SWEEP_RESOLUTION_DEG..45.0).contains(&resolution_degrees) {
        return Err(BallisticsError::invalid(
            "resolution_degrees",
            format!("must be within [{MIN_SWEEP_RESOLUTION_DEG}, 45), got {resolution_degrees}"),
        ));
    }

    let count = (90.0 / resolution_degrees).ceil() as usize;
    let angles: Vec<f64> = (1..count)
        .map(|i| i as f64 * resolution_degrees)
        .filter(|angle| *angle < 90.0)
        .collect();

    let candidates = angles
        .par_iter()
        .map(|&angle| {
            solve_with_drag(projectile, velocity, angle, initial_height).map(|t| RangeOptimum {
                angle_degrees: angle,
                distance: t.distance(),
                air_time: t.air_time(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let best = candidates
        .into_iter()
        .reduce(|best, c| if c.distance > best.distance { c } else { best })
        .ok_or_else(|| BallisticsError::invalid("resolution_degrees", "no angles to evaluate"))?;

    debug!(
        velocity,
        initial_height,
        evaluated = angles.len(),
        angle = best.angle_degrees,
        distance = best.distance,
        "range sweep finished"
    );
    Ok(best)
}
