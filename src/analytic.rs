//! Closed-form drag-free ballistics.
//!
//! Every sampled point is evaluated directly from the parabola, so there is no
//! integration error and the last sample lands exactly at the flight time.

use nalgebra::Vector2;
use serde::Serialize;
use tracing::debug;

use crate::constants::{GRAVITY_MPS2, MIN_COS_THRESHOLD};
use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::launch::LaunchParameters;
use crate::trajectory::{FlightSummary, Trajectory};

/// Position at time `t` for a launch angle in radians
#[inline]
fn position_at_rad(velocity: f64, angle_rad: f64, initial_height: f64, t: f64) -> Vector2<f64> {
    let (sin, cos) = angle_rad.sin_cos();
    Vector2::new(
        velocity * t * cos,
        initial_height + velocity * t * sin - 0.5 * GRAVITY_MPS2 * t * t,
    )
}

/// `sqrt(v²·sin²θ + 2·g·h)`, the vertical speed at landing
#[inline]
fn landing_discriminant(speed: f64, angle_rad: f64, initial_height: f64) -> f64 {
    let vy = speed * angle_rad.sin();
    (vy * vy + 2.0 * GRAVITY_MPS2 * initial_height).sqrt()
}

/// Flight time and range for a launch angle in radians
fn flight_time_and_range_rad(velocity: f64, angle_rad: f64, initial_height: f64) -> (f64, f64) {
    let (sin, cos) = angle_rad.sin_cos();
    if initial_height == 0.0 {
        let air_time = 2.0 * velocity * sin / GRAVITY_MPS2;
        let distance = velocity * velocity / GRAVITY_MPS2 * (2.0 * angle_rad).sin();
        (air_time, distance)
    } else {
        let disc = landing_discriminant(velocity, angle_rad, initial_height);
        let air_time = (velocity * sin + disc) / GRAVITY_MPS2;
        let distance = velocity * cos / GRAVITY_MPS2 * (velocity * sin + disc);
        (air_time, distance)
    }
}

/// Impact angle below horizontal, in degrees.
///
/// `atan(disc / (speed·cosθ))`; a vertical launch (cos θ = 0) lands at 90°.
/// The drag integrator reuses this relation with its final speed.
pub fn impact_angle_degrees(speed: f64, angle_rad: f64, initial_height: f64) -> f64 {
    let horizontal = speed * angle_rad.cos();
    if horizontal.abs() < MIN_COS_THRESHOLD * speed.abs().max(1.0) {
        return 90.0;
    }
    let disc = landing_discriminant(speed, angle_rad, initial_height);
    (disc / horizontal).atan().to_degrees()
}

/// Closed-form position at time `t` after launch
pub fn position_at(velocity: f64, angle_degrees: f64, initial_height: f64, t: f64) -> Vector2<f64> {
    position_at_rad(velocity, angle_degrees.to_radians(), initial_height, t)
}

/// Flight time (s) and horizontal range (m) without sampling the path
pub fn flight_time_and_range(
    velocity: f64,
    angle_degrees: f64,
    initial_height: f64,
) -> Result<(f64, f64)> {
    LaunchParameters::new(velocity, angle_degrees, initial_height, 1).validate_no_drag()?;
    Ok(flight_time_and_range_rad(
        velocity,
        angle_degrees.to_radians(),
        initial_height,
    ))
}

/// Drag-free trajectory sampled at `sample_count` equal time steps.
///
/// The path holds `sample_count + 1` points: the launch position and one per step,
/// the last one at the landing time.
pub fn solve_no_drag(
    velocity: f64,
    angle_degrees: f64,
    initial_height: f64,
    sample_count: usize,
) -> Result<Trajectory> {
    LaunchParameters::new(velocity, angle_degrees, initial_height, sample_count)
        .validate_no_drag()?;

    let angle_rad = angle_degrees.to_radians();
    let (air_time, distance) = flight_time_and_range_rad(velocity, angle_rad, initial_height);
    let impact_angle = impact_angle_degrees(velocity, angle_rad, initial_height);
    let impact_speed = (velocity * velocity + 2.0 * GRAVITY_MPS2 * initial_height).sqrt();

    let steps = sample_count as f64;
    let points: Vec<Vector2<f64>> = (0..=sample_count)
        .map(|i| {
            let t = air_time * i as f64 / steps;
            position_at_rad(velocity, angle_rad, initial_height, t)
        })
        .collect();

    debug!(
        velocity,
        angle_degrees,
        initial_height,
        sample_count,
        air_time,
        distance,
        "solved drag-free trajectory"
    );

    Ok(Trajectory::assemble(
        points,
        air_time / steps,
        FlightSummary {
            air_time,
            impact_angle_degrees: impact_angle,
            distance,
            impact_speed,
        },
    ))
}

/// Launch angles that land a drag-free shot at a given distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaunchAngles {
    /// Flat solution in degrees; negative when the shot has to aim downward
    pub low_degrees: f64,
    /// Lofted solution in degrees
    pub high_degrees: f64,
}

/// Solve the aiming problem for ground-level targets.
///
/// Returns `None` when `distance` is beyond the reach of `velocity` from
/// `initial_height`. At maximum reach both angles coincide.
pub fn launch_angles_for_distance(
    velocity: f64,
    distance: f64,
    initial_height: f64,
) -> Result<Option<LaunchAngles>> {
    ensure_positive("velocity", velocity)?;
    ensure_positive("distance", distance)?;
    ensure_non_negative("initial_height", initial_height)?;

    let v2 = velocity * velocity;
    let g = GRAVITY_MPS2;
    // Target sits `initial_height` below the launch point
    let discriminant = v2 * v2 - g * (g * distance * distance - 2.0 * initial_height * v2);
    if discriminant < 0.0 {
        debug!(velocity, distance, initial_height, "target out of reach");
        return Ok(None);
    }

    let root = discriminant.sqrt();
    let low = ((v2 - root) / (g * distance)).atan().to_degrees();
    let high = ((v2 + root) / (g * distance)).atan().to_degrees();
    Ok(Some(LaunchAngles {
        low_degrees: low,
        high_degrees: high,
    }))
}
