//! Trajectory result type.
//!
//! Both solvers hand their raw path and derived scalars to
//! [`Trajectory::assemble`], which rounds the scalars for display and freezes
//! the result. Callers only get read access.

use nalgebra::Vector2;
use serde::Serialize;

use crate::constants::REPORT_DECIMALS;

/// Scalars derived by a solver for the landing point
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FlightSummary {
    pub air_time: f64,
    pub impact_angle_degrees: f64,
    pub distance: f64,
    pub impact_speed: f64,
}

/// Computed flight path: (horizontal, vertical) points in meters plus landing data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    points: Vec<Vector2<f64>>,
    sample_interval: f64,
    air_time: f64,
    impact_angle_degrees: f64,
    distance: f64,
    impact_speed: f64,
}

impl Trajectory {
    /// Freeze a solver's output. Scalars are rounded, points are kept as computed.
    ///
    /// Solvers always seed `points` with the launch position, so the path is
    /// never empty.
    pub(crate) fn assemble(
        points: Vec<Vector2<f64>>,
        sample_interval: f64,
        summary: FlightSummary,
    ) -> Self {
        debug_assert!(!points.is_empty(), "trajectory must contain the launch point");
        Trajectory {
            points,
            sample_interval,
            air_time: round_to(summary.air_time, REPORT_DECIMALS),
            impact_angle_degrees: round_to(summary.impact_angle_degrees, REPORT_DECIMALS),
            distance: round_to(summary.distance, REPORT_DECIMALS),
            impact_speed: round_to(summary.impact_speed, REPORT_DECIMALS),
        }
    }

    /// Time-ordered path, first point is the launch position
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    /// Seconds in the air
    pub fn air_time(&self) -> f64 {
        self.air_time
    }

    /// Angle of the velocity below horizontal at landing, in degrees
    pub fn impact_angle_degrees(&self) -> f64 {
        self.impact_angle_degrees
    }

    /// Horizontal distance to the landing point in meters
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Speed at landing in m/s
    pub fn impact_speed(&self) -> f64 {
        self.impact_speed
    }

    /// Time between consecutive points in seconds
    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_point(&self) -> Vector2<f64> {
        self.points[0]
    }

    pub fn final_point(&self) -> Vector2<f64> {
        self.points[self.points.len() - 1]
    }

    /// Highest sampled point
    pub fn apogee(&self) -> Vector2<f64> {
        self.points
            .iter()
            .copied()
            .fold(self.points[0], |best, p| if p.y > best.y { p } else { best })
    }

    pub fn max_height(&self) -> f64 {
        self.apogee().y
    }

    /// Points paired with their time since launch, for uniform-time playback
    pub fn timed_points(&self) -> impl Iterator<Item = (f64, Vector2<f64>)> + '_ {
        let dt = self.sample_interval;
        self.points
            .iter()
            .enumerate()
            .map(move |(i, p)| (i as f64 * dt, *p))
    }

    pub fn into_points(self) -> Vec<Vector2<f64>> {
        self.points
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trajectory {
        Trajectory::assemble(
            vec![
                Vector2::new(0.0, 1.0),
                Vector2::new(1.0, 2.5),
                Vector2::new(2.0, 2.0),
                Vector2::new(3.123456789, -0.000001),
            ],
            0.25,
            FlightSummary {
                air_time: 0.750049,
                impact_angle_degrees: 51.234567,
                distance: 3.123456789,
                impact_speed: 8.00004,
            },
        )
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 4), 1.2346);
        assert_eq!(round_to(-1.23454, 4), -1.2345);
        assert_eq!(round_to(10.0, 4), 10.0);
    }

    #[test]
    fn test_scalars_rounded_points_untouched() {
        let trajectory = sample();
        assert_eq!(trajectory.air_time(), 0.75);
        assert_eq!(trajectory.impact_angle_degrees(), 51.2346);
        assert_eq!(trajectory.distance(), 3.1235);
        assert_eq!(trajectory.impact_speed(), 8.0);
        assert_eq!(trajectory.final_point().x, 3.123456789);
    }

    #[test]
    fn test_apogee_and_endpoints() {
        let trajectory = sample();
        assert_eq!(trajectory.len(), 4);
        assert!(!trajectory.is_empty());
        assert_eq!(trajectory.first_point(), Vector2::new(0.0, 1.0));
        assert_eq!(trajectory.apogee(), Vector2::new(1.0, 2.5));
        assert_eq!(trajectory.max_height(), 2.5);
    }

    #[test]
    fn test_timed_points() {
        let times: Vec<f64> = sample().timed_points().map(|(t, _)| t).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["distance"], 3.1235);
        assert_eq!(json["points"][1][1], 2.5);
    }
}
